//! Todo entity and the request DTOs that create or change it.

use serde::{Deserialize, Serialize};
use status_http::{Status, ValidationError};

use crate::validation::{range, required, Validate};

/// Difficulty runs from 1 (easy) to 5 (hard).
pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

pub const NAME_FIELD: &str = "Name";
pub const DIFFICULTY_FIELD: &str = "Difficulty";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub name: String,
    pub difficulty: i32,
}

impl TodoItem {
    /// Rename the item, refusing names that end with `!`.
    ///
    /// The name is only changed when the returned status is valid.
    pub fn change_name(&mut self, name: &str) -> Status {
        let mut status = Status::new();
        if name.ends_with('!') {
            status.add_error(
                "Business logic says the name cannot end with !",
                [NAME_FIELD],
            );
            return status;
        }
        self.name = name.to_string();
        status
    }
}

impl Validate for TodoItem {
    fn validate(&self) -> Vec<ValidationError> {
        [
            required(NAME_FIELD, &self.name),
            range(DIFFICULTY_FIELD, self.difficulty, DIFFICULTY_RANGE),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoDto {
    /// Filled in by the server once the item is stored.
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub difficulty: i32,
}

impl Validate for CreateTodoDto {
    fn validate(&self) -> Vec<ValidationError> {
        [
            required(NAME_FIELD, &self.name),
            range(DIFFICULTY_FIELD, self.difficulty, DIFFICULTY_RANGE),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChangeNameDto {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

impl Validate for ChangeNameDto {
    fn validate(&self) -> Vec<ValidationError> {
        required(NAME_FIELD, &self.name).into_iter().collect()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChangeDifficultyDto {
    pub id: u64,
    #[serde(default)]
    pub difficulty: i32,
}

impl Validate for ChangeDifficultyDto {
    fn validate(&self) -> Vec<ValidationError> {
        range(DIFFICULTY_FIELD, self.difficulty, DIFFICULTY_RANGE)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> TodoItem {
        TodoItem {
            id: 1,
            name: "Write unit tests".to_string(),
            difficulty: 2,
        }
    }

    #[test]
    fn change_name_accepts_plain_names() {
        let mut todo = item();
        let status = todo.change_name("Write more tests");
        assert!(status.is_valid());
        assert_eq!(todo.name, "Write more tests");
    }

    #[test]
    fn change_name_rejects_trailing_bang() {
        let mut todo = item();
        let status = todo.change_name("Now!");
        assert!(!status.is_valid());
        assert_eq!(status.errors()[0].member_names, vec!["Name"]);
        assert_eq!(todo.name, "Write unit tests");
    }

    #[test]
    fn create_dto_reports_every_broken_rule() {
        let dto = CreateTodoDto {
            id: 0,
            name: String::new(),
            difficulty: 9,
        };
        let errors = dto.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].member_names, vec!["Name"]);
        assert_eq!(errors[1].member_names, vec!["Difficulty"]);
    }

    #[test]
    fn create_dto_id_defaults_to_zero() {
        let dto: CreateTodoDto = serde_json::from_str(r#"{"name":"Test","difficulty":3}"#).unwrap();
        assert_eq!(dto.id, 0);
    }

    #[test]
    fn create_dto_missing_name_fails_validation_not_parsing() {
        let dto: CreateTodoDto = serde_json::from_str(r#"{"difficulty":3}"#).unwrap();
        let errors = dto.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "The Name field is required.");
    }

    #[test]
    fn patched_item_is_validated_like_a_new_one() {
        let mut todo = item();
        todo.difficulty = 0;
        let errors = todo.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].member_names, vec!["Difficulty"]);
        assert!(item().validate().is_empty());
    }

    #[test]
    fn todo_serializes_to_json() {
        let json = serde_json::to_value(item()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Write unit tests");
        assert_eq!(json["difficulty"], 2);
    }
}
