//! Read, update and delete operations over the todo store.
//!
//! Every operation reports through a `Status`: validation failures and
//! missing items become errors, successes set the message the client sees.
//! Reading a missing item is not an error; it yields a valid outcome with
//! no result.

use json_patch::Patch;
use status_http::{Outcome, Status, ValidationError};
use tracing::debug;

use crate::models::{ChangeDifficultyDto, ChangeNameDto, TodoItem};
use crate::store::TodoStore;
use crate::validation::Validate;

/// Message of a read that found nothing. It answers with `204`, which has
/// no body, so clients never see it; it stays in logs and in-process tests.
pub const NOT_FOUND_MESSAGE: &str = "The Todo Item was not found.";
pub const MISSING_ITEM_ERROR: &str =
    "Sorry, I could not find the Todo Item you were looking for.";
pub const UPDATED_MESSAGE: &str = "Successfully updated the Todo Item";
pub const DELETED_MESSAGE: &str = "Successfully deleted a Todo Item";
pub const ID_CHANGED_ERROR: &str = "The id of a Todo Item cannot be changed.";

#[derive(Clone, Debug)]
pub struct TodoCrud {
    store: TodoStore,
}

impl TodoCrud {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }

    pub async fn read_many(&self) -> Outcome<Vec<TodoItem>> {
        Outcome::success(self.store.list().await)
    }

    pub async fn read_single(&self, id: u64) -> Outcome<TodoItem> {
        match self.store.get(id).await {
            Some(item) => Outcome::success(item),
            None => {
                let mut status = Status::new();
                status.set_message(NOT_FOUND_MESSAGE);
                Outcome::new(status, None)
            }
        }
    }

    pub async fn update_name(&self, dto: &ChangeNameDto) -> Status {
        self.update(dto.id, dto.validate(), |item| item.change_name(&dto.name))
            .await
    }

    pub async fn update_difficulty(&self, dto: &ChangeDifficultyDto) -> Status {
        self.update(dto.id, dto.validate(), |item| {
            item.difficulty = dto.difficulty;
            Status::new()
        })
        .await
    }

    /// Apply an RFC 6902 patch to the stored item, then validate the result
    /// the same way a new item is validated.
    pub async fn patch(&self, id: u64, patch: &Patch) -> Status {
        self.update(id, Vec::new(), |item| {
            let mut status = Status::new();
            let patched = match apply_patch(item, patch) {
                Ok(patched) => patched,
                Err(message) => {
                    status.add_global_error(message);
                    return status;
                }
            };
            if patched.id != item.id {
                status.add_global_error(ID_CHANGED_ERROR);
                return status;
            }
            status.add_validation_errors(patched.validate());
            if status.is_valid() {
                *item = patched;
            }
            status
        })
        .await
    }

    /// Validate, load, apply `change`, and save only if nothing failed.
    async fn update<F>(
        &self,
        id: u64,
        validation: Vec<ValidationError>,
        change: F,
    ) -> Status
    where
        F: FnOnce(&mut TodoItem) -> Status,
    {
        let mut status = Status::new();
        status.add_validation_errors(validation);
        if !status.is_valid() {
            debug!(id, errors = %status.all_errors("; "), "update rejected by validation");
            return status;
        }

        let Some(mut item) = self.store.get(id).await else {
            status.add_global_error(MISSING_ITEM_ERROR);
            return status;
        };
        status.combine(change(&mut item));
        if !status.is_valid() {
            debug!(id, errors = %status.all_errors("; "), "update rejected by entity");
            return status;
        }

        if self.store.replace(item).await {
            status.set_message(UPDATED_MESSAGE);
        } else {
            status.add_global_error(MISSING_ITEM_ERROR);
        }
        status
    }

    pub async fn delete(&self, id: u64) -> Status {
        let mut status = Status::new();
        match self.store.remove(id).await {
            Some(_) => {
                status.set_message(DELETED_MESSAGE);
            }
            None => {
                status.add_global_error(MISSING_ITEM_ERROR);
            }
        }
        status
    }
}

fn apply_patch(item: &TodoItem, patch: &Patch) -> Result<TodoItem, String> {
    let mut doc = serde_json::to_value(item)
        .map_err(|err| format!("The Todo Item could not be read: {err}"))?;
    json_patch::patch(&mut doc, &patch.0)
        .map_err(|err| format!("The patch could not be applied: {err}"))?;
    serde_json::from_value(doc).map_err(|err| format!("The patched Todo Item is malformed: {err}"))
}
