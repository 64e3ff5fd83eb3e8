//! Attribute-style validation for request DTOs.
//!
//! Each DTO lists its field rules in `Validate::validate`. Failures are
//! `ValidationError`s attached to the offending field so they surface as
//! field-grouped `400` bodies.

use std::ops::RangeInclusive;

use status_http::ValidationError;

pub trait Validate {
    /// Every rule the value breaks, in field declaration order.
    fn validate(&self) -> Vec<ValidationError>;
}

/// `value` must contain something other than whitespace.
pub fn required(field: &str, value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        Some(ValidationError::new(
            format!("The {field} field is required."),
            [field],
        ))
    } else {
        None
    }
}

pub fn range(field: &str, value: i32, bounds: RangeInclusive<i32>) -> Option<ValidationError> {
    if bounds.contains(&value) {
        None
    } else {
        Some(ValidationError::new(
            format!(
                "The field {field} must be between {} and {}.",
                bounds.start(),
                bounds.end()
            ),
            [field],
        ))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_values_are_missing(#[case] value: &str) {
        let err = required("Name", value).unwrap();
        assert_eq!(err.message, "The Name field is required.");
        assert_eq!(err.member_names, vec!["Name"]);
    }

    #[test]
    fn present_value_passes() {
        assert!(required("Name", "Walk dog").is_none());
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(5, true)]
    #[case(6, false)]
    fn range_is_inclusive(#[case] value: i32, #[case] ok: bool) {
        let result = range("Difficulty", value, 1..=5);
        assert_eq!(result.is_none(), ok);
        if let Some(err) = result {
            assert_eq!(err.message, "The field Difficulty must be between 1 and 5.");
        }
    }
}
