//! Reconstructs a `Status` from a response built by [`crate::response`].
//!
//! # Design
//! Two entry points per shape: one reads an in-process `ApiResponse`
//! descriptor (unit and controller tests), the other reads a wire-level
//! `HttpResponse` (clients and live-server tests). Anything that does not
//! match a documented envelope is a `DecodeError`, never a default.
//!
//! Decoding errors is lossy. The builder files an error that names several
//! fields under each of them, and a field's list merges every error that
//! named it. The decoder emits one `ValidationError` per (field, message)
//! pair, in field order then message order. Per-field message lists
//! survive a round trip; original error boundaries do not.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;
use crate::http::HttpResponse;
use crate::response::{
    ApiResponse, FieldErrors, ResponseEnvelope, CREATED_CODE, ERRORS_CODE, NULL_RESULT_CODE,
};
use crate::routes::{value_kind, RouteValues};
use crate::status::{Outcome, Status, ValidationError};

/// A resource the server reports as created.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedResource<T> {
    pub location: String,
    pub value: T,
}

/// Rebuild the errors of a `400` body, one per (field, message) pair.
///
/// A body that yields no messages is rejected: a `400` never decodes to a
/// valid status.
pub fn status_from_field_errors(errors: &FieldErrors) -> Result<Status, DecodeError> {
    let mut status = Status::new();
    for (field, messages) in errors.iter() {
        for message in messages {
            let error = if field.is_empty() {
                ValidationError::global(message.as_str())
            } else {
                ValidationError::new(message.as_str(), [field])
            };
            status.add_validation_errors([error]);
        }
    }
    if status.is_valid() {
        return Err(DecodeError::shape(ERRORS_CODE, "error body carries no messages"));
    }
    status.set_message(failure_message(status.errors().len()));
    Ok(status)
}

fn failure_message(count: usize) -> String {
    if count == 1 {
        "Failed with 1 error".to_string()
    } else {
        format!("Failed with {count} errors")
    }
}

/// Decode a message or message-and-result descriptor, or an error body.
pub fn decode_response<T: Clone>(response: &ApiResponse<T>) -> Result<Outcome<T>, DecodeError> {
    let code = response.status_code;
    match &response.body {
        ResponseEnvelope::Errors(errors) if code == ERRORS_CODE => {
            Ok(Outcome::failed(status_from_field_errors(errors)?))
        }
        ResponseEnvelope::Errors(_) => {
            Err(DecodeError::shape(code, "error body on a non-error status"))
        }
        _ if code == ERRORS_CODE => Err(DecodeError::shape(code, "400 without an error body")),
        ResponseEnvelope::MessageOnly { message } => {
            let mut status = Status::new();
            status.set_message(message.as_str());
            Ok(Outcome::new(status, None))
        }
        ResponseEnvelope::MessageAndResult { message, result } => {
            let mut status = Status::new();
            status.set_message(message.as_str());
            Ok(Outcome::new(status, Some(result.clone())))
        }
        ResponseEnvelope::Created(_) => Err(DecodeError::shape(
            code,
            "created body; use decode_created_response",
        )),
    }
}

/// Check a created descriptor against what the caller expected.
///
/// Mismatches accumulate as errors on the returned status rather than
/// stopping at the first one. An error body folds into a single global
/// error whose text is also the status message.
pub fn decode_created_response<T: PartialEq + std::fmt::Debug>(
    response: &ApiResponse<T>,
    expected_route_name: &str,
    expected_route_values: &RouteValues,
    expected_dto: &T,
) -> Result<Status, DecodeError> {
    let code = response.status_code;
    match &response.body {
        ResponseEnvelope::Created(created) if code == CREATED_CODE => {
            let mut status = Status::new();
            if created.route_name != expected_route_name {
                status.add_global_error(format!(
                    "RouteName: expected {expected_route_name}, found: {}",
                    created.route_name
                ));
            }
            if created.value != *expected_dto {
                status.add_global_error(format!(
                    "DTO: the returned DTO instance does not match the test DTO: expected {expected_dto:?}, found: {:?}",
                    created.value
                ));
            }
            compare_route_values(&mut status, expected_route_values, &created.route_values);
            Ok(status)
        }
        ResponseEnvelope::Errors(errors) if code == ERRORS_CODE => {
            let text = format!(
                "Errors: {}",
                errors.messages().collect::<Vec<_>>().join("\n")
            );
            let mut status = Status::new();
            status.set_message(text.as_str());
            status.add_global_error(text);
            Ok(status)
        }
        _ => Err(DecodeError::shape(code, "not a created response")),
    }
}

fn compare_route_values(status: &mut Status, expected: &RouteValues, found: &RouteValues) {
    let mut expected_keys: Vec<&str> = expected.keys().collect();
    let mut found_keys: Vec<&str> = found.keys().collect();
    let expected_listing = expected_keys.join(",");
    let found_listing = found_keys.join(",");
    expected_keys.sort_unstable();
    found_keys.sort_unstable();
    if expected_keys != found_keys {
        status.add_global_error(format!(
            "RouteValues: Different named properties: expected = {expected_listing}, found = {found_listing}"
        ));
        return;
    }

    for (key, expected_value) in expected.iter() {
        let Some(found_value) = found.get(key) else {
            continue;
        };
        let (expected_kind, found_kind) = (value_kind(expected_value), value_kind(found_value));
        if expected_kind != found_kind {
            status.add_global_error(format!(
                "RouteValues->{key}, different type: expected = {expected_kind}, found = {found_kind}"
            ));
        } else if expected_value != found_value {
            status.add_global_error(format!(
                "RouteValues->{key}, different values: expected = {expected_value}, found = {found_value}"
            ));
        }
    }
}

/// Decode a wire response into a status and optional result.
///
/// `400` must carry field-grouped errors. A `204` with no body is a valid
/// status without a result. Any other code must carry `{"message"}` or
/// `{"message", "result"}`.
pub fn decode_http<T: DeserializeOwned>(response: &HttpResponse) -> Result<Outcome<T>, DecodeError> {
    let code = response.status;
    if code == ERRORS_CODE {
        let errors: FieldErrors = serde_json::from_str(&response.body)?;
        return Ok(Outcome::failed(status_from_field_errors(&errors)?));
    }
    if code == CREATED_CODE {
        return Err(DecodeError::shape(code, "created body; use decode_http_created"));
    }
    if code == NULL_RESULT_CODE && response.body.trim().is_empty() {
        return Ok(Outcome::new(Status::new(), None));
    }

    let Value::Object(mut body) = serde_json::from_str::<Value>(&response.body)? else {
        return Err(DecodeError::shape(code, "body is not a JSON object"));
    };
    let message = match body.remove("message") {
        Some(Value::String(message)) => message,
        Some(_) => return Err(DecodeError::shape(code, "message is not a string")),
        None => return Err(DecodeError::shape(code, "body has no message")),
    };
    let result = body.remove("result").map(serde_json::from_value).transpose()?;
    if let Some(extra) = body.keys().next() {
        return Err(DecodeError::shape(code, format!("unexpected key {extra:?}")));
    }

    let mut status = Status::new();
    status.set_message(message);
    Ok(Outcome::new(status, result))
}

/// Decode a wire response from a create endpoint.
///
/// `201` must carry a `location` header and the created dto as its body.
pub fn decode_http_created<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<Outcome<CreatedResource<T>>, DecodeError> {
    match response.status {
        CREATED_CODE => {
            let location = response
                .header("location")
                .ok_or(DecodeError::MissingLocation)?
                .to_string();
            let value = serde_json::from_str(&response.body)?;
            Ok(Outcome::success(CreatedResource { location, value }))
        }
        ERRORS_CODE => {
            let errors: FieldErrors = serde_json::from_str(&response.body)?;
            Ok(Outcome::failed(status_from_field_errors(&errors)?))
        }
        status => Err(DecodeError::UnexpectedStatus {
            status,
            body: response.body.clone(),
        }),
    }
}
