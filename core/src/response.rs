//! Turns a `Status` (and an optional result) into an HTTP response.
//!
//! # Design
//! Every builder is a pure function of its arguments and returns an
//! `ApiResponse` descriptor: a status code plus one of the documented body
//! shapes. Writing the descriptor to the wire is a separate step
//! (`ApiResponse::to_http_response`) so tests can inspect descriptors
//! directly and the decoder can invert them without a network.
//!
//! An invalid status always produces `400` with field-grouped errors. The
//! success code arguments never apply to it.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::error::EncodeError;
use crate::http::HttpResponse;
use crate::routes::{RouteTable, RouteValues};
use crate::status::{Outcome, Status, ValidationError};

pub const OK_CODE: u16 = 200;
pub const CREATED_CODE: u16 = 201;
pub const NULL_RESULT_CODE: u16 = 204;
pub const ERRORS_CODE: u16 = 400;

/// Field name to error messages, in first-appearance order.
///
/// The empty field name holds errors not attached to any field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, Vec<String>)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append `message` under `field`, creating the field's list if needed.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.0.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.0.push((field.to_string(), vec![message])),
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }

    /// Every message in field order, then message order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .flat_map(|(_, messages)| messages.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, messages) in &self.0 {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldErrorsVisitor;

        impl<'de> Visitor<'de> for FieldErrorsVisitor {
            type Value = FieldErrors;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to arrays of error messages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldErrors, A::Error> {
                let mut errors = FieldErrors::new();
                while let Some((field, messages)) = access.next_entry::<String, Vec<String>>()? {
                    for message in messages {
                        errors.push(&field, message);
                    }
                }
                Ok(errors)
            }
        }

        deserializer.deserialize_map(FieldErrorsVisitor)
    }
}

/// Group errors by the fields they name, preserving order.
///
/// An error naming several fields is appended to each of them. An error
/// naming none is filed under `""`.
pub fn group_errors_by_field(errors: &[ValidationError]) -> FieldErrors {
    let mut grouped = FieldErrors::new();
    for error in errors {
        if error.member_names.is_empty() {
            grouped.push("", error.message.as_str());
        }
        for name in &error.member_names {
            grouped.push(name, error.message.as_str());
        }
    }
    grouped
}

/// Everything a location-bearing created response needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedAtRoute<T> {
    pub route_name: String,
    pub route_values: RouteValues,
    pub value: T,
}

/// The body of a response, before serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope<T = ()> {
    MessageOnly { message: String },
    MessageAndResult { message: String, result: T },
    Errors(FieldErrors),
    Created(CreatedAtRoute<T>),
}

impl<T: Serialize> Serialize for ResponseEnvelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponseEnvelope::MessageOnly { message } => {
                let mut body = serializer.serialize_struct("MessageOnly", 1)?;
                body.serialize_field("message", message)?;
                body.end()
            }
            ResponseEnvelope::MessageAndResult { message, result } => {
                let mut body = serializer.serialize_struct("MessageAndResult", 2)?;
                body.serialize_field("message", message)?;
                body.serialize_field("result", result)?;
                body.end()
            }
            ResponseEnvelope::Errors(errors) => errors.serialize(serializer),
            ResponseEnvelope::Created(created) => created.value.serialize(serializer),
        }
    }
}

/// A status code and body produced by one of the builders.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T = ()> {
    pub status_code: u16,
    pub body: ResponseEnvelope<T>,
}

impl<T> ApiResponse<T> {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    fn errors(status: &Status) -> Self {
        ApiResponse {
            status_code: ERRORS_CODE,
            body: ResponseEnvelope::Errors(group_errors_by_field(status.errors())),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Serialize this response the way it is sent to a client.
    ///
    /// A created response gets a `location` header resolved through
    /// `routes`. A `204` carries no body, so its message stays server-side;
    /// a result or created value under `204` is an error, not dropped.
    pub fn to_http_response(&self, routes: &RouteTable) -> Result<HttpResponse, EncodeError> {
        let mut headers = Vec::new();
        if let ResponseEnvelope::Created(created) = &self.body {
            let location = routes.url_for(&created.route_name, &created.route_values)?;
            headers.push(("location".to_string(), location));
        }
        if self.status_code == NULL_RESULT_CODE {
            if !matches!(self.body, ResponseEnvelope::MessageOnly { .. }) {
                return Err(EncodeError::BodyDropped {
                    status: self.status_code,
                });
            }
            return Ok(HttpResponse {
                status: self.status_code,
                headers,
                body: String::new(),
            });
        }
        let body = serde_json::to_string(&self.body)?;
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpResponse {
            status: self.status_code,
            headers,
            body,
        })
    }
}

/// `valid_code` with the status message, or `400` with its errors.
pub fn build_message_response(status: &Status, valid_code: u16) -> ApiResponse {
    if !status.is_valid() {
        return ApiResponse::errors(status);
    }
    ApiResponse {
        status_code: valid_code,
        body: ResponseEnvelope::MessageOnly {
            message: status.message().to_string(),
        },
    }
}

/// `build_message_response` with the `200` default.
pub fn message_response(status: &Status) -> ApiResponse {
    build_message_response(status, OK_CODE)
}

/// Message plus result on success, message only when there is no result.
///
/// An invalid status discards `result`; it never reaches the error body.
pub fn build_result_response<T>(
    status: &Status,
    result: Option<T>,
    valid_code: u16,
    null_result_code: u16,
) -> ApiResponse<T> {
    if !status.is_valid() {
        return ApiResponse::errors(status);
    }
    let message = status.message().to_string();
    match result {
        Some(result) => ApiResponse {
            status_code: valid_code,
            body: ResponseEnvelope::MessageAndResult { message, result },
        },
        None => ApiResponse {
            status_code: null_result_code,
            body: ResponseEnvelope::MessageOnly { message },
        },
    }
}

/// `build_result_response` with the `200`/`204` defaults.
pub fn result_response<T>(status: &Status, result: Option<T>) -> ApiResponse<T> {
    build_result_response(status, result, OK_CODE, NULL_RESULT_CODE)
}

/// `201` pointing at `route_name` filled with `route_values`, echoing `dto`.
pub fn build_created_response<T>(
    status: &Status,
    route_name: impl Into<String>,
    route_values: RouteValues,
    dto: T,
) -> ApiResponse<T> {
    if !status.is_valid() {
        return ApiResponse::errors(status);
    }
    ApiResponse {
        status_code: CREATED_CODE,
        body: ResponseEnvelope::Created(CreatedAtRoute {
            route_name: route_name.into(),
            route_values,
            value: dto,
        }),
    }
}

impl<T> Outcome<T> {
    /// `result_response` over this outcome's own status and result.
    pub fn into_response(self) -> ApiResponse<T> {
        result_response(&self.status, self.result)
    }
}
