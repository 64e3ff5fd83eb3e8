//! Error types for the status/response layer and the todo API client.
//!
//! # Design
//! Validation failures are never represented here; they live inside a
//! `Status`. These enums cover contract mismatches between the builder and
//! the decoder, route resolution, wire encoding and client payload
//! serialization. All of them indicate a programmer error rather than bad
//! user input.

use thiserror::Error;

/// A response did not match any shape the builder produces.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The status code and body shape disagree, or the body is not one of
    /// the documented envelopes.
    #[error("unexpected response shape for HTTP {status}: {reason}")]
    UnexpectedShape { status: u16, reason: String },

    /// The status code is not one this decode operation handles.
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A created response arrived without a `location` header.
    #[error("created response is missing the location header")]
    MissingLocation,

    /// The body is not valid JSON, or does not fit the expected result type.
    #[error("response body could not be decoded: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    pub(crate) fn shape(status: u16, reason: impl Into<String>) -> Self {
        DecodeError::UnexpectedShape {
            status,
            reason: reason.into(),
        }
    }
}

/// A named route could not be turned into a URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route named {0}")]
    UnknownRoute(String),

    #[error("no route matches the supplied values: {route} needs {parameter}")]
    MissingValue { route: String, parameter: String },

    #[error("route template for {0} has an unclosed parameter")]
    MalformedTemplate(String),
}

/// An `ApiResponse` could not be written to the wire.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("response body could not be serialized: {0}")]
    Json(#[from] serde_json::Error),

    /// A result or created value was given a code that sends no body.
    #[error("HTTP {status} sends no body but the response carries a value")]
    BodyDropped { status: u16 },
}

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server's response did not decode into a status.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
