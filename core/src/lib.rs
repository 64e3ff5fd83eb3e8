//! Status-to-HTTP response mapping for CRUD and business-logic endpoints.
//!
//! # Overview
//! An operation reports its outcome as a [`Status`]: valid or not, a
//! message, and an ordered list of [`ValidationError`]s. The
//! [`response`] builders turn that into an HTTP status code and one of four
//! JSON body shapes; the [`decode`] functions turn such a response back
//! into a `Status` so tests and clients can assert on outcomes without
//! caring about the wire format.
//!
//! # Design
//! - Everything here is pure and I/O free. Builders and decoders hold no
//!   state and are safe to call from any thread.
//! - `TodoClient` follows the host-does-IO pattern: it builds
//!   [`HttpRequest`] values and decodes [`HttpResponse`] values; the caller
//!   performs the round-trip.

pub mod client;
pub mod decode;
pub mod error;
pub mod http;
pub mod response;
pub mod routes;
pub mod status;
pub mod types;

pub use client::TodoClient;
pub use decode::{
    decode_created_response, decode_http, decode_http_created, decode_response, CreatedResource,
};
pub use error::{ApiError, DecodeError, EncodeError, RouteError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{
    build_created_response, build_message_response, build_result_response,
    group_errors_by_field, message_response, result_response, ApiResponse, CreatedAtRoute,
    FieldErrors, ResponseEnvelope, CREATED_CODE, ERRORS_CODE, NULL_RESULT_CODE, OK_CODE,
};
pub use routes::{RouteTable, RouteValues};
pub use status::{Outcome, Status, ValidationError, DEFAULT_SUCCESS_MESSAGE};
pub use types::{ChangeDifficulty, ChangeName, CreateTodo, Todo};
