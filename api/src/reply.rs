//! Writes `ApiResponse` descriptors out as axum responses.
//!
//! The descriptor goes through `ApiResponse::to_http_response`, the same
//! encoding the client-side decoder reads, and is then copied into an axum
//! `Response`. An encoding failure is a server bug and becomes a bare `500`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use status_http::{ApiResponse, HttpResponse, ResponseEnvelope, RouteTable};
use tracing::{debug, error};

/// An `ApiResponse` plus the routes needed to resolve created locations.
pub struct Reply<T = ()> {
    routes: Arc<RouteTable>,
    response: ApiResponse<T>,
}

impl<T> Reply<T> {
    pub fn new(routes: Arc<RouteTable>, response: ApiResponse<T>) -> Self {
        Self { routes, response }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        if let ResponseEnvelope::Errors(errors) = &self.response.body {
            debug!(fields = ?errors.fields().collect::<Vec<_>>(), "responding with validation errors");
        }
        match self.response.to_http_response(&self.routes) {
            Ok(wire) => into_axum(wire),
            Err(err) => {
                error!(error = %err, "failed to encode response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

fn into_axum(wire: HttpResponse) -> Response {
    let Ok(status) = StatusCode::from_u16(wire.status) else {
        error!(status = wire.status, "invalid status code");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let mut builder = Response::builder().status(status);
    for (name, value) in &wire.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.body(Body::from(wire.body)).unwrap_or_else(|err| {
        error!(error = %err, "failed to build response");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}
