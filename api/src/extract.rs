//! JSON body extraction that answers through the status contract.
//!
//! A body axum cannot parse never reaches validation, so it is reported as
//! a `400` with one global error instead of axum's plain-text rejection.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use status_http::{message_response, RouteTable, Status};
use tracing::debug;

use crate::reply::Reply;

/// Drop-in for `axum::Json` in handler arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Reply;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected(&rejection)),
        }
    }
}

fn rejected(rejection: &JsonRejection) -> Reply {
    let text = rejection.body_text();
    debug!(error = %text, "request body rejected");
    let mut status = Status::new();
    status.add_global_error(text);
    Reply::new(Arc::new(RouteTable::new()), message_response(&status))
}
