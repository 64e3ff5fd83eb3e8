//! Stateless HTTP request builder and response decoder for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that decodes the `HttpResponse` into
//! a `Status` (plus result). Validation failures come back as an invalid
//! status, not as an `Err`; `Err` means the response broke the contract.

use serde::Serialize;
use serde_json::Value;

use crate::decode::{decode_http, decode_http_created, CreatedResource};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::status::{Outcome, Status};
use crate::types::{ChangeDifficulty, ChangeName, CreateTodo, Todo};

const JSON_CONTENT_TYPE: &str = "application/json";
const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}/api/todo{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        self.body_request(method, path, JSON_CONTENT_TYPE, body)
    }

    fn body_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        content_type: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(ApiError::Serialization)?;
        let mut request = self.request(method, path);
        request
            .headers
            .push(("content-type".to_string(), content_type.to_string()));
        request.body = Some(body);
        Ok(request)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "")
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/{id}"))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "", input)
    }

    pub fn build_change_name(&self, input: &ChangeName) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Patch, "/name", input)
    }

    pub fn build_change_difficulty(
        &self,
        input: &ChangeDifficulty,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Patch, "/difficulty", input)
    }

    /// `operations` is an RFC 6902 document, e.g.
    /// `[{"op": "replace", "path": "/difficulty", "value": 5}]`.
    pub fn build_patch_todo(&self, id: u64, operations: &Value) -> Result<HttpRequest, ApiError> {
        self.body_request(
            HttpMethod::Patch,
            &format!("/{id}"),
            JSON_PATCH_CONTENT_TYPE,
            operations,
        )
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/{id}"))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Outcome<Vec<Todo>>, ApiError> {
        Ok(decode_http(&response)?)
    }

    /// A missing todo decodes as a valid outcome with no result.
    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Outcome<Todo>, ApiError> {
        Ok(decode_http(&response)?)
    }

    pub fn parse_create_todo(
        &self,
        response: HttpResponse,
    ) -> Result<Outcome<CreatedResource<CreateTodo>>, ApiError> {
        Ok(decode_http_created(&response)?)
    }

    pub fn parse_change_name(&self, response: HttpResponse) -> Result<Status, ApiError> {
        parse_message(&response)
    }

    pub fn parse_change_difficulty(&self, response: HttpResponse) -> Result<Status, ApiError> {
        parse_message(&response)
    }

    pub fn parse_patch_todo(&self, response: HttpResponse) -> Result<Status, ApiError> {
        parse_message(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Status, ApiError> {
        parse_message(&response)
    }
}

fn parse_message(response: &HttpResponse) -> Result<Status, ApiError> {
    let outcome = decode_http::<Value>(response)?;
    Ok(outcome.status)
}
