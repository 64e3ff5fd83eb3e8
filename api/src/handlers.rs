//! Todo endpoints under `/api/todo`.
//!
//! Handlers only call a service and hand its status to a response builder;
//! the status decides the HTTP code.

use axum::extract::{Path, State};
use json_patch::Patch;
use status_http::{build_created_response, message_response, RouteValues};

use crate::biz::BizAction;
use crate::extract::JsonBody;
use crate::models::{ChangeDifficultyDto, ChangeNameDto, CreateTodoDto, TodoItem};
use crate::reply::Reply;
use crate::state::{AppState, GET_SINGLE_TODO};

pub async fn list_todos(State(state): State<AppState>) -> Reply<Vec<TodoItem>> {
    let outcome = state.crud.read_many().await;
    state.reply(outcome.into_response())
}

/// `200` with the item, or `204` when no item has that id.
pub async fn get_todo(State(state): State<AppState>, Path(id): Path<u64>) -> Reply<TodoItem> {
    let outcome = state.crud.read_single(id).await;
    state.reply(outcome.into_response())
}

/// `201` pointing at `GetSingleTodo`, echoing the dto with its new id.
pub async fn create_todo(
    State(state): State<AppState>,
    JsonBody(mut dto): JsonBody<CreateTodoDto>,
) -> Reply<CreateTodoDto> {
    let outcome = state.create.run(&dto).await;
    let mut route_values = RouteValues::new();
    if let Some(item) = &outcome.result {
        dto.id = item.id;
        route_values.insert("id", item.id);
    }
    state.reply(build_created_response(
        &outcome.status,
        GET_SINGLE_TODO,
        route_values,
        dto,
    ))
}

pub async fn change_name(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<ChangeNameDto>,
) -> Reply {
    let status = state.crud.update_name(&dto).await;
    state.reply(message_response(&status))
}

pub async fn change_difficulty(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<ChangeDifficultyDto>,
) -> Reply {
    let status = state.crud.update_difficulty(&dto).await;
    state.reply(message_response(&status))
}

/// JSON Patch (RFC 6902) against the item with `id`.
pub async fn patch_todo(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(patch): JsonBody<Patch>,
) -> Reply {
    let status = state.crud.patch(id, &patch).await;
    state.reply(message_response(&status))
}

pub async fn delete_todo(State(state): State<AppState>, Path(id): Path<u64>) -> Reply {
    let status = state.crud.delete(id).await;
    state.reply(message_response(&status))
}
