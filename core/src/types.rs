//! DTOs for the todo API.
//!
//! # Design
//! These mirror the service's schema but are defined independently so the
//! client does not depend on the server crate. The live-server tests in the
//! `todo-api` crate catch any drift between the two.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub name: String,
    pub difficulty: i32,
}

/// Payload for creating a todo. The server echoes it back with `id` set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub difficulty: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeName {
    pub id: u64,
    pub name: String,
}

/// Difficulty runs from 1 (easy) to 5 (hard).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeDifficulty {
    pub id: u64,
    pub difficulty: i32,
}
