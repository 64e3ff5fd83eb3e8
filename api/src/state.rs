//! Services and routes shared by every handler.

use std::sync::Arc;

use status_http::{ApiResponse, RouteTable};

use crate::biz::CreateTodoBizLogic;
use crate::crud::TodoCrud;
use crate::reply::Reply;
use crate::store::TodoStore;

/// Name of the route that reads a single todo back; created responses
/// point at it.
pub const GET_SINGLE_TODO: &str = "GetSingleTodo";

pub fn route_table() -> RouteTable {
    RouteTable::new().with_route(GET_SINGLE_TODO, "/api/todo/{id}")
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub crud: TodoCrud,
    pub create: CreateTodoBizLogic,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    pub fn new(store: TodoStore) -> Self {
        Self {
            crud: TodoCrud::new(store.clone()),
            create: CreateTodoBizLogic::new(store),
            routes: Arc::new(route_table()),
        }
    }

    pub fn reply<T>(&self, response: ApiResponse<T>) -> Reply<T> {
        Reply::new(Arc::clone(&self.routes), response)
    }
}
