//! Business logic for creating todo items.
//!
//! # Design
//! A business action takes an input DTO and returns an `Outcome`. Input
//! validation runs first; the business rules run only on valid input, and
//! nothing is stored unless the final status is valid.

use std::future::Future;

use status_http::{Outcome, Status};
use tracing::{debug, info};

use crate::models::{CreateTodoDto, TodoItem, NAME_FIELD};
use crate::store::TodoStore;
use crate::validation::Validate;

/// A unit of business logic with its own validation and result.
pub trait BizAction<In> {
    type Out;

    fn run(&self, input: &In) -> impl Future<Output = Outcome<Self::Out>> + Send;
}

#[derive(Clone, Debug)]
pub struct CreateTodoBizLogic {
    store: TodoStore,
}

impl CreateTodoBizLogic {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }
}

impl BizAction<CreateTodoDto> for CreateTodoBizLogic {
    type Out = TodoItem;

    async fn run(&self, input: &CreateTodoDto) -> Outcome<TodoItem> {
        let mut status = Status::new();
        status.add_validation_errors(input.validate());
        if input.name.ends_with('!') {
            status.add_error("Business logic says the name cannot end with !", [NAME_FIELD]);
        }
        if !status.is_valid() {
            debug!(errors = %status.all_errors("; "), "create rejected");
            return Outcome::failed(status);
        }

        let item = self.store.insert(input.name.clone(), input.difficulty).await;
        info!(id = item.id, "todo item created");
        status.set_message(format!(
            "Successfully saved the todo item '{}'.",
            input.name
        ));
        Outcome::new(status, Some(item))
    }
}
