//! In-memory todo storage shared by every request.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::TodoItem;

/// The six items a fresh development server starts with.
const EXAMPLE_TODOS: [(&str, i32); 6] = [
    ("Create ASP.NET Core API project", 1),
    ("Create simple EF Core database", 1),
    ("Add EfCore.GenericServices to web app", 1),
    ("Create a example WebAPI controller", 3),
    ("Write unit tests", 2),
    ("Add Swagger for manual testing", 2),
];

#[derive(Debug, Default)]
struct Inner {
    items: BTreeMap<u64, TodoItem>,
    last_id: u64,
}

/// Cheaply cloneable handle; clones share the same items.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Clone, Debug, Default)]
pub struct TodoStore {
    inner: Arc<RwLock<Inner>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the example items with ids 1 to 6.
    pub async fn seeded() -> Self {
        let store = Self::new();
        for (name, difficulty) in EXAMPLE_TODOS {
            store.insert(name.to_string(), difficulty).await;
        }
        store
    }

    /// All items in id order.
    pub async fn list(&self) -> Vec<TodoItem> {
        self.inner.read().await.items.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Option<TodoItem> {
        self.inner.read().await.items.get(&id).cloned()
    }

    /// Store a new item under the next id and return it.
    pub async fn insert(&self, name: String, difficulty: i32) -> TodoItem {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let item = TodoItem {
            id: inner.last_id,
            name,
            difficulty,
        };
        inner.items.insert(item.id, item.clone());
        item
    }

    /// Replace an existing item. Returns `false` when `item.id` is unknown.
    pub async fn replace(&self, item: TodoItem) -> bool {
        let mut inner = self.inner.write().await;
        match inner.items.get_mut(&item.id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: u64) -> Option<TodoItem> {
        self.inner.write().await.items.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_has_six_items_in_id_order() {
        let store = TodoStore::seeded().await;
        let items = store.list().await;
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[3].name, "Create a example WebAPI controller");
        assert_eq!(items[3].difficulty, 3);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let store = TodoStore::new();
        let first = store.insert("a".to_string(), 1).await;
        store.remove(first.id).await;
        let second = store.insert("b".to_string(), 1).await;
        assert_eq!(second.id, first.id + 1);
        assert!(store.get(first.id).await.is_none());
    }

    #[tokio::test]
    async fn replace_unknown_item_is_refused() {
        let store = TodoStore::new();
        let ghost = TodoItem {
            id: 42,
            name: "ghost".to_string(),
            difficulty: 1,
        };
        assert!(!store.replace(ghost).await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_items() {
        let store = TodoStore::new();
        let other = store.clone();
        store.insert("shared".to_string(), 2).await;
        assert_eq!(other.len().await, 1);
    }
}
