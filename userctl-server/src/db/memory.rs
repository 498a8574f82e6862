//! In-memory user store
//!
//! Mirrors the Postgres table: serial ids starting at 1 and a unique name
//! column. Used by the router tests and by `userctl serve --in-memory`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::store::{StoreError, UserStore};
use crate::models::User;

#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Table>,
}

#[derive(Default)]
struct Table {
    last_id: i32,
    // name -> id
    rows: HashMap<String, i32>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, name: &str) -> Result<(), StoreError> {
        let mut table = self.inner.lock().await;
        if table.rows.contains_key(name) {
            return Err(StoreError::UniqueViolation(name.to_owned()));
        }
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(name.to_owned(), id);
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        let table = self.inner.lock().await;
        Ok(table.rows.get(name).map(|&id| User {
            id,
            name: name.to_owned(),
        }))
    }

    async fn rename(&self, old: &str, new: &str) -> Result<u64, StoreError> {
        let mut table = self.inner.lock().await;
        if !table.rows.contains_key(old) {
            return Ok(0);
        }
        if old == new {
            return Ok(1);
        }
        if table.rows.contains_key(new) {
            return Err(StoreError::UniqueViolation(new.to_owned()));
        }
        match table.rows.remove(old) {
            Some(id) => {
                table.rows.insert(new.to_owned(), id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, name: &str) -> Result<u64, StoreError> {
        let mut table = self.inner.lock().await;
        Ok(table.rows.remove(name).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_serial_and_stable() {
        let store = MemoryUserStore::new();
        store.insert("alice").await.unwrap();
        store.insert("bob").await.unwrap();

        assert_eq!(store.find_by_name("alice").await.unwrap().unwrap().id, 1);
        assert_eq!(store.find_by_name("bob").await.unwrap().unwrap().id, 2);

        store.delete("alice").await.unwrap();
        store.insert("carol").await.unwrap();
        assert_eq!(store.find_by_name("carol").await.unwrap().unwrap().id, 3);
    }

    #[tokio::test]
    async fn duplicate_insert_fails() {
        let store = MemoryUserStore::new();
        store.insert("alice").await.unwrap();

        let err = store.insert("alice").await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(ref n) if n == "alice"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn rename_keeps_id() {
        let store = MemoryUserStore::new();
        store.insert("alice").await.unwrap();

        assert_eq!(store.rename("alice", "alicia").await.unwrap(), 1);
        assert!(store.find_by_name("alice").await.unwrap().is_none());
        assert_eq!(store.find_by_name("alicia").await.unwrap().unwrap().id, 1);
    }

    #[tokio::test]
    async fn rename_onto_taken_name_fails() {
        let store = MemoryUserStore::new();
        store.insert("alice").await.unwrap();
        store.insert("bob").await.unwrap();

        let err = store.rename("alice", "bob").await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
        assert!(store.find_by_name("alice").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn missing_rows_affect_nothing() {
        let store = MemoryUserStore::new();
        assert_eq!(store.rename("ghost", "spirit").await.unwrap(), 0);
        assert_eq!(store.delete("ghost").await.unwrap(), 0);
        assert!(store.is_empty().await);
    }
}
