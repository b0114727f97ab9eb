//! Best-effort key-value persistence
//!
//! Features:
//! - `KeyValueStore` trait over string keys and values
//! - Primary store plus a fallback store for the high score
//! - JSON helpers for typed records
//! - LocalStorage and cookie backends on wasm32
//!
//! Nothing in the game treats a storage failure as fatal; callers log and
//! carry on with defaults.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Errors from a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend cannot be reached at all (no window, storage disabled, ...)
    #[error("storage unavailable")]
    Unavailable,

    /// Backend rejected the operation
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Stored value could not be decoded
    #[error("corrupt record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-process store; used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The primary store and the fallback consulted when it is empty or broken
#[derive(Clone)]
pub struct Stores {
    pub primary: Rc<dyn KeyValueStore>,
    pub fallback: Rc<dyn KeyValueStore>,
}

impl Stores {
    pub fn new(primary: Rc<dyn KeyValueStore>, fallback: Rc<dyn KeyValueStore>) -> Self {
        Self { primary, fallback }
    }

    /// Two independent in-memory stores
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()), Rc::new(MemoryStore::new()))
    }

    /// LocalStorage backed by cookies
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(Rc::new(web::LocalStorage), Rc::new(web::CookieStore::default()))
    }
}

/// Read and decode a JSON record
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> StorageResult<Option<T>> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON record
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> StorageResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        value: u32,
    }

    #[test]
    fn test_json_round_trip_and_missing() {
        let store = MemoryStore::new();
        assert!(load_json::<Record>(&store, "k").unwrap().is_none());
        save_json(&store, "k", &Record { value: 7 }).unwrap();
        assert_eq!(load_json::<Record>(&store, "k").unwrap(), Some(Record { value: 7 }));
    }

    #[test]
    fn test_corrupt_record() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        let err = load_json::<Record>(&store, "k").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
        assert!(err.to_string().starts_with("corrupt record"));
    }

    #[test]
    fn test_broken_store_errors() {
        let store = testing::BrokenStore;
        assert!(matches!(
            load_json::<Record>(&store, "k"),
            Err(StorageError::Unavailable)
        ));
        assert!(save_json(&store, "k", &Record { value: 1 }).is_err());
    }
}
