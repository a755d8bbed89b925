//! Key-Value Store Port (Driven Port)
//!
//! Small string store for values the host remembers between sessions.

use std::sync::Arc;

use thiserror::Error;

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Store rejected the operation.
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Port for a synchronous string key-value store.
pub trait KeyValueStorePort: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStorePort + ?Sized> KeyValueStorePort for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStorePort + ?Sized> KeyValueStorePort for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        assert_eq!(
            StoreError::Unavailable("locked".into()).to_string(),
            "Store unavailable: locked"
        );
        assert!(StoreError::Backend("disk full".into()).to_string().contains("disk full"));
    }
}
