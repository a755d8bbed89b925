//! Remembered metal contract size for the risk calculator.

use tracing::warn;

use crate::application::ports::{KeyValueStorePort, StoreError};

/// Store key for the last metal contract size.
pub const METAL_CONTRACT_SIZE_KEY: &str = "risk_calc.metal_contract_size";

/// Remembers the last contract-size override the trader used for metals.
///
/// Reads are explicit calls on an injected store; nothing is cached here.
#[derive(Debug, Clone)]
pub struct ContractSizeMemory<S> {
    store: S,
}

impl<S: KeyValueStorePort> ContractSizeMemory<S> {
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Last remembered contract size.
    ///
    /// Stored values that are not positive finite numbers read back as
    /// `None`.
    pub fn load(&self) -> Result<Option<f64>, StoreError> {
        let Some(raw) = self.store.get(METAL_CONTRACT_SIZE_KEY)? else {
            return Ok(None);
        };
        let parsed = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0);
        if parsed.is_none() {
            warn!(value = %raw, "ignoring unusable remembered contract size");
        }
        Ok(parsed)
    }

    /// Remember `size`. Non-positive or non-finite sizes are not stored
    /// and return `false`.
    pub fn remember(&self, size: f64) -> Result<bool, StoreError> {
        if !size.is_finite() || size <= 0.0 {
            return Ok(false);
        }
        self.store.set(METAL_CONTRACT_SIZE_KEY, &size.to_string())?;
        Ok(true)
    }

    /// The wrapped store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryKeyValueStore;

    #[test]
    fn remembers_and_loads() {
        let memory = ContractSizeMemory::new(InMemoryKeyValueStore::new());
        assert_eq!(memory.load().unwrap(), None);

        assert!(memory.remember(10.0).unwrap());
        assert_eq!(memory.load().unwrap(), Some(10.0));
        assert_eq!(
            memory.store().get(METAL_CONTRACT_SIZE_KEY).unwrap().as_deref(),
            Some("10")
        );
    }

    #[test]
    fn rejects_unusable_sizes() {
        let memory = ContractSizeMemory::new(InMemoryKeyValueStore::new());
        assert!(!memory.remember(0.0).unwrap());
        assert!(!memory.remember(f64::NAN).unwrap());
        assert!(memory.store().is_empty());
    }

    #[test]
    fn garbage_in_store_reads_as_none() {
        let store = InMemoryKeyValueStore::new();
        store.set(METAL_CONTRACT_SIZE_KEY, "lots").unwrap();
        assert_eq!(ContractSizeMemory::new(&store).load().unwrap(), None);

        store.set(METAL_CONTRACT_SIZE_KEY, "-5").unwrap();
        assert_eq!(ContractSizeMemory::new(&store).load().unwrap(), None);
    }

    struct FailingStore;

    impl KeyValueStorePort for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("read-only".into()))
        }
    }

    #[test]
    fn store_errors_propagate() {
        let memory = ContractSizeMemory::new(FailingStore);
        assert!(matches!(memory.load(), Err(StoreError::Unavailable(_))));
        assert!(matches!(memory.remember(5.0), Err(StoreError::Backend(_))));
    }
}
