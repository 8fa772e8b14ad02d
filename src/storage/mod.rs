//! Storage boundaries consumed by the wallet core.
//!
//! The real secure store is the device enclave (unlock-gated, device-bound
//! key-value storage); the real counter store is the shell's key-value
//! storage. Both are consumed through the traits below. In-memory
//! implementations back tests and hosts without an enclave.

use crate::core::errors::WalletError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

mod secrets;
pub use secrets::{KeyMaterialStore, SecretId};

/// Device-level encrypted key-value storage for secrets.
///
/// `remove` of an absent key must succeed; errors are reserved for
/// adapter-level failures (locked device, storage full).
#[async_trait]
pub trait SecureStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<(), WalletError>;
    async fn get(&self, key: &str) -> Result<Option<String>, WalletError>;
    async fn remove(&self, key: &str) -> Result<(), WalletError>;
}

/// Persisted named counters (wallet-id allocation).
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<u64>, WalletError>;
    async fn set(&self, name: &str, value: u64) -> Result<(), WalletError>;
}

/// Process-local secure store. No encryption at rest; only suitable for
/// tests and development hosts.
#[derive(Debug, Default)]
pub struct InMemorySecureStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySecureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored secrets. Test hook.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl SecureStore for InMemorySecureStore {
    async fn set(&self, key: &str, value: &str) -> Result<(), WalletError> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, WalletError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), WalletError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Process-local counter store.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    counters: RwLock<HashMap<String, u64>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn get(&self, name: &str) -> Result<Option<u64>, WalletError> {
        Ok(self.counters.read().get(name).copied())
    }

    async fn set(&self, name: &str, value: u64) -> Result<(), WalletError> {
        self.counters.write().insert(name.to_string(), value);
        Ok(())
    }
}
