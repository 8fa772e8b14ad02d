//! Monotonic wallet-id allocation.
//!
//! The read-increment-persist sequence runs under a mutex so two in-flight
//! allocations can never observe the same counter value. Ids are strictly
//! increasing across the life of the counter store, starting at 1.

use crate::core::errors::WalletError;
use crate::storage::CounterStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub struct WalletIdAllocator {
    counters: Arc<dyn CounterStore>,
    counter_name: String,
    /// Guards the read-increment-persist critical section.
    lock: Mutex<()>,
}

impl WalletIdAllocator {
    pub fn new(counters: Arc<dyn CounterStore>, counter_name: &str) -> Self {
        Self {
            counters,
            counter_name: counter_name.to_string(),
            lock: Mutex::new(()),
        }
    }

    /// Allocate the next wallet id. Linearizable: concurrent callers queue
    /// behind the mutex and each sees a fresh counter value.
    pub async fn next(&self) -> Result<u64, WalletError> {
        let _guard = self.lock.lock().await;

        let current = self
            .counters
            .get(&self.counter_name)
            .await
            .map_err(|e| WalletError::CounterPersistence(e.to_string()))?
            .unwrap_or(0);
        let next = current + 1;

        self.counters
            .set(&self.counter_name, next)
            .await
            .map_err(|e| WalletError::CounterPersistence(e.to_string()))?;

        debug!(wallet_id = next, "Allocated wallet id");
        Ok(next)
    }
}

impl std::fmt::Debug for WalletIdAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletIdAllocator")
            .field("counter_name", &self.counter_name)
            .finish_non_exhaustive()
    }
}
