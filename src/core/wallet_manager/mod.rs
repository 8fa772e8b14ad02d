//! Wallet registry and lifecycle management.
//!
//! ## Module structure
//! - `lifecycle` - create / import / delete / list wallets
//! - `wallet_id` - monotonic wallet-id allocation
//! - `signing` - key fetch + chain dispatch for transaction signing

pub mod lifecycle;
pub mod signing;
pub mod wallet_id;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::config::WalletConfig;
use crate::core::domain::Wallet;
use crate::storage::{
    CounterStore, InMemoryCounterStore, InMemorySecureStore, KeyMaterialStore, SecureStore,
};
use wallet_id::WalletIdAllocator;

/// Owns the wallet records and the only handle to raw secret material.
///
/// The registry maps wallet uuid to its record; secrets live exclusively in
/// the [`KeyMaterialStore`]. Signing operations re-fetch secrets on every
/// call; nothing is cached in process memory.
pub struct WalletManager {
    pub config: WalletConfig,

    /// Registry: uuid → wallet record.
    pub(crate) wallets: Arc<RwLock<HashMap<String, Wallet>>>,

    /// Key material (mnemonics, private keys).
    pub(crate) secrets: KeyMaterialStore,

    /// Serialized wallet-id allocation.
    pub(crate) wallet_ids: WalletIdAllocator,
}

impl WalletManager {
    /// Build a manager over explicit storage adapters.
    pub fn new(
        config: WalletConfig,
        secure_store: Arc<dyn SecureStore>,
        counter_store: Arc<dyn CounterStore>,
    ) -> Self {
        let wallet_ids = WalletIdAllocator::new(counter_store, &config.wallet_id_counter);
        Self {
            config,
            wallets: Arc::new(RwLock::new(HashMap::new())),
            secrets: KeyMaterialStore::new(secure_store),
            wallet_ids,
        }
    }

    /// Manager backed by in-memory stores (tests, development hosts).
    pub fn in_memory(config: WalletConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemorySecureStore::new()),
            Arc::new(InMemoryCounterStore::new()),
        )
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager")
            .field("wallets", &self.wallets.read().len())
            .finish_non_exhaustive()
    }
}
