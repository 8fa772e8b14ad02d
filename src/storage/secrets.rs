//! Key-material addressing and lifecycle on top of the secure store.
//!
//! The storage-key contract is fixed: mnemonics live under
//! `wallet_{uuid}`, private keys under `address_{address}_type_{chain}`.
//! Keys are only ever built through [`SecretId::storage_key`], so a
//! collision can only come from a duplicated identity, not a typo at a
//! call site.

use crate::core::domain::Chain;
use crate::core::errors::WalletError;
use crate::storage::SecureStore;
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// Logical identity of a stored secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretId<'a> {
    /// The mnemonic backing an HD wallet.
    Mnemonic { wallet_uuid: &'a str },
    /// A single chain-specific private key.
    PrivateKey { address: &'a str, chain: Chain },
}

impl SecretId<'_> {
    /// Deterministic, globally unique storage key for this identity.
    pub fn storage_key(&self) -> String {
        match self {
            SecretId::Mnemonic { wallet_uuid } => format!("wallet_{}", wallet_uuid),
            SecretId::PrivateKey { address, chain } => {
                format!("address_{}_type_{}", address, chain.tag())
            }
        }
    }
}

/// Sole owner of raw secret bytes in the process.
///
/// No other component holds private key material beyond the scope of a
/// single signing call, and nothing is cached: every fetch goes back to the
/// adapter.
#[derive(Clone)]
pub struct KeyMaterialStore {
    store: Arc<dyn SecureStore>,
}

impl KeyMaterialStore {
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self { store }
    }

    /// Persist a secret under its identity's storage key.
    pub async fn store_secret(&self, id: SecretId<'_>, value: &str) -> Result<(), WalletError> {
        let key = id.storage_key();
        debug!(key = %key, "Storing secret");
        self.store.set(&key, value).await
    }

    /// Fetch a secret; absent entries are `SecretNotFound`. The returned
    /// buffer is wiped on drop.
    pub async fn fetch_secret(&self, id: SecretId<'_>) -> Result<Zeroizing<String>, WalletError> {
        let key = id.storage_key();
        self.store
            .get(&key)
            .await?
            .map(Zeroizing::new)
            .ok_or_else(|| WalletError::SecretNotFound(format!("no entry under '{}'", key)))
    }

    /// Delete a secret. Idempotent: an already-absent entry is Ok.
    pub async fn delete_secret(&self, id: SecretId<'_>) -> Result<(), WalletError> {
        let key = id.storage_key();
        debug!(key = %key, "Deleting secret");
        self.store.remove(&key).await
    }
}

impl std::fmt::Debug for KeyMaterialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterialStore").finish_non_exhaustive()
    }
}
