//! Wallet lifecycle: creation, import, deletion, listing.

use super::WalletManager;
use crate::blockchain::{evm, solana};
use crate::core::domain::{AddressEntry, BackupStatus, Chain, Wallet, WalletSource, WalletType};
use crate::core::errors::WalletError;
use crate::crypto::mnemonic;
use crate::storage::SecretId;
use tracing::{info, warn};
use uuid::Uuid;

impl WalletManager {
    /// Create a new HD wallet: fresh mnemonic, EVM + Solana keypairs at
    /// index 0, all secrets persisted, a freshly allocated wallet id.
    ///
    /// # Errors
    /// * `WalletError::EntropySource` - mnemonic generation failed
    /// * `WalletError::Derivation` - keypair derivation failed
    /// * `WalletError::SecureStorage` - a secret write failed (any secrets
    ///   already written for this wallet are removed again)
    pub async fn create_wallet(&self) -> Result<Wallet, WalletError> {
        let phrase = mnemonic::generate_mnemonic()?.to_string();
        let (uuid, address_list) = self.persist_hd_secrets(&phrase).await?;
        let wallet_id = self.wallet_ids.next().await?;

        let wallet = Wallet {
            uuid: uuid.clone(),
            address_list,
            wallet_type: WalletType::Hd,
            source: WalletSource::Created,
            avatar: 1,
            name: format!("Wallet {}", wallet_id),
            status: BackupStatus::NotBackedUp,
            balance: 0.0,
            wallet_id,
        };

        self.wallets.write().insert(uuid.clone(), wallet.clone());
        info!(uuid = %uuid, wallet_id, "Created HD wallet");
        Ok(wallet)
    }

    /// Import an HD wallet from an existing mnemonic phrase.
    ///
    /// # Errors
    /// * `WalletError::InvalidMnemonic` - malformed phrase; no secrets are
    ///   written
    pub async fn import_wallet_by_mnemonic(&self, phrase: &str) -> Result<Wallet, WalletError> {
        // Validate before any storage side effects.
        mnemonic::parse_mnemonic(phrase)?;

        let (uuid, address_list) = self.persist_hd_secrets(phrase).await?;
        let wallet_id = self.wallet_ids.next().await?;

        let wallet = Wallet {
            uuid: uuid.clone(),
            address_list,
            wallet_type: WalletType::Hd,
            source: WalletSource::Imported,
            avatar: 1,
            name: format!("Wallet {}", wallet_id),
            status: BackupStatus::Imported,
            balance: 0.0,
            wallet_id,
        };

        self.wallets.write().insert(uuid.clone(), wallet.clone());
        info!(uuid = %uuid, wallet_id, "Imported wallet from mnemonic");
        Ok(wallet)
    }

    /// Import a single-key wallet from a raw private key.
    ///
    /// EVM keys are 32-byte hex (optional `0x`); Solana keys are base58
    /// 64-byte secret keys.
    ///
    /// # Errors
    /// * `WalletError::InvalidPrivateKey` - wrong length or encoding for the
    ///   stated chain
    pub async fn import_wallet_by_private_key(
        &self,
        private_key: &str,
        chain: Chain,
    ) -> Result<Wallet, WalletError> {
        let address = match chain {
            Chain::Evm => evm::address_from_private_key(private_key)?,
            Chain::Solana => solana::address_from_private_key(private_key)?,
        };

        self.secrets
            .store_secret(SecretId::PrivateKey { address: &address, chain }, private_key)
            .await?;

        let uuid = Uuid::new_v4().to_string();
        let wallet_id = self.wallet_ids.next().await?;

        let wallet = Wallet {
            uuid: uuid.clone(),
            address_list: vec![AddressEntry { chain, address }],
            wallet_type: WalletType::PrivateKey,
            source: WalletSource::Imported,
            avatar: 1,
            name: format!("Wallet {}", wallet_id),
            status: BackupStatus::Imported,
            balance: 0.0,
            wallet_id,
        };

        self.wallets.write().insert(uuid.clone(), wallet.clone());
        info!(uuid = %uuid, wallet_id, chain = %chain, "Imported wallet from private key");
        Ok(wallet)
    }

    /// Delete a wallet and every secret it owns, returning the updated list.
    ///
    /// Deleting an unknown uuid is a no-op on the registry; secret removal
    /// tolerates "already absent" throughout, so the operation is
    /// idempotent. The registry record is dropped only after every secret
    /// deletion succeeded, so a failed delete remains retryable.
    pub async fn delete_wallet(&self, uuid: &str) -> Result<Vec<Wallet>, WalletError> {
        let record = self.wallets.read().get(uuid).cloned();

        // Secrets go first. The registry record keeps the address list, so
        // it must outlive secret deletion: if the adapter fails mid-way a
        // retry can still reach every remaining key.
        self.secrets
            .delete_secret(SecretId::Mnemonic { wallet_uuid: uuid })
            .await?;

        if let Some(wallet) = &record {
            for entry in &wallet.address_list {
                self.secrets
                    .delete_secret(SecretId::PrivateKey {
                        address: &entry.address,
                        chain: entry.chain,
                    })
                    .await?;
            }
            self.wallets.write().remove(uuid);
            info!(uuid = %uuid, "Deleted wallet and its secrets");
        } else {
            // Unknown uuid: the mnemonic delete above still ran, covering
            // entries left behind by an interrupted creation.
            info!(uuid = %uuid, "Delete requested for unknown wallet uuid");
        }

        Ok(self.list_wallets())
    }

    /// Snapshot of all registered wallets, ordered by wallet id.
    pub fn list_wallets(&self) -> Vec<Wallet> {
        let mut wallets: Vec<Wallet> = self.wallets.read().values().cloned().collect();
        wallets.sort_by_key(|w| w.wallet_id);
        wallets
    }

    /// Derive both chain keypairs at index 0 and persist the mnemonic plus
    /// both private keys. On a failed write, already-written secrets for
    /// this wallet are best-effort removed before the error propagates.
    async fn persist_hd_secrets(
        &self,
        phrase: &str,
    ) -> Result<(String, Vec<AddressEntry>), WalletError> {
        let seed = mnemonic::seed_from_mnemonic(phrase)?;
        let evm_keypair = evm::derive_keypair(seed.as_ref(), 0)?;
        let solana_keypair = solana::derive_keypair(seed.as_ref(), 0)?;

        let uuid = Uuid::new_v4().to_string();
        let address_list = vec![
            AddressEntry { chain: Chain::Evm, address: evm_keypair.address.clone() },
            AddressEntry { chain: Chain::Solana, address: solana_keypair.address.clone() },
        ];

        let writes: [(SecretId<'_>, &str); 3] = [
            (SecretId::Mnemonic { wallet_uuid: &uuid }, phrase),
            (
                SecretId::PrivateKey { address: &evm_keypair.address, chain: Chain::Evm },
                evm_keypair.private_key_hex.as_str(),
            ),
            (
                SecretId::PrivateKey { address: &solana_keypair.address, chain: Chain::Solana },
                solana_keypair.private_key_bs58.as_str(),
            ),
        ];

        for (position, (id, value)) in writes.iter().enumerate() {
            if let Err(write_err) = self.secrets.store_secret(*id, value).await {
                // Compensating cleanup: a partially created wallet must not
                // leave orphaned secrets behind.
                for (id, _) in &writes[..position] {
                    if let Err(cleanup_err) = self.secrets.delete_secret(*id).await {
                        warn!(error = %cleanup_err, "Cleanup of partial wallet secrets failed");
                    }
                }
                return Err(write_err);
            }
        }

        Ok((uuid, address_list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WalletConfig;
    use crate::storage::{InMemoryCounterStore, InMemorySecureStore, SecureStore};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn manager() -> WalletManager {
        WalletManager::in_memory(WalletConfig::default())
    }

    /// Secure store that rejects writes once a budget of successful `set`
    /// calls is spent, and can reject removes of keys containing a fragment.
    struct FaultyStore {
        inner: InMemorySecureStore,
        sets_allowed: AtomicUsize,
        removals_blocked_for: Mutex<Option<&'static str>>,
    }

    impl FaultyStore {
        fn with_set_budget(sets_allowed: usize) -> Arc<Self> {
            Arc::new(Self {
                inner: InMemorySecureStore::new(),
                sets_allowed: AtomicUsize::new(sets_allowed),
                removals_blocked_for: Mutex::new(None),
            })
        }

        fn block_removals_of(&self, fragment: &'static str) {
            *self.removals_blocked_for.lock() = Some(fragment);
        }

        fn unblock_removals(&self) {
            *self.removals_blocked_for.lock() = None;
        }
    }

    #[async_trait]
    impl SecureStore for FaultyStore {
        async fn set(&self, key: &str, value: &str) -> Result<(), WalletError> {
            if self.sets_allowed.load(Ordering::SeqCst) == 0 {
                return Err(WalletError::SecureStorage("write rejected".into()));
            }
            self.sets_allowed.fetch_sub(1, Ordering::SeqCst);
            self.inner.set(key, value).await
        }

        async fn get(&self, key: &str) -> Result<Option<String>, WalletError> {
            self.inner.get(key).await
        }

        async fn remove(&self, key: &str) -> Result<(), WalletError> {
            if let Some(fragment) = *self.removals_blocked_for.lock() {
                if key.contains(fragment) {
                    return Err(WalletError::SecureStorage("remove rejected".into()));
                }
            }
            self.inner.remove(key).await
        }
    }

    fn manager_over(store: Arc<FaultyStore>) -> WalletManager {
        WalletManager::new(
            WalletConfig::default(),
            store as Arc<dyn SecureStore>,
            Arc::new(InMemoryCounterStore::new()),
        )
    }

    #[tokio::test]
    async fn create_wallet_registers_both_chains() {
        let manager = manager();
        let wallet = manager.create_wallet().await.unwrap();

        assert_eq!(wallet.wallet_type, WalletType::Hd);
        assert_eq!(wallet.source, WalletSource::Created);
        assert_eq!(wallet.status, BackupStatus::NotBackedUp);
        assert_eq!(wallet.name, "Wallet 1");
        assert!(wallet.address_for(Chain::Evm).unwrap().starts_with("0x"));
        assert!(wallet.address_for(Chain::Solana).is_some());

        // Mnemonic plus both private keys are retrievable.
        manager
            .secrets
            .fetch_secret(SecretId::Mnemonic { wallet_uuid: &wallet.uuid })
            .await
            .unwrap();
        for entry in &wallet.address_list {
            manager
                .secrets
                .fetch_secret(SecretId::PrivateKey {
                    address: &entry.address,
                    chain: entry.chain,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn import_by_mnemonic_reproduces_addresses() {
        let manager = manager();
        let phrase = mnemonic::generate_mnemonic().unwrap().to_string();

        let first = manager.import_wallet_by_mnemonic(&phrase).await.unwrap();
        let second = manager.import_wallet_by_mnemonic(&phrase).await.unwrap();

        assert_eq!(first.address_for(Chain::Evm), second.address_for(Chain::Evm));
        assert_eq!(first.address_for(Chain::Solana), second.address_for(Chain::Solana));
        assert_eq!(first.status, BackupStatus::Imported);
        assert_eq!(first.source, WalletSource::Imported);
    }

    #[tokio::test]
    async fn malformed_mnemonic_writes_nothing() {
        let manager = manager();
        let err = manager
            .import_wallet_by_mnemonic("answer gown deal parent december")
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::InvalidMnemonic(_)));
        assert!(manager.list_wallets().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_only_owned_secrets() {
        let manager = manager();
        let victim = manager.create_wallet().await.unwrap();
        let survivor = manager.create_wallet().await.unwrap();

        let remaining = manager.delete_wallet(&victim.uuid).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].uuid, survivor.uuid);

        // Victim's secrets are gone.
        let err = manager
            .secrets
            .fetch_secret(SecretId::Mnemonic { wallet_uuid: &victim.uuid })
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::SecretNotFound(_)));

        // Survivor's secrets are untouched.
        manager
            .secrets
            .fetch_secret(SecretId::Mnemonic { wallet_uuid: &survivor.uuid })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_unknown_uuid_is_a_no_op() {
        let manager = manager();
        let wallet = manager.create_wallet().await.unwrap();

        let list = manager.delete_wallet("never-created").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].uuid, wallet.uuid);

        // Second delete of the same unknown uuid also succeeds.
        manager.delete_wallet("never-created").await.unwrap();
    }

    #[tokio::test]
    async fn failed_secret_write_rolls_back_earlier_writes() {
        // Budget of two: mnemonic and EVM key writes succeed, the Solana
        // key write fails.
        let store = FaultyStore::with_set_budget(2);
        let manager = manager_over(Arc::clone(&store));

        let err = manager.create_wallet().await.unwrap_err();
        assert!(matches!(err, WalletError::SecureStorage(_)));
        assert!(manager.list_wallets().is_empty());

        // The two secrets that had been written were removed again.
        assert!(store.inner.is_empty());
    }

    #[tokio::test]
    async fn failed_secret_removal_keeps_wallet_retryable() {
        let store = FaultyStore::with_set_budget(usize::MAX);
        let manager = manager_over(Arc::clone(&store));
        let wallet = manager.create_wallet().await.unwrap();

        store.block_removals_of("_type_EVM");
        let err = manager.delete_wallet(&wallet.uuid).await.unwrap_err();
        assert!(matches!(err, WalletError::SecureStorage(_)));

        // The record must survive a failed delete; its address list is the
        // only route back to the remaining secrets.
        assert_eq!(manager.list_wallets().len(), 1);

        store.unblock_removals();
        let remaining = manager.delete_wallet(&wallet.uuid).await.unwrap();
        assert!(remaining.is_empty());
        assert!(store.inner.is_empty());
    }

    #[tokio::test]
    async fn wallet_ids_are_sequential_across_operations() {
        let manager = manager();
        let a = manager.create_wallet().await.unwrap();
        let phrase = mnemonic::generate_mnemonic().unwrap().to_string();
        let b = manager.import_wallet_by_mnemonic(&phrase).await.unwrap();

        assert_eq!(a.wallet_id, 1);
        assert_eq!(b.wallet_id, 2);
        assert_eq!(b.name, "Wallet 2");
    }
}
