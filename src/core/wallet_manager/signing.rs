//! Transaction signing: key fetch plus chain dispatch.
//!
//! Keys are re-fetched from the secure store on every call and dropped as
//! soon as the chain signer returns; no signing key survives the call.

use super::WalletManager;
use crate::blockchain::{evm, solana};
use crate::core::domain::Chain;
use crate::core::errors::WalletError;
use crate::storage::SecretId;
use tracing::info;
use zeroize::Zeroizing;

impl WalletManager {
    /// Sign an EIP-1559 transaction for the given EVM address.
    ///
    /// Returns the `0x`-prefixed raw transaction for broadcast.
    ///
    /// # Errors
    /// * `WalletError::KeyNotFound` - no EVM key stored for the address
    /// * `WalletError::Signing` - encoding or signature production failed
    pub async fn sign_evm_transaction(
        &self,
        address: &str,
        request: &evm::EvmTransactionRequest,
    ) -> Result<String, WalletError> {
        let private_key = self.fetch_signing_key(address, Chain::Evm).await?;
        let raw = evm::sign_transaction(&private_key, request)?;
        info!(address = %address, chain_id = request.chain_id, "Signed EVM transaction");
        Ok(raw)
    }

    /// Sign a base64-encoded Solana transaction for the given address.
    ///
    /// Returns the fully signed transaction re-encoded to base64.
    ///
    /// # Errors
    /// * `WalletError::KeyNotFound` - no Solana key stored for the address
    /// * `WalletError::InvalidKeyEncoding` - stored key is not a valid
    ///   base58 64-byte secret key
    /// * `WalletError::IncompleteSigners` - the message needs signatures
    ///   this wallet cannot provide
    pub async fn sign_solana_transaction(
        &self,
        address: &str,
        unsigned_base64: &str,
    ) -> Result<String, WalletError> {
        let private_key = self.fetch_signing_key(address, Chain::Solana).await?;
        let signed = solana::sign_transaction(&private_key, unsigned_base64)?;
        info!(address = %address, "Signed Solana transaction");
        Ok(signed)
    }

    /// Fetch the stored private key for (address, chain); absence is a
    /// `KeyNotFound`, adapter failures stay `SecureStorage`. The buffer is
    /// wiped when the signing call returns.
    async fn fetch_signing_key(
        &self,
        address: &str,
        chain: Chain,
    ) -> Result<Zeroizing<String>, WalletError> {
        self.secrets
            .fetch_secret(SecretId::PrivateKey { address, chain })
            .await
            .map_err(|e| match e {
                WalletError::SecretNotFound(_) => WalletError::KeyNotFound(format!(
                    "no {} signing key stored for {}",
                    chain, address
                )),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WalletConfig;

    #[tokio::test]
    async fn signing_without_stored_key_is_key_not_found() {
        let manager = WalletManager::in_memory(WalletConfig::default());
        let request = evm::EvmTransactionRequest {
            chain_id: 1,
            from: "0xC617C43336e46AE430b6f7625CeE60532fF42476".into(),
            to: "0x6b2C0c7be2048Daa9b5527982C29f48062B34D58".into(),
            value: "0".into(),
            max_fee_per_gas: "1000000000".into(),
            max_priority_fee_per_gas: "1000000000".into(),
            gas_limit: "21000".into(),
            nonce: "0".into(),
            data: String::new(),
        };

        let err = manager
            .sign_evm_transaction("0xC617C43336e46AE430b6f7625CeE60532fF42476", &request)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::KeyNotFound(_)));
    }

    #[tokio::test]
    async fn solana_signing_without_key_is_key_not_found() {
        let manager = WalletManager::in_memory(WalletConfig::default());
        let err = manager
            .sign_solana_transaction("FsXEXnfF6KSgPAZ8W8MFFSmM9RLzn75Hejz87EhmhnZJ", "AQID")
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::KeyNotFound(_)));
    }
}
