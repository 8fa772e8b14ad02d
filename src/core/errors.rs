use thiserror::Error;

/// Domain error for all wallet-core operations.
///
/// Every public operation either fully succeeds or fails with one of these
/// variants; internal causes are folded into the message string. Raw secret
/// material (mnemonics, private keys) must never be formatted into a message.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The system RNG could not produce entropy for mnemonic generation.
    #[error("Entropy source error: {0}")]
    EntropySource(String),

    /// Wrong word count, out-of-vocabulary word, or checksum failure.
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Imported private key has the wrong length or encoding for its chain.
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// BIP-32 / SLIP-0010 child key derivation failed.
    #[error("Key derivation error: {0}")]
    Derivation(String),

    /// The secure-store adapter reported a failure (locked, full, ...).
    #[error("Secure storage error: {0}")]
    SecureStorage(String),

    /// No secret exists under the requested storage key.
    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    /// No signing key is stored for the requested address/chain.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A stored key could not be decoded into valid key material.
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// The transaction requires signer slots this wallet cannot satisfy.
    #[error("Incomplete signers: {0}")]
    IncompleteSigners(String),

    /// Transaction encoding or signature production failed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// The wallet-id counter could not be read or persisted.
    #[error("Counter persistence error: {0}")]
    CounterPersistence(String),

    /// Gateway request failed or returned an undecodable response.
    #[error("Network error: {0}")]
    Network(String),
}

impl WalletError {
    /// True for failures a caller may reasonably retry at its own boundary.
    /// The core itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WalletError::Network(_) | WalletError::SecureStorage(_))
    }
}
