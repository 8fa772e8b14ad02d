//! BIP-39 mnemonic generation, validation, and seed derivation.
//!
//! Wallets in this crate are rooted in a 12-word English phrase (128 bits of
//! entropy). The seed is never persisted; it is recomputed from the mnemonic
//! whenever derivation is needed.

use crate::core::errors::WalletError;
use bip39::{Language, Mnemonic};
use rand_core::{OsRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

/// Number of words in every phrase this wallet produces or accepts.
pub const WORD_COUNT: usize = 12;

/// Generate a fresh 12-word mnemonic from OS entropy.
///
/// # Errors
/// * `WalletError::EntropySource` - the system RNG failed
/// * `WalletError::InvalidMnemonic` - entropy could not be encoded (should
///   never happen for 16 bytes)
pub fn generate_mnemonic() -> Result<Mnemonic, WalletError> {
    // 16 bytes of entropy encode to exactly 12 words.
    let mut entropy = Zeroizing::new([0u8; 16]);
    OsRng
        .try_fill_bytes(entropy.as_mut())
        .map_err(|e| WalletError::EntropySource(format!("system RNG unavailable: {}", e)))?;

    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy.as_ref())
        .map_err(|e| WalletError::EntropySource(format!("entropy encoding failed: {}", e)))?;

    debug!("Generated new {}-word mnemonic", WORD_COUNT);
    Ok(mnemonic)
}

/// Validate a phrase and derive its 64-byte BIP-39 seed (empty passphrase).
///
/// Deterministic: the same phrase always yields the same seed.
///
/// # Errors
/// * `WalletError::InvalidMnemonic` - wrong word count, unknown word, or
///   checksum mismatch
pub fn seed_from_mnemonic(phrase: &str) -> Result<Zeroizing<[u8; 64]>, WalletError> {
    let mnemonic = parse_mnemonic(phrase)?;
    Ok(Zeroizing::new(mnemonic.to_seed("")))
}

/// Parse and validate a phrase against the English word list.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, WalletError> {
    let word_count = phrase.split_whitespace().count();
    if word_count != WORD_COUNT {
        return Err(WalletError::InvalidMnemonic(format!(
            "expected {} words, got {}",
            WORD_COUNT, word_count
        )));
    }

    Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))
}
