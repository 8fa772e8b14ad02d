//! Solana keypair derivation and compiled-message signing.
//!
//! The preparation service ships unsigned transactions as base64-encoded
//! wire bytes. Signing decodes the versioned envelope, fills this wallet's
//! required-signature slot with an ed25519 signature over the compiled
//! message, and re-encodes the result for broadcast.

use crate::core::errors::WalletError;
use crate::crypto::slip10;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::SigningKey as Ed25519SigningKey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;
use tracing::debug;
use zeroize::Zeroizing;

/// Derived Solana key material: base58 64-byte secret key plus address.
pub struct SolanaKeypair {
    /// base58 of the 64-byte expanded secret key (the stored form).
    pub private_key_bs58: Zeroizing<String>,
    /// base58 of the 32-byte public key.
    pub address: String,
}

/// Derive the keypair at `m/44'/501'/{address_index}'/0'` from a BIP-39 seed.
pub fn derive_keypair(seed: &[u8], address_index: u32) -> Result<SolanaKeypair, WalletError> {
    let ed25519_seed = slip10::derive_solana_seed(seed, address_index)?;
    let signing_key = Ed25519SigningKey::from_bytes(&ed25519_seed);

    let keypair_bytes = Zeroizing::new(signing_key.to_keypair_bytes());
    let private_key_bs58 = Zeroizing::new(bs58::encode(keypair_bytes.as_ref()).into_string());
    let address = bs58::encode(signing_key.verifying_key().as_bytes()).into_string();

    Ok(SolanaKeypair { private_key_bs58, address })
}

/// Address for an imported base58-encoded 64-byte secret key.
pub fn address_from_private_key(private_key: &str) -> Result<String, WalletError> {
    let signing_key =
        parse_private_key(private_key).map_err(|e| WalletError::InvalidPrivateKey(e))?;
    Ok(bs58::encode(signing_key.verifying_key().as_bytes()).into_string())
}

/// Sign a base64-encoded unsigned transaction with a stored secret key.
///
/// The signer must own one of the message's required-signature slots (the
/// fee payer occupies the first); every other required slot must already be
/// signed, since this wallet holds exactly one key.
///
/// # Errors
/// * `WalletError::InvalidKeyEncoding` - stored key is not a valid base58
///   64-byte keypair
/// * `WalletError::Signing` - the payload is not a decodable transaction
/// * `WalletError::IncompleteSigners` - a required slot cannot be satisfied
pub fn sign_transaction(
    private_key_bs58: &str,
    unsigned_base64: &str,
) -> Result<String, WalletError> {
    let keypair = load_keypair(private_key_bs58)?;

    let wire_bytes = BASE64
        .decode(unsigned_base64)
        .map_err(|e| WalletError::Signing(format!("base64 decode failed: {}", e)))?;
    let mut transaction: VersionedTransaction = bincode::deserialize(&wire_bytes)
        .map_err(|e| WalletError::Signing(format!("transaction decode failed: {}", e)))?;

    let required = transaction.message.header().num_required_signatures as usize;
    let static_keys = transaction.message.static_account_keys();
    if required == 0 || static_keys.len() < required {
        return Err(WalletError::Signing(format!(
            "malformed message: {} required signatures, {} static keys",
            required,
            static_keys.len()
        )));
    }

    let our_pubkey = keypair.pubkey();
    let slot = static_keys[..required]
        .iter()
        .position(|key| *key == our_pubkey)
        .ok_or_else(|| {
            WalletError::IncompleteSigners(format!(
                "address {} is not a required signer of this message",
                our_pubkey
            ))
        })?;

    // Unsigned payloads carry placeholder slots; make sure every required
    // slot exists before indexing.
    transaction.signatures.resize(required, Signature::default());

    let message_bytes = transaction.message.serialize();
    transaction.signatures[slot] = keypair.sign_message(&message_bytes);

    if let Some(missing) = transaction
        .signatures
        .iter()
        .position(|sig| *sig == Signature::default())
    {
        return Err(WalletError::IncompleteSigners(format!(
            "signer slot {} requires a signature this wallet cannot provide",
            missing
        )));
    }

    let signed_bytes = bincode::serialize(&transaction)
        .map_err(|e| WalletError::Signing(format!("transaction encode failed: {}", e)))?;

    debug!(slot, size = signed_bytes.len(), "Signed Solana transaction");
    Ok(BASE64.encode(signed_bytes))
}

fn load_keypair(private_key_bs58: &str) -> Result<Keypair, WalletError> {
    let signing_key =
        parse_private_key(private_key_bs58).map_err(|e| WalletError::InvalidKeyEncoding(e))?;
    Keypair::from_bytes(&signing_key.to_keypair_bytes())
        .map_err(|e| WalletError::InvalidKeyEncoding(format!("keypair rebuild failed: {}", e)))
}

fn parse_private_key(private_key: &str) -> Result<Ed25519SigningKey, String> {
    let bytes = bs58::decode(private_key)
        .into_vec()
        .map_err(|e| format!("not valid base58: {}", e))?;
    let keypair_bytes: [u8; 64] = bytes
        .try_into()
        .map_err(|v: Vec<u8>| format!("expected 64-byte secret key, got {}", v.len()))?;
    Ed25519SigningKey::from_keypair_bytes(&keypair_bytes)
        .map_err(|e| format!("not a valid ed25519 keypair: {}", e))
}
