//! SLIP-0010 ed25519 derivation for the Solana account path.
//!
//! Path: `m/44'/501'/{address_index}'/0'`. SLIP-0010 over ed25519 only
//! supports hardened derivation, so every segment in the path is hardened.
//! The 32-byte derivation output is used as the ed25519 seed; standard
//! keypair expansion produces the 64-byte secret key and 32-byte public key.

use crate::core::errors::WalletError;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

const HARDENED: u32 = 0x8000_0000;

/// SLIP-0010 master key seed constant for ed25519.
const MASTER_SECRET: &[u8] = b"ed25519 seed";

/// Derive the 32-byte ed25519 seed at `m/44'/501'/{address_index}'/0'`.
pub fn derive_solana_seed(
    seed: &[u8],
    address_index: u32,
) -> Result<Zeroizing<[u8; 32]>, WalletError> {
    let path = [
        44 | HARDENED,
        501 | HARDENED,
        address_index | HARDENED,
        HARDENED, // change 0'
    ];
    derive_path(seed, &path)
}

/// Derive along an arbitrary all-hardened path. Exposed for test vectors.
pub(crate) fn derive_path(
    seed: &[u8],
    path: &[u32],
) -> Result<Zeroizing<[u8; 32]>, WalletError> {
    let (mut key, mut chain_code) = master_key(seed)?;

    for &index in path {
        if index < HARDENED {
            return Err(WalletError::Derivation(format!(
                "SLIP-0010 ed25519 requires hardened indices, got {:#x}",
                index
            )));
        }
        let (child_key, child_chain) = derive_child(&key, &chain_code, index)?;
        key = child_key;
        chain_code = child_chain;
    }

    Ok(key)
}

/// I = HMAC-SHA512(Key = "ed25519 seed", Data = seed); IL key, IR chain code.
fn master_key(seed: &[u8]) -> Result<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>), WalletError> {
    let mut mac = HmacSha512::new_from_slice(MASTER_SECRET)
        .map_err(|e| WalletError::Derivation(format!("HMAC init: {}", e)))?;
    mac.update(seed);
    split_digest(mac.finalize().into_bytes().as_slice())
}

/// Hardened child step: I = HMAC-SHA512(chain_code, 0x00 || key || index).
fn derive_child(
    key: &[u8; 32],
    chain_code: &[u8; 32],
    index: u32,
) -> Result<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>), WalletError> {
    let mut mac = HmacSha512::new_from_slice(chain_code)
        .map_err(|e| WalletError::Derivation(format!("HMAC init: {}", e)))?;
    mac.update(&[0x00]);
    mac.update(key);
    mac.update(&index.to_be_bytes());
    split_digest(mac.finalize().into_bytes().as_slice())
}

fn split_digest(
    digest: &[u8],
) -> Result<(Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>), WalletError> {
    let mut key = Zeroizing::new([0u8; 32]);
    let mut chain_code = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&digest[..32]);
    chain_code.copy_from_slice(&digest[32..]);
    Ok((key, chain_code))
}
