//! BIP-32 secp256k1 derivation for the EVM account path.
//!
//! Path: `m/44'/60'/0'/0/{address_index}`. Derivation is a pure function of
//! (seed, index); keys are re-derived on demand rather than cached.

use crate::core::errors::WalletError;
use coins_bip32::xkeys::{Parent, XPriv};
use k256::ecdsa::SigningKey;

const HARDENED: u32 = 0x8000_0000;

/// BIP-44 purpose / coin-type constants for EVM chains.
const PURPOSE: u32 = 44;
const COIN_TYPE_EVM: u32 = 60;

/// Derive the secp256k1 signing key at `m/44'/60'/0'/0/{address_index}`.
///
/// # Errors
/// * `WalletError::Derivation` - an intermediate child key was invalid
///   (astronomically rare per BIP-32, but surfaced rather than ignored)
pub fn derive_evm_signing_key(
    seed: &[u8],
    address_index: u32,
) -> Result<SigningKey, WalletError> {
    let mut node = XPriv::root_from_seed(seed, None)
        .map_err(|e| WalletError::Derivation(format!("BIP-32 master key: {}", e)))?;

    let path = [
        PURPOSE | HARDENED,
        COIN_TYPE_EVM | HARDENED,
        HARDENED, // account 0'
        0,        // external chain
        address_index,
    ];
    for index in path {
        node = node
            .derive_child(index)
            .map_err(|e| WalletError::Derivation(format!("BIP-32 child {:#x}: {}", index, e)))?;
    }

    let key: &SigningKey = node.as_ref();
    Ok(key.clone())
}
