//! Deterministic key material: BIP-39 mnemonics and hierarchical derivation.

pub mod bip32;
pub mod mnemonic;
pub mod slip10;
