//! Chain-specific key material and transaction signing.

pub mod evm;
pub mod solana;
