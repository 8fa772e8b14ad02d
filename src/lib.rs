//! Non-custodial multi-chain wallet core.
//!
//! From a single BIP-39 mnemonic (or an imported private key) this crate
//! derives deterministic key material for EVM chains and Solana, persists
//! secrets behind a keyed secure-storage scheme, and produces chain-correct
//! signed transactions for an external broadcast service.
//!
//! Out of scope by design: balance/price queries, multi-signature schemes,
//! hardware wallets, and the secure-enclave implementation itself (consumed
//! through [`storage::SecureStore`]).

pub mod blockchain;
pub mod core;
pub mod crypto;
pub mod network;
pub mod service;
pub mod storage;

pub use crate::core::config::WalletConfig;
pub use crate::core::domain::{AddressEntry, BackupStatus, Chain, Wallet, WalletSource, WalletType};
pub use crate::core::errors::WalletError;
pub use crate::core::WalletManager;
