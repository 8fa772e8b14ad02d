pub mod config;
pub mod domain;
pub mod errors;
pub mod wallet_manager;

pub use wallet_manager::WalletManager;
