//! Core domain types: chains, wallet records, and their wire encoding.
//!
//! The serialized wallet shape is a stable contract consumed by the mobile
//! shell and the backend: field names (`addressList`, `generateType`) and
//! the integer codes for type/source/status must not change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported chain families.
///
/// Closed enum: every chain-specific branch in the crate is an exhaustive
/// match on this type, never a string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    #[serde(rename = "EVM")]
    Evm,
    Solana,
}

impl Chain {
    /// Tag used in storage keys and the wallet wire shape.
    pub fn tag(&self) -> &'static str {
        match self {
            Chain::Evm => "EVM",
            Chain::Solana => "Solana",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One derived or imported address, tagged with its chain family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    #[serde(rename = "generateType")]
    pub chain: Chain,
    pub address: String,
}

/// How the wallet's key material was produced. Serialized as its wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WalletType {
    /// Hierarchical-deterministic wallet rooted in a mnemonic.
    Hd = 1,
    /// Single imported private key.
    PrivateKey = 2,
}

impl From<WalletType> for u8 {
    fn from(v: WalletType) -> u8 {
        v as u8
    }
}

impl TryFrom<u8> for WalletType {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(WalletType::Hd),
            2 => Ok(WalletType::PrivateKey),
            other => Err(format!("unknown wallet type code {other}")),
        }
    }
}

/// Whether the wallet was created locally or imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WalletSource {
    Created = 1,
    Imported = 2,
}

impl From<WalletSource> for u8 {
    fn from(v: WalletSource) -> u8 {
        v as u8
    }
}

impl TryFrom<u8> for WalletSource {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(WalletSource::Created),
            2 => Ok(WalletSource::Imported),
            other => Err(format!("unknown wallet source code {other}")),
        }
    }
}

/// Mnemonic backup state surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BackupStatus {
    NotBackedUp = 0,
    BackedUp = 1,
    Imported = 2,
}

impl From<BackupStatus> for u8 {
    fn from(v: BackupStatus) -> u8 {
        v as u8
    }
}

impl TryFrom<u8> for BackupStatus {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(BackupStatus::NotBackedUp),
            1 => Ok(BackupStatus::BackedUp),
            2 => Ok(BackupStatus::Imported),
            other => Err(format!("unknown backup status code {other}")),
        }
    }
}

/// A wallet record as held by the registry and shipped to the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub uuid: String,
    #[serde(rename = "addressList")]
    pub address_list: Vec<AddressEntry>,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    pub source: WalletSource,
    pub avatar: u32,
    pub name: String,
    pub status: BackupStatus,
    pub balance: f64,
    #[serde(rename = "walletId")]
    pub wallet_id: u64,
}

impl Wallet {
    /// Address registered for the given chain, if any.
    pub fn address_for(&self, chain: Chain) -> Option<&str> {
        self.address_list
            .iter()
            .find(|e| e.chain == chain)
            .map(|e| e.address.as_str())
    }
}
