//! EVM keypair derivation and EIP-1559 transaction signing.
//!
//! Addresses are keccak256-based checksummed hex; signing produces the raw
//! `0x02`-prefixed typed-transaction envelope expected by
//! `eth_sendRawTransaction`-style broadcast endpoints.

use crate::core::errors::WalletError;
use crate::crypto::bip32;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, Eip1559TransactionRequest, NameOrAddress, U256};
use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;
use zeroize::Zeroizing;

/// Derived EVM key material: raw hex private key plus checksummed address.
pub struct EvmKeypair {
    /// 64 hex chars, no `0x` prefix (the stored form).
    pub private_key_hex: Zeroizing<String>,
    pub address: String,
}

/// Derive the keypair at `m/44'/60'/0'/0/{address_index}` from a BIP-39 seed.
pub fn derive_keypair(seed: &[u8], address_index: u32) -> Result<EvmKeypair, WalletError> {
    let signing_key = bip32::derive_evm_signing_key(seed, address_index)?;
    let address = address_from_signing_key(&signing_key);
    let private_key_hex = Zeroizing::new(hex::encode(signing_key.to_bytes()));
    Ok(EvmKeypair { private_key_hex, address })
}

/// Checksummed address for an imported raw private key (hex, optional `0x`).
pub fn address_from_private_key(private_key: &str) -> Result<String, WalletError> {
    let signing_key = parse_private_key(private_key)
        .map_err(|e| WalletError::InvalidPrivateKey(e))?;
    Ok(address_from_signing_key(&signing_key))
}

/// Unsigned EIP-1559 transaction descriptor as the preparation service
/// sends it: decimal-string numerics, hex calldata, `type = 2` implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmTransactionRequest {
    pub chain_id: u64,
    pub from: String,
    pub to: String,
    pub value: String,
    pub max_fee_per_gas: String,
    pub max_priority_fee_per_gas: String,
    pub gas_limit: String,
    pub nonce: String,
    #[serde(default)]
    pub data: String,
}

/// Sign an EIP-1559 transaction with a stored raw private key.
///
/// Returns the `0x`-prefixed hex encoding of the signed wire transaction.
///
/// # Errors
/// * `WalletError::InvalidKeyEncoding` - the stored key is not a 32-byte hex
///   secp256k1 key
/// * `WalletError::Signing` - the descriptor could not be encoded or signed
pub fn sign_transaction(
    private_key_hex: &str,
    request: &EvmTransactionRequest,
) -> Result<String, WalletError> {
    let signing_key = parse_private_key(private_key_hex)
        .map_err(|e| WalletError::InvalidKeyEncoding(e))?;
    let wallet = LocalWallet::from(signing_key).with_chain_id(request.chain_id);

    let typed: TypedTransaction = build_request(request)?.into();
    let signature = wallet
        .sign_transaction_sync(&typed)
        .map_err(|e| WalletError::Signing(format!("ECDSA signing failed: {}", e)))?;
    let raw = typed.rlp_signed(&signature);

    debug!(size = raw.len(), chain_id = request.chain_id, "Signed EVM transaction");
    Ok(format!("0x{}", hex::encode(raw)))
}

fn build_request(request: &EvmTransactionRequest) -> Result<Eip1559TransactionRequest, WalletError> {
    let from = parse_address(&request.from)?;
    let to = parse_address(&request.to)?;

    Ok(Eip1559TransactionRequest {
        from: Some(from),
        to: Some(NameOrAddress::Address(to)),
        value: Some(parse_u256("value", &request.value)?),
        max_fee_per_gas: Some(parse_u256("maxFeePerGas", &request.max_fee_per_gas)?),
        max_priority_fee_per_gas: Some(parse_u256(
            "maxPriorityFeePerGas",
            &request.max_priority_fee_per_gas,
        )?),
        gas: Some(parse_u256("gasLimit", &request.gas_limit)?),
        nonce: Some(parse_u256("nonce", &request.nonce)?),
        data: Some(parse_data(&request.data)?),
        chain_id: Some(request.chain_id.into()),
        access_list: Default::default(),
    })
}

fn parse_address(value: &str) -> Result<Address, WalletError> {
    Address::from_str(value)
        .map_err(|e| WalletError::Signing(format!("invalid address '{}': {}", value, e)))
}

/// Accepts decimal (service default) or `0x`-prefixed hex numerics.
fn parse_u256(field: &str, value: &str) -> Result<U256, WalletError> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex_digits) => U256::from_str_radix(hex_digits, 16).map_err(|e| e.to_string()),
        None => U256::from_dec_str(value).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| WalletError::Signing(format!("invalid {} '{}': {}", field, value, e)))
}

fn parse_data(value: &str) -> Result<Bytes, WalletError> {
    if value.is_empty() || value == "0x" {
        return Ok(Bytes::default());
    }
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(stripped)
        .map_err(|e| WalletError::Signing(format!("invalid calldata hex: {}", e)))?;
    Ok(Bytes::from(bytes))
}

fn parse_private_key(private_key: &str) -> Result<SigningKey, String> {
    let stripped = private_key.strip_prefix("0x").unwrap_or(private_key);
    let bytes = hex::decode(stripped).map_err(|e| format!("not valid hex: {}", e))?;
    if bytes.len() != 32 {
        return Err(format!("expected 32 bytes, got {}", bytes.len()));
    }
    SigningKey::from_slice(&bytes).map_err(|e| format!("not a valid secp256k1 key: {}", e))
}

fn address_from_signing_key(signing_key: &SigningKey) -> String {
    let address = ethers::utils::secret_key_to_address(signing_key);
    ethers::utils::to_checksum(&address, None)
}
