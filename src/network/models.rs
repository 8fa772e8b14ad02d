//! Wire shapes for the transaction-preparation and broadcast service.
//!
//! Field names mirror the backend contract exactly (camelCase). Numeric
//! amounts travel as decimal strings.

use crate::blockchain::evm::EvmTransactionRequest;
use crate::core::errors::WalletError;
use serde::{Deserialize, Serialize};

/// Parameters for `/web3/swap/getSwapData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapDataRequest {
    pub chain_id: u64,
    pub from_token_address: String,
    pub to_token_address: String,
    pub amount: String,
    pub slippage: String,
    pub from_address: String,
    /// Opaque quote blob from the pricing step, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_response: Option<serde_json::Value>,
}

/// Parameters for `/web3/wallet/withdrawalData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalDataRequest {
    pub chain_id: u64,
    pub contract_address: String,
    pub to_address: String,
    pub qty: String,
    pub from_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// Parameters for `/web3/swap/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveDataRequest {
    pub chain_id: u64,
    pub from_token_address: String,
    pub to_token_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// An unsigned transaction as prepared by the service.
///
/// EVM pipelines receive the EIP-1559 fields inline; Solana pipelines
/// receive the base64 message under `solTransferData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedTransaction {
    #[serde(flatten)]
    pub evm: Option<EvmTransactionRequest>,
    #[serde(rename = "solTransferData", skip_serializing_if = "Option::is_none")]
    pub sol_transfer_data: Option<String>,
}

impl PreparedTransaction {
    /// The EVM descriptor, or `Network` if the service omitted it.
    pub fn evm(&self) -> Result<&EvmTransactionRequest, WalletError> {
        self.evm.as_ref().ok_or_else(|| {
            WalletError::Network("prepared transaction is missing EVM fields".into())
        })
    }

    /// The Solana payload, or `Network` if the service omitted it.
    pub fn solana(&self) -> Result<&str, WalletError> {
        self.sol_transfer_data.as_deref().ok_or_else(|| {
            WalletError::Network("prepared transaction is missing solTransferData".into())
        })
    }
}

/// Broadcast type tag carried alongside the signed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroadcastType {
    Swap,
    Send,
    Approve,
}

/// Body for `/web3/wallet/broadcast`: signed wire bytes plus the business
/// metadata the backend tracks per transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRequest {
    pub chain_id: u64,
    pub from_address: String,
    pub to_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    /// Signed transaction: `0x` raw hex for EVM, base64 wire for Solana.
    pub transaction_data: String,
    #[serde(rename = "type")]
    pub broadcast_type: BroadcastType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<String>,
    pub wallet_id: u64,
    pub member_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_from_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_to_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_from_qty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_to_qty: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepared_transaction_decodes_evm_shape() {
        let prepared: PreparedTransaction = serde_json::from_str(
            r#"{
                "chainId": 8453,
                "from": "0xC617C43336e46AE430b6f7625CeE60532fF42476",
                "to": "0x6b2C0c7be2048Daa9b5527982C29f48062B34D58",
                "value": "0",
                "maxFeePerGas": "1002699069",
                "maxPriorityFeePerGas": "1000000050",
                "gasLimit": "337500",
                "nonce": "91",
                "data": "0x"
            }"#,
        )
        .unwrap();

        assert!(prepared.sol_transfer_data.is_none());
        assert_eq!(prepared.evm().unwrap().chain_id, 8453);
    }

    #[test]
    fn prepared_transaction_decodes_solana_shape() {
        let prepared: PreparedTransaction =
            serde_json::from_str(r#"{"solTransferData": "AQAAAA=="}"#).unwrap();
        assert_eq!(prepared.solana().unwrap(), "AQAAAA==");
        assert!(prepared.evm().is_err());
    }

    #[test]
    fn broadcast_type_serializes_as_tag() {
        assert_eq!(serde_json::to_string(&BroadcastType::Swap).unwrap(), "\"Swap\"");
        assert_eq!(serde_json::to_string(&BroadcastType::Send).unwrap(), "\"Send\"");
        assert_eq!(serde_json::to_string(&BroadcastType::Approve).unwrap(), "\"Approve\"");
    }

    #[test]
    fn broadcast_request_uses_backend_field_names() {
        let request = BroadcastRequest {
            chain_id: 8453,
            from_address: "0xfrom".into(),
            to_address: "0xto".into(),
            contract_address: None,
            transaction_data: "0x02f1".into(),
            broadcast_type: BroadcastType::Send,
            qty: Some("1.5".into()),
            wallet_id: 7,
            member_id: 42,
            swap_from_address: None,
            swap_to_address: None,
            swap_from_qty: None,
            swap_to_qty: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "Send");
        assert_eq!(json["walletId"], 7);
        assert_eq!(json["memberId"], 42);
        assert_eq!(json["transactionData"], "0x02f1");
        assert!(json.get("contractAddress").is_none());
    }
}
