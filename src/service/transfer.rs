//! Transfer orchestration: swap, withdrawal, and approval pipelines.
//!
//! Each pipeline is the same fixed three-step shape: fetch the unsigned
//! payload from the preparation service, sign it locally for the wallet's
//! chain, submit the signed bytes with business metadata for broadcast.
//! A failure at any step aborts the pipeline: nothing is partially
//! broadcast, and nothing is retried here.

use crate::core::domain::{Chain, Wallet};
use crate::core::errors::WalletError;
use crate::core::WalletManager;
use crate::network::models::{
    ApproveDataRequest, BroadcastRequest, BroadcastType, PreparedTransaction, SwapDataRequest,
    WithdrawalDataRequest,
};
use crate::network::TransactionGateway;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Token-swap order: swap legs plus the metadata the backend tracks.
#[derive(Debug, Clone)]
pub struct SwapOrder {
    pub chain_id: u64,
    pub from_token_address: String,
    pub to_token_address: String,
    pub amount: String,
    pub slippage: String,
    pub to_address: String,
    pub contract_address: Option<String>,
    pub qty: Option<String>,
    pub member_id: u64,
    /// Opaque quote blob from the pricing step.
    pub quote_response: Option<Value>,
    pub swap_from_qty: Option<String>,
    pub swap_to_qty: Option<String>,
}

/// Withdrawal (send) order.
#[derive(Debug, Clone)]
pub struct WithdrawalOrder {
    pub chain_id: u64,
    pub contract_address: String,
    pub to_address: String,
    pub qty: String,
    pub member_id: u64,
    pub gas_limit: Option<String>,
    pub nonce: Option<String>,
}

/// Token-approval order ahead of a swap.
#[derive(Debug, Clone)]
pub struct ApproveOrder {
    pub chain_id: u64,
    pub from_token_address: String,
    pub to_token_address: String,
    pub to_address: String,
    pub member_id: u64,
    pub gas_limit: Option<String>,
    pub nonce: Option<String>,
    pub swap_from_qty: Option<String>,
    pub swap_to_qty: Option<String>,
}

/// Drives the prepare → sign → broadcast pipelines.
#[derive(Debug, Clone)]
pub struct TransferService {
    manager: Arc<WalletManager>,
    gateway: TransactionGateway,
}

impl TransferService {
    pub fn new(manager: Arc<WalletManager>, gateway: TransactionGateway) -> Self {
        Self { manager, gateway }
    }

    /// Swap pipeline. Returns the backend's broadcast receipt.
    pub async fn swap(
        &self,
        wallet: &Wallet,
        chain: Chain,
        order: &SwapOrder,
    ) -> Result<Value, WalletError> {
        let address = self.wallet_address(wallet, chain)?;

        let prepared = self
            .gateway
            .swap_data(&SwapDataRequest {
                chain_id: order.chain_id,
                from_token_address: order.from_token_address.clone(),
                to_token_address: order.to_token_address.clone(),
                amount: order.amount.clone(),
                slippage: order.slippage.clone(),
                from_address: address.to_string(),
                quote_response: order.quote_response.clone(),
            })
            .await?;

        let transaction_data = self.sign_prepared(address, chain, &prepared).await?;

        let receipt = self
            .gateway
            .broadcast(&BroadcastRequest {
                chain_id: order.chain_id,
                from_address: address.to_string(),
                to_address: order.to_address.clone(),
                contract_address: order.contract_address.clone(),
                transaction_data,
                broadcast_type: BroadcastType::Swap,
                qty: order.qty.clone(),
                wallet_id: wallet.wallet_id,
                member_id: order.member_id,
                swap_from_address: Some(order.from_token_address.clone()),
                swap_to_address: Some(order.to_token_address.clone()),
                swap_from_qty: order.swap_from_qty.clone(),
                swap_to_qty: order.swap_to_qty.clone(),
            })
            .await?;

        info!(wallet_id = wallet.wallet_id, chain = %chain, "Swap broadcast complete");
        Ok(receipt)
    }

    /// Withdrawal pipeline (broadcast type `Send`).
    pub async fn withdraw(
        &self,
        wallet: &Wallet,
        chain: Chain,
        order: &WithdrawalOrder,
    ) -> Result<Value, WalletError> {
        let address = self.wallet_address(wallet, chain)?;

        let prepared = self
            .gateway
            .withdrawal_data(&WithdrawalDataRequest {
                chain_id: order.chain_id,
                contract_address: order.contract_address.clone(),
                to_address: order.to_address.clone(),
                qty: order.qty.clone(),
                from_address: address.to_string(),
                gas_limit: order.gas_limit.clone(),
                nonce: order.nonce.clone(),
            })
            .await?;

        let transaction_data = self.sign_prepared(address, chain, &prepared).await?;

        let receipt = self
            .gateway
            .broadcast(&BroadcastRequest {
                chain_id: order.chain_id,
                from_address: address.to_string(),
                to_address: order.to_address.clone(),
                contract_address: Some(order.contract_address.clone()),
                transaction_data,
                broadcast_type: BroadcastType::Send,
                qty: Some(order.qty.clone()),
                wallet_id: wallet.wallet_id,
                member_id: order.member_id,
                swap_from_address: None,
                swap_to_address: None,
                swap_from_qty: None,
                swap_to_qty: None,
            })
            .await?;

        info!(wallet_id = wallet.wallet_id, chain = %chain, "Withdrawal broadcast complete");
        Ok(receipt)
    }

    /// Approval pipeline.
    pub async fn approve(
        &self,
        wallet: &Wallet,
        chain: Chain,
        order: &ApproveOrder,
    ) -> Result<Value, WalletError> {
        let address = self.wallet_address(wallet, chain)?;

        let prepared = self
            .gateway
            .approve_data(&ApproveDataRequest {
                chain_id: order.chain_id,
                from_token_address: order.from_token_address.clone(),
                to_token_address: order.to_token_address.clone(),
                gas_limit: order.gas_limit.clone(),
                nonce: order.nonce.clone(),
            })
            .await?;

        let transaction_data = self.sign_prepared(address, chain, &prepared).await?;

        let receipt = self
            .gateway
            .broadcast(&BroadcastRequest {
                chain_id: order.chain_id,
                from_address: address.to_string(),
                to_address: order.to_address.clone(),
                contract_address: None,
                transaction_data,
                broadcast_type: BroadcastType::Approve,
                qty: None,
                wallet_id: wallet.wallet_id,
                member_id: order.member_id,
                swap_from_address: Some(order.from_token_address.clone()),
                swap_to_address: Some(order.to_token_address.clone()),
                swap_from_qty: order.swap_from_qty.clone(),
                swap_to_qty: order.swap_to_qty.clone(),
            })
            .await?;

        info!(wallet_id = wallet.wallet_id, chain = %chain, "Approval broadcast complete");
        Ok(receipt)
    }

    fn wallet_address<'a>(&self, wallet: &'a Wallet, chain: Chain) -> Result<&'a str, WalletError> {
        wallet.address_for(chain).ok_or_else(|| {
            WalletError::Signing(format!(
                "wallet {} has no {} address",
                wallet.uuid, chain
            ))
        })
    }

    /// Dispatch to the chain signer. Exhaustive over [`Chain`].
    async fn sign_prepared(
        &self,
        address: &str,
        chain: Chain,
        prepared: &PreparedTransaction,
    ) -> Result<String, WalletError> {
        match chain {
            Chain::Evm => self.manager.sign_evm_transaction(address, prepared.evm()?).await,
            Chain::Solana => {
                self.manager
                    .sign_solana_transaction(address, prepared.solana()?)
                    .await
            }
        }
    }
}
