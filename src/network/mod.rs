//! HTTP client for the transaction-preparation and broadcast service.
//!
//! The service prepares unsigned payloads (swap, withdrawal, approval) and
//! accepts signed ones for broadcast. Retry/backoff policy belongs to that
//! service boundary, not here; every request is attempted exactly once.

pub mod models;

use crate::core::config::GatewayConfig;
use crate::core::errors::WalletError;
use models::{
    ApproveDataRequest, BroadcastRequest, PreparedTransaction, SwapDataRequest,
    WithdrawalDataRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const SWAP_DATA_PATH: &str = "/web3/swap/getSwapData";
const WITHDRAWAL_DATA_PATH: &str = "/web3/wallet/withdrawalData";
const APPROVE_DATA_PATH: &str = "/web3/swap/approve";
const BROADCAST_PATH: &str = "/web3/wallet/broadcast";

/// Client for the web3 backend.
#[derive(Debug, Clone)]
pub struct TransactionGateway {
    client: Client,
    base_url: String,
}

impl TransactionGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, WalletError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| WalletError::Network(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the unsigned payload for a swap.
    pub async fn swap_data(
        &self,
        request: &SwapDataRequest,
    ) -> Result<PreparedTransaction, WalletError> {
        self.post_json(SWAP_DATA_PATH, request).await
    }

    /// Fetch the unsigned payload for a withdrawal.
    pub async fn withdrawal_data(
        &self,
        request: &WithdrawalDataRequest,
    ) -> Result<PreparedTransaction, WalletError> {
        self.post_json(WITHDRAWAL_DATA_PATH, request).await
    }

    /// Fetch the unsigned payload for a token approval.
    pub async fn approve_data(
        &self,
        request: &ApproveDataRequest,
    ) -> Result<PreparedTransaction, WalletError> {
        self.post_json(APPROVE_DATA_PATH, request).await
    }

    /// Submit a signed transaction plus business metadata for broadcast.
    pub async fn broadcast(
        &self,
        request: &BroadcastRequest,
    ) -> Result<serde_json::Value, WalletError> {
        self.post_json(BROADCAST_PATH, request).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, WalletError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| WalletError::Network(format!("request to {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::Network(format!(
                "{} returned status {}",
                path, status
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WalletError::Network(format!("undecodable response from {}: {}", path, e)))
    }
}
