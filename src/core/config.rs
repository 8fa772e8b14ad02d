use serde::{Deserialize, Serialize};

/// Transaction gateway configuration (preparation + broadcast service).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the web3 backend, e.g. `https://api.example.com`.
    pub base_url: String,

    /// Request timeout (seconds).
    #[serde(default = "GatewayConfig::default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl GatewayConfig {
    fn default_timeout_seconds() -> u64 {
        30
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: Self::default_timeout_seconds(),
        }
    }
}

/// Top-level wallet core configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Counter name under which the monotonic wallet id is persisted.
    #[serde(default = "WalletConfig::default_wallet_id_counter")]
    pub wallet_id_counter: String,
}

impl WalletConfig {
    fn default_wallet_id_counter() -> String {
        // Key inherited from the mobile shell's key-value store.
        "@walletId".to_string()
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            wallet_id_counter: Self::default_wallet_id_counter(),
        }
    }
}
