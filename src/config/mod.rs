use serde::{Deserialize, Serialize};

pub mod fields;
pub mod loader;
pub mod validator;

pub use loader::load_client_config;
pub use validator::validate_client_config;

/// Environment variable consulted for the API token when none is configured.
pub const TOKEN_ENV_VAR: &str = "IEX_TOKEN";

const BATCH_URL: &str = "https://cloud.iexapis.com/v1/stock/market/batch/";
const MARKET_URL: &str = "https://cloud.iexapis.com/v1/data-points/market/{series}";
const STREAM_URL: &str =
    "https://cloud-sse.iexapis.com/stable/{endpoint}?token={token}&symbols={symbol}";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// URL templates for the three provider surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub batch: String,
    /// Must contain `{series}`.
    pub market: String,
    /// Must contain `{endpoint}`, `{token}` and `{symbol}`.
    pub stream: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            batch: BATCH_URL.to_string(),
            market: MARKET_URL.to_string(),
            stream: STREAM_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `None` when neither the config file nor the environment supplied one.
    pub token: Option<String>,
    pub endpoints: Endpoints,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Production endpoints with the token taken from `IEX_TOKEN`, if set.
    pub fn builtin() -> Self {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Self {
            token,
            endpoints: Endpoints::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_token<T: Into<String>>(mut self, token: T) -> Self {
        self.token = Some(token.into());
        self
    }
}
