use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{Context, Result};
use crate::fetch::expand_env_vars;

use super::{validator, ClientConfig, Endpoints};

/// Load a client configuration from JSON, falling back to builtin values for omitted fields.
///
/// The token may reference the environment with `${VAR}` placeholders.
pub fn load_client_config(path: &Path) -> Result<ClientConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read client config JSON at {}", path.display()))?;

    let raw: RawClientConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse client config JSON at {}", path.display()))?;

    let config = raw.into_client_config(ClientConfig::builtin())?;
    validator::validate_client_config(&config)?;

    Ok(config)
}

#[derive(Debug, Default, Deserialize)]
struct RawClientConfig {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    endpoints: RawEndpoints,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEndpoints {
    batch: Option<String>,
    market: Option<String>,
    stream: Option<String>,
}

impl RawClientConfig {
    fn into_client_config(self, base: ClientConfig) -> Result<ClientConfig> {
        let token = match self.token {
            Some(template) => {
                let expanded = expand_env_vars(&template)?;
                let trimmed = expanded.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            None => base.token,
        };

        let defaults = base.endpoints;
        let endpoints = Endpoints {
            batch: self.endpoints.batch.unwrap_or(defaults.batch),
            market: self.endpoints.market.unwrap_or(defaults.market),
            stream: self.endpoints.stream.unwrap_or(defaults.stream),
        };

        Ok(ClientConfig {
            token,
            endpoints,
            timeout_secs: self.timeout_secs.unwrap_or(base.timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("iex-cli-{}-{name}", std::process::id()));
        fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn loads_partial_config_over_builtin() {
        let path = write_temp(
            "partial.json",
            r#"{ "token": "sk_test", "timeout_secs": 3 }"#,
        );
        let config = load_client_config(&path).expect("config loads");
        fs::remove_file(&path).ok();

        assert_eq!(config.token.as_deref(), Some("sk_test"));
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn expands_token_placeholder() {
        std::env::set_var("IEX_CLI_LOADER_TEST_TOKEN", "pk_from_env");
        let path = write_temp(
            "env.json",
            r#"{ "token": "${IEX_CLI_LOADER_TEST_TOKEN}",
                 "endpoints": { "batch": "http://localhost:9000/batch" } }"#,
        );
        let config = load_client_config(&path).expect("config loads");
        fs::remove_file(&path).ok();

        assert_eq!(config.token.as_deref(), Some("pk_from_env"));
        assert_eq!(config.endpoints.batch, "http://localhost:9000/batch");
        assert_eq!(config.endpoints.market, Endpoints::default().market);
    }

    #[test]
    fn rejects_market_template_without_series() {
        let path = write_temp(
            "bad.json",
            r#"{ "token": "sk_test", "endpoints": { "market": "http://localhost/market" } }"#,
        );
        let err = load_client_config(&path).expect_err("validation should fail");
        fs::remove_file(&path).ok();

        assert!(
            err.to_string().contains("{series}"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn loads_bundled_sandbox_config() {
        std::env::set_var("IEX_SANDBOX_TOKEN", "Tsk_sandbox");
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let config = load_client_config(&root.join("assets").join("configs").join("sandbox.json"))
            .expect("load sandbox config");

        assert_eq!(config.token.as_deref(), Some("Tsk_sandbox"));
        assert!(config.endpoints.batch.starts_with("https://sandbox.iexapis.com/"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("iex-cli-definitely-missing.json");
        assert!(load_client_config(&path).is_err());
    }
}
