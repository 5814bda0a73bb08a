//! Centralized configuration (environment variables + defaults).

use std::net::SocketAddr;

use reqwest::Url;

pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SOLANA_RPC_URL is not a valid URL ({value}): {reason}")]
    InvalidRpcUrl { value: String, reason: String },
    #[error("SOLANA_RPC_URL must use http or https, got scheme '{0}'")]
    UnsupportedRpcScheme(String),
    #[error("BIND_ADDR is not a valid socket address ({value}): {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub solana_rpc_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads the process environment (after `.env`, if the binary loaded one).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("SOLANA_RPC_URL").ok(),
            std::env::var("BIND_ADDR").ok(),
        )
    }

    pub fn from_vars(
        rpc_url: Option<String>,
        bind_addr: Option<String>,
    ) -> Result<Self, ConfigError> {
        let solana_rpc_url = validate_rpc_url(
            rpc_url
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SOLANA_RPC_URL.to_string()),
        )?;

        let bind_raw = bind_addr
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_raw.clone(),
                source,
            })?;

        Ok(Self {
            solana_rpc_url,
            bind_addr,
        })
    }
}

/// Only http(s) endpoints are accepted; anything else is rejected at startup.
fn validate_rpc_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().to_string();
    let url = Url::parse(&trimmed).map_err(|e| ConfigError::InvalidRpcUrl {
        value: trimmed.clone(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed),
        other => Err(ConfigError::UnsupportedRpcScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::from_vars(None, None).unwrap();
        assert_eq!(cfg.solana_rpc_url, DEFAULT_SOLANA_RPC_URL);
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000".parse().unwrap());
    }

    #[test]
    fn blank_rpc_url_falls_back_to_default() {
        let cfg = Config::from_vars(Some("  ".to_string()), None).unwrap();
        assert_eq!(cfg.solana_rpc_url, DEFAULT_SOLANA_RPC_URL);
    }

    #[test]
    fn override_is_used_verbatim() {
        let cfg = Config::from_vars(
            Some("http://127.0.0.1:8899".to_string()),
            Some("127.0.0.1:8080".to_string()),
        )
        .unwrap();
        assert_eq!(cfg.solana_rpc_url, "http://127.0.0.1:8899");
        assert_eq!(cfg.bind_addr.port(), 8080);
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(
            Config::from_vars(Some("not a url".to_string()), None),
            Err(ConfigError::InvalidRpcUrl { .. })
        ));
        assert!(matches!(
            Config::from_vars(Some("ftp://example.com".to_string()), None),
            Err(ConfigError::UnsupportedRpcScheme(s)) if s == "ftp"
        ));
    }

    #[test]
    fn rejects_bad_bind_addr() {
        assert!(matches!(
            Config::from_vars(None, Some("localhost".to_string())),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
    }
}
