use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const ENV_API_KEY: &str = "RIGUP_API_KEY";
pub const ENV_API_URL: &str = "RIGUP_API_URL";

const DEFAULT_API_URL: &str = "https://console.vast.ai/api/v0";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing marketplace credential: set {0}")]
    MissingCredential(&'static str),

    #[error("invalid marketplace URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

/// How marketplace calls leave the process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MarketTransport {
    /// Direct calls against the REST API.
    #[default]
    Http,
    /// Shell out to the vendor's CLI executable in `--raw` JSON mode.
    Cli { program: String },
}

/// Marketplace connection settings, validated once at startup.
///
/// There is no sentinel fallback for the API key: construction fails
/// with [`ConfigError::MissingCredential`] instead of deferring the
/// failure to the first authenticated call.
#[derive(Clone)]
pub struct MarketConfig {
    pub api_key: String,
    pub api_url: Url,
    pub timeout: Duration,
    pub transport: MarketTransport,
}

impl MarketConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(ENV_API_KEY));
        }
        Ok(Self {
            api_key,
            api_url: Url::parse(DEFAULT_API_URL).expect("default marketplace URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            transport: MarketTransport::default(),
        })
    }

    /// Read and validate configuration from the process environment
    /// (`RIGUP_API_KEY`, optional `RIGUP_API_URL`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(ENV_API_KEY))?;
        let mut config = Self::new(api_key)?;
        if let Some(url) = lookup(ENV_API_URL) {
            config.api_url =
                Url::parse(&url).map_err(|source| ConfigError::InvalidUrl { url, source })?;
        }
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_transport(mut self, transport: MarketTransport) -> Self {
        self.transport = transport;
        self
    }
}

// The credential must not leak through Debug output or logs.
impl fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .field("transport", &self.transport)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_typed_error() {
        let err = MarketConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(ENV_API_KEY)));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = MarketConfig::from_lookup(|key| {
            (key == ENV_API_KEY).then(|| "   ".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }

    #[test]
    fn url_override_applies() {
        let config = MarketConfig::from_lookup(|key| match key {
            ENV_API_KEY => Some("k".to_string()),
            ENV_API_URL => Some("http://localhost:9100/api/v0".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:9100/api/v0");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = MarketConfig::from_lookup(|key| match key {
            ENV_API_KEY => Some("k".to_string()),
            ENV_API_URL => Some("not a url".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let config = MarketConfig::new("super-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
