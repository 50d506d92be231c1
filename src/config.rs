use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ProviderError, Result};
use crate::powerdns::PowerDnsClient;

pub const API_KEY_ENV: &str = "POWERDNS_API_KEY";
pub const SERVER_URL_ENV: &str = "POWERDNS_SERVER_URL";

/// Provider block as written in configuration. Unset values fall back to
/// the environment.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub server_url: Option<String>, // "http://127.0.0.1:8081/api/v1"
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("server_url", &self.server_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Fully resolved settings, ready to build a client from.
#[derive(Clone)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub server_url: Url,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &"<redacted>")
            .field("server_url", &self.server_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderConfig {
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve`](Self::resolve) with an injectable environment.
    pub fn resolve_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<ResolvedConfig> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| env(API_KEY_ENV))
            .unwrap_or_default();
        if api_key.is_empty() {
            return Err(ProviderError::config(format!(
                "API key is not set; it is required for authentication (set api_key or {API_KEY_ENV})"
            )));
        }

        let server_url = self
            .server_url
            .clone()
            .or_else(|| env(SERVER_URL_ENV))
            .unwrap_or_default();
        if server_url.trim().is_empty() {
            return Err(ProviderError::config(format!(
                "server URL is not set; can't connect to the PowerDNS API (set server_url or {SERVER_URL_ENV})"
            )));
        }
        let server_url = Url::parse(server_url.trim())?;

        Ok(ResolvedConfig {
            api_key,
            server_url,
            timeout: self.timeout_seconds.map(Duration::from_secs),
        })
    }
}

impl ResolvedConfig {
    pub fn build_client(&self) -> Result<PowerDnsClient> {
        let client = PowerDnsClient::from_url(self.server_url.as_str(), self.api_key.clone())?;
        match self.timeout {
            Some(timeout) => client.with_timeout(timeout),
            None => Ok(client),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let config = ProviderConfig {
            api_key: Some("explicit".into()),
            server_url: Some("https://dns.example.net/api/v1".into()),
            timeout_seconds: Some(5),
        };
        let resolved = config
            .resolve_with(env_of(&[
                (API_KEY_ENV, "from-env"),
                (SERVER_URL_ENV, "http://other:8081"),
            ]))
            .unwrap();

        assert_eq!(resolved.api_key, "explicit");
        assert_eq!(resolved.server_url.as_str(), "https://dns.example.net/api/v1");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn environment_fills_missing_values() {
        let resolved = ProviderConfig::default()
            .resolve_with(env_of(&[
                (API_KEY_ENV, "from-env"),
                (SERVER_URL_ENV, "http://127.0.0.1:8081"),
            ]))
            .unwrap();

        assert_eq!(resolved.api_key, "from-env");
        assert_eq!(resolved.server_url.host_str(), Some("127.0.0.1"));
        assert_eq!(resolved.timeout, None);

        let client = resolved.build_client().unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8081/api/v1");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let config = ProviderConfig {
            api_key: Some(String::new()),
            server_url: Some("http://127.0.0.1:8081".into()),
            ..Default::default()
        };
        let err = config.resolve_with(env_of(&[(API_KEY_ENV, "ignored")])).unwrap_err();
        assert!(matches!(err, ProviderError::Config(msg) if msg.contains("API key")));
    }

    #[test]
    fn missing_or_bad_server_url() {
        let config = ProviderConfig {
            api_key: Some("k".into()),
            ..Default::default()
        };
        let err = config.resolve_with(env_of(&[])).unwrap_err();
        assert!(matches!(err, ProviderError::Config(msg) if msg.contains("server URL")));

        let config = ProviderConfig {
            server_url: Some("::not a url::".into()),
            ..config
        };
        assert!(matches!(
            config.resolve_with(env_of(&[])),
            Err(ProviderError::InvalidUrl(_))
        ));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = ProviderConfig {
            api_key: Some("hunter2".into()),
            ..Default::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));

        let resolved = ProviderConfig {
            server_url: Some("http://127.0.0.1:8081".into()),
            ..config
        }
        .resolve_with(env_of(&[]))
        .unwrap();
        let printed = format!("{resolved:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("127.0.0.1:8081"));
    }
}
