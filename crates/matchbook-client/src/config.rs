// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_BASE_URL: &str = "https://api.matchbook.dev";

/// Client-side settings. Credentials are deliberately separate; see
/// [`ClientCredentials`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service endpoint; overridable for test servers.
    pub base_url: String,
    /// Timeout for one-shot requests, in seconds.
    pub timeout_secs: u64,
    /// Timeout for stream long-poll pulls, in seconds. Pulls block until an
    /// event is available, so this is much larger than `timeout_secs`.
    pub long_poll_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            long_poll_timeout_secs: 300,
        }
    }
}

impl ClientConfig {
    /// Load configuration from defaults, layered under `matchbook.toml`
    /// (if present) and `MATCHBOOK_`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("matchbook.toml"))
    }

    /// Same layering as [`ClientConfig::load`] with an explicit TOML path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MATCHBOOK_"))
            .extract()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn long_poll_timeout(&self) -> Duration {
        Duration::from_secs(self.long_poll_timeout_secs)
    }
}

/// Credential pair identifying the authenticated catalog. Exchanged once per
/// session for an access token at connect time.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.long_poll_timeout(), Duration::from_secs(300));
    }

    #[test]
    fn test_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MATCHBOOK_BASE_URL", "http://localhost:9999");
            jail.set_env("MATCHBOOK_TIMEOUT_SECS", "5");
            let config = ClientConfig::load().expect("config should load");
            assert_eq!(config.base_url, "http://localhost:9999");
            assert_eq!(config.timeout_secs, 5);
            // Untouched keys keep their defaults.
            assert_eq!(config.long_poll_timeout_secs, 300);
            Ok(())
        });
    }

    #[test]
    fn test_toml_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "matchbook.toml",
                r#"
                base_url = "http://file.example"
                "#,
            )?;
            jail.set_env("MATCHBOOK_BASE_URL", "http://env.example");
            let config = ClientConfig::load().expect("config should load");
            // Env wins over the file.
            assert_eq!(config.base_url, "http://env.example");
            Ok(())
        });
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = ClientCredentials::new("client01", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("client01"));
        assert!(!rendered.contains("hunter2"));
    }
}
