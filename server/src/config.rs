//! Server configuration parsed from environment variables.

use authflow::gotrue::ProviderSettings;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_OAUTH_PROVIDER: &str = "google";
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is required")]
    Missing { var: &'static str },
    #[error("{var} is invalid: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Public provider settings; also served to the browser verbatim.
    pub provider: ProviderSettings,
    pub port: u16,
    pub health_timeout_secs: u64,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL`: base URL of the hosted auth provider
    /// - `SUPABASE_ANON_KEY`: public API key sent as `apikey`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `AUTH_OAUTH_PROVIDER`: default `google`
    /// - `HEALTH_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let url = get("SUPABASE_URL")
            .ok_or(ConfigError::Missing { var: "SUPABASE_URL" })?
            .trim_end_matches('/')
            .to_owned();
        let anon_key = get("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing { var: "SUPABASE_ANON_KEY" })?;
        let oauth_provider = get("AUTH_OAUTH_PROVIDER")
            .unwrap_or_else(|| DEFAULT_OAUTH_PROVIDER.to_owned())
            .to_ascii_lowercase();
        let provider = ProviderSettings { url, anon_key, oauth_provider };
        if provider.health_url().is_err() || !provider.url.starts_with("http") {
            return Err(ConfigError::Invalid { var: "SUPABASE_URL", value: provider.url });
        }

        let port = match get("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
        };
        let health_timeout_secs = match get("HEALTH_TIMEOUT_SECS") {
            None => DEFAULT_HEALTH_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::Invalid { var: "HEALTH_TIMEOUT_SECS", value: raw }),
            },
        };

        Ok(Self { provider, port, health_timeout_secs })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
