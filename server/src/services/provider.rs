//! Reachability probe for the hosted auth provider.
//!
//! DESIGN
//! ======
//! `/api/health` depends only on the [`ProviderProbe`] trait so handler tests
//! can swap in a fixed answer. [`HttpProbe`] is the real implementation: one
//! `GET {url}/auth/v1/health` with the anon key, bounded by a timeout.

use std::time::Duration;

use authflow::gotrue::{ProviderSettings, WireError};

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(String),
    #[error("invalid provider url: {0}")]
    Url(#[from] WireError),
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider answered {0}")]
    Status(u16),
}

/// Provider liveness check. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ProviderProbe: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`ProbeError`] when the provider is unreachable or unhealthy.
    async fn check(&self) -> Result<(), ProbeError>;
}

pub struct HttpProbe {
    http: reqwest::Client,
    settings: ProviderSettings,
}

impl HttpProbe {
    /// # Errors
    ///
    /// Returns [`ProbeError::HttpClientBuild`] if the TLS backend fails to
    /// initialise.
    pub fn new(settings: ProviderSettings, timeout: Duration) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| ProbeError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, settings })
    }
}

#[async_trait::async_trait]
impl ProviderProbe for HttpProbe {
    async fn check(&self) -> Result<(), ProbeError> {
        let mut request = self.http.get(self.settings.health_url()?);
        for (name, value) in self.settings.headers(None) {
            request = request.header(name, value);
        }
        let resp = request.send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status(resp.status().as_u16()))
        }
    }
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;
