//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed configuration and the provider probe; there is no
//! server-side session state.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::services::provider::{HttpProbe, ProbeError, ProviderProbe};

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub probe: Arc<dyn ProviderProbe>,
}

impl AppState {
    /// State with the real HTTP probe.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] if the HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, ProbeError> {
        let timeout = Duration::from_secs(config.health_timeout_secs);
        let probe = HttpProbe::new(config.provider.clone(), timeout)?;
        Ok(Self::with_probe(config, Arc::new(probe)))
    }

    #[must_use]
    pub fn with_probe(config: AppConfig, probe: Arc<dyn ProviderProbe>) -> Self {
        Self { config: Arc::new(config), probe }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
