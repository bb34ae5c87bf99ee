//! Health routes.
//!
//! `GET /api/health` reports provider reachability (200 or 503);
//! `GET /healthz` is bare process liveness.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderCheck {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthChecks {
    pub supabase: ProviderCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub checks: HealthChecks,
}

pub(crate) fn report(provider_up: bool, now: OffsetDateTime) -> (StatusCode, HealthReport) {
    let (code, status, supabase) = if provider_up {
        (StatusCode::OK, HealthStatus::Ok, ProviderCheck::Connected)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Error, ProviderCheck::Disconnected)
    };
    let timestamp = now.format(&Rfc3339).unwrap_or_default();
    (code, HealthReport { status, timestamp, checks: HealthChecks { supabase } })
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let provider_up = match state.probe.check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "auth provider health check failed");
            false
        }
    };
    let (code, body) = report(provider_up, OffsetDateTime::now_utc());
    (code, Json(body))
}

/// `GET /healthz`
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "health_test.rs"]
mod health_test;
