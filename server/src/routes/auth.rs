//! Auth routes. The provider does all credential work; the server only
//! publishes the public connection settings the browser gateway needs.

use axum::extract::State;
use axum::response::Json;
use authflow::gotrue::ProviderSettings;

use crate::state::AppState;

/// `GET /api/auth/config` — provider URL, anon key and OAuth provider.
pub async fn provider_settings(State(state): State<AppState>) -> Json<ProviderSettings> {
    Json(state.config.provider.clone())
}
