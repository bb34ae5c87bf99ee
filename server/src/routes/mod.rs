//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the small HTTP API (health and public auth settings)
//! and stitches it with Leptos SSR rendering under a single Axum router.
//! All credential traffic goes from the browser straight to the auth
//! provider; nothing here touches tokens.

pub mod auth;
pub mod health;

use std::path::PathBuf;

use axum::Router;
use axum::routing::get;
use authflow::gotrue::SETTINGS_PATH;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
pub(crate) fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route(SETTINGS_PATH, get(auth::provider_settings))
        .route("/healthz", get(health::healthz))
        .with_state(state)
}

/// Full app: API routes + Leptos SSR pages + `/pkg` static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new()))
}
