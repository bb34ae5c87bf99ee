mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let port = config.port;
    tracing::info!(
        provider = %config.provider.url,
        oauth = %config.provider.oauth_provider,
        "auth provider configured"
    );

    let state = state::AppState::new(config).expect("provider probe init failed");
    let app = routes::leptos_app(state).expect("leptos app init failed");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "authflow listening");
    axum::serve(listener, app).await.expect("server failed");
}
