use crate::cache::token_cache::TokenCache;
use crate::config::settings::Settings;
use crate::search::executor::SearchExecutor;
use crate::server::routes;
use crate::upstream::client::SoapClient;
use anyhow::Result;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SoapClient>,
    pub tokens: TokenCache,
    pub executor: SearchExecutor,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let client = Arc::new(SoapClient::new(
            &settings.upstream_url,
            settings.search_timeout(),
            settings.token_timeout(),
        ));
        let tokens = TokenCache::new(settings.token_lifetime());
        let executor = SearchExecutor::new(client.clone(), tokens.clone());
        Self { client, tokens, executor }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/token", get(routes::token))
        .route("/search", get(routes::search))
        .route("/codes", get(routes::codes))
        .route("/document/{id}", get(routes::document))
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn start(settings: &Settings) -> Result<()> {
    let state = AppState::new(settings);
    let app = router(state);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.host, settings.port)).await?;
    info!(
        host = %settings.host,
        port = settings.port,
        upstream = %settings.upstream_url,
        "legislatie-proxy listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
