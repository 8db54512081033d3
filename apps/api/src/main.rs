mod advisor;
mod config;
mod engine;
mod errors;
mod llm_client;
mod models;
mod profiles;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::session::ConversationStore;
use crate::advisor::{Advisor, LlmAdvisor, OfflineAdvisor};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::profiles::ProfileStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Credit Coach API v{}", env!("CARGO_PKG_VERSION"));

    let profiles = ProfileStore::load(&config.profiles_path).await?;

    let advisor: Arc<dyn Advisor> = match &config.anthropic_api_key {
        Some(key) if config.llm_enabled() => {
            info!("Advisor using LLM (model: {})", llm_client::MODEL);
            let client = match &config.anthropic_base_url {
                Some(base_url) => LlmClient::with_base_url(key.clone(), base_url),
                None => LlmClient::new(key.clone()),
            };
            Arc::new(LlmAdvisor(client))
        }
        _ => {
            info!("Advisor running offline; replies use fallback advice");
            Arc::new(OfflineAdvisor)
        }
    };

    let conversations =
        ConversationStore::new(config.conversation_ttl, config.max_conversation_messages);

    let state = AppState {
        config: config.clone(),
        profiles: Arc::new(profiles),
        advisor,
        conversations: Arc::new(conversations),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
