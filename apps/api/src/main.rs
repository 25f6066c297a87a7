mod config;
mod content;
mod errors;
mod instructions;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::content::models::ContentGoal;
use crate::instructions::{InstructionResolver, InstructionSelector};
use crate::llm_client::ProviderClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting UMKM Content API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize provider client
    let provider = ProviderClient::gemini(&config.gemini_api_base);
    info!(
        "Provider client initialized (model: {}, secondary key: {})",
        llm_client::MODEL,
        if config.gemini_api_key_secondary.is_some() { "configured" } else { "none" }
    );

    // Initialize instruction resolver
    let roots = if config.instruction_dirs.is_empty() {
        InstructionResolver::default_roots()
    } else {
        config.instruction_dirs.clone()
    };
    let resolver = InstructionResolver::new(roots);
    info!("Instruction roots: {:?}", resolver.roots());
    for goal in ContentGoal::ALL {
        if let Err(e) = resolver.resolve(InstructionSelector::Goal(goal)).await {
            warn!("No template for goal '{}': {e:?}", goal.id());
        }
    }

    // Build app state
    let state = AppState {
        provider,
        resolver,
        credentials: config.credentials(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the dashboard origin once it is deployed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
