//! Dwntwna completion proxy
//!
//! Serves `POST /api/chat`: forwards the widget's transcript to the LLM
//! provider with the concierge system prompt and relays the reply.

use dwntwna_concierge::api::{app, AppState};
use dwntwna_concierge::config::ProxyConfig;
use dwntwna_concierge::llm::{LoggingService, OpenAIService};
use dwntwna_concierge::proxy::CompletionProxy;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dwntwna_concierge=info,dwntwna_proxy=info,tower_http=debug".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ProxyConfig::from_env();

    // The key is checked per request, so a missing one is only a warning here
    if config.llm.has_api_key() {
        tracing::info!(
            model = %config.llm.model,
            endpoint = %config.llm.endpoint,
            "LLM provider configured"
        );
    } else {
        tracing::warn!("GROQ_API_KEY is not set; chat requests will fail until it is configured");
    }

    let service = OpenAIService::new(&config.llm)?;
    let llm = Arc::new(LoggingService::new(Arc::new(service)));
    let state = AppState::new(CompletionProxy::new(llm));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Dwntwna proxy listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Dwntwna proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
