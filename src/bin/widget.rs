//! Dwntwna chat widget
//!
//! Terminal front end for the concierge. Talks to a running `dwntwna-proxy`.

use dwntwna_concierge::config::WidgetConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = WidgetConfig::from_env();

    // The terminal belongs to the UI, so logs only go to a file when asked
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "dwntwna_concierge=info".into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    }

    dwntwna_concierge::widget::run(&config).await
}
