// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `itinera serve` command implementation.
//!
//! Opens the SQLite store and the OpenAI provider once, injects both into
//! the gateway state, and serves until SIGINT or SIGTERM.

use std::sync::Arc;

use itinera_config::model::ItineraConfig;
use itinera_core::{ItineraError, PluginAdapter};
use itinera_gateway::{start_server, GatewayState, ServerConfig};
use itinera_openai::OpenAiProvider;
use itinera_storage::SqliteStorage;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `itinera serve` command.
pub async fn run_serve(config: ItineraConfig) -> Result<(), ItineraError> {
    init_tracing(&config.server.log_level);
    info!("starting itinera serve");

    let storage = Arc::new(SqliteStorage::open(config.storage.clone()).await?);

    let provider = Arc::new(OpenAiProvider::new(&config.openai).inspect_err(|_| {
        eprintln!(
            "error: OpenAI API key required. Set via: openai.api_key in itinera.toml, ITINERA_OPENAI_API_KEY, or OPENAI_API_KEY"
        );
    })?);
    info!(model = %config.openai.model, "completion provider ready");

    let state = GatewayState::new(provider.clone(), storage.clone());
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let cancel = shutdown::install_signal_handler();
    let result = start_server(&server_config, state, cancel).await;

    if let Err(e) = provider.shutdown().await {
        warn!(error = %e, "provider shutdown failed");
    }
    if let Err(e) = storage.shutdown().await {
        warn!(error = %e, "storage shutdown failed");
    }

    result?;
    info!("itinera serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("itinera={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
