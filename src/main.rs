// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use token_sweeper::{
    api::router,
    config::{bind_address_from_env, SweepConfig},
    logging::{self, LogFormat},
    state::{AppState, AuthConfig},
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init(LogFormat::from_env());

    let config = SweepConfig::from_env();
    match &config {
        Ok(config) => info!(
            network = config.network.name,
            chain_id = config.network.chain_id,
            wallet = %config.credential.address(),
            destination = %config.destination,
            "Sweep configuration loaded"
        ),
        Err(e) => error!(error = %e, "Sweep configuration invalid; requests will fail until fixed"),
    }

    let auth_config = AuthConfig::from_env();
    if auth_config.api_secret.is_none() {
        warn!("API_SECRET not set; every request will be rejected");
    }

    let app = router(AppState::from_config(config).with_auth_config(auth_config));

    let addr = match bind_address_from_env() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid bind address");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    info!(%addr, "Token sweeper listening (docs at /docs)");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown.cancelled_owned());
    if let Err(e) = server.await {
        error!(error = %e, "HTTP server failed");
        std::process::exit(1);
    }

    info!("Server stopped");
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM.
async fn watch_signals(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received; finishing in-flight requests");
    shutdown.cancel();
}
