// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::Router;
use bloodlink_api::AuthenticationService;
use bloodlink_persistence::Persistence;
use bloodlink_server::handlers::init_local_offset;
use bloodlink_server::{AppState, Config, build_router, cookie_key};
use clap::Parser;
use time::UtcOffset;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let config: Config = Config::parse();

    // Must run before the runtime spawns worker threads
    let offset: UtcOffset = init_local_offset();

    serve(config, offset)
}

#[tokio::main]
async fn serve(config: Config, offset: UtcOffset) -> Result<(), Box<dyn std::error::Error>> {

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(%offset, "Initializing BloodLink server");

    let mut persistence: Persistence = config.database.open()?;

    match AuthenticationService::purge_expired_sessions(&mut persistence) {
        Ok(purged) => info!(purged, "Purged expired sessions"),
        Err(e) => warn!(error = %e, "Failed to purge expired sessions"),
    }

    let app_state: AppState =
        AppState::new(persistence, cookie_key(config.secret_key.as_deref()));

    // Build router
    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = config.listen_addr();
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
