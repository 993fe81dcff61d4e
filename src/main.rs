#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use message_store::api::MgmtState;
use message_store::config::Config;
use message_store::{AppBuilder, adapters, telemetry};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    message_store::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app_router, mgmt_app, pool) = async {
        // Phase 1: database and schema. Any failure here is fatal.
        let pool = adapters::database::init_pool(&config.database).await?;
        if config.database.run_migrations {
            message_store::run_migrations(&pool).await?;
        } else {
            tracing::info!("Skipping migrations, schema is managed externally");
        }

        // Phase 2: wiring
        let app = AppBuilder::new(config.clone()).with_database(pool.clone()).build()?;

        // Phase 3: listeners
        let app_router = message_store::api::app_router(app.services);
        let mgmt_app = message_store::api::mgmt_router(MgmtState { health_service: app.health_service });

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        tracing::info!(address = %api_addr, "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        Ok::<_, anyhow::Error>((api_listener, mgmt_listener, app_router, mgmt_app, pool))
    }
    .instrument(boot_span)
    .await?;

    // Phase 4: serve until a shutdown signal arrives
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    message_store::spawn_signal_handler(shutdown_tx.clone());

    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app_router)
        .with_graceful_shutdown(async move {
            let _ = api_rx.wait_for(|&s| s).await;
        })
        .into_future();

    let mut mgmt_rx = shutdown_rx.clone();
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app)
        .with_graceful_shutdown(async move {
            let _ = mgmt_rx.wait_for(|&s| s).await;
        })
        .into_future();

    if let Err(e) = tokio::try_join!(api_server, mgmt_server) {
        tracing::error!(error = %e, "Server error");
    }

    // Phase 5: release connections
    let _ = shutdown_tx.send(true);
    tokio::select! {
        () = pool.close() => {
            tracing::info!("Database pool closed.");
        }
        () = tokio::time::sleep(Duration::from_secs(config.server.shutdown_timeout_secs)) => {
            tracing::warn!("Timeout waiting for database connections to close.");
        }
    }

    telemetry_guard.shutdown();
    Ok(())
}
