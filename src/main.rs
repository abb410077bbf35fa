use anyhow::Result;
use solana_dashboard::*;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        gateway_url = %app_config.rpc.gateway_url,
        dashboard_url = %app_config.rpc.dashboard_url,
        interval_ms = app_config.polling.interval_ms,
        "{} {} starting",
        version::NAME,
        version::VERSION
    );

    let http = rpc_repo::build_http_client(Duration::from_millis(
        app_config.rpc.request_timeout_ms,
    ))?;
    let gateway_rpc = Arc::new(rpc_repo::RpcRepo::new(
        http.clone(),
        app_config.rpc.gateway_url.clone(),
    ));
    let dashboard_rpc = Arc::new(rpc_repo::RpcRepo::new(
        http.clone(),
        app_config.rpc.dashboard_url.clone(),
    ));
    let marketplace = Arc::new(marketplace_repo::MarketplaceRepo::new(
        http,
        app_config.rpc.marketplace_url.clone(),
    ));
    let snapshots = Arc::new(snapshot_store::SnapshotStore::new());

    let (view_tx, view_rx) = watch::channel(models::DashboardViewModel::default());
    let (updates_tx, _) = broadcast::channel::<models::DashboardViewModel>(
        app_config.polling.broadcast_capacity,
    );
    let dashboard_connections = Arc::new(AtomicUsize::new(0));
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let poller_handle = poller::spawn(
        poller::PollerDeps {
            rpc: dashboard_rpc,
            marketplace,
            snapshots: snapshots.clone(),
            view_tx,
            updates_tx: updates_tx.clone(),
            dashboard_connections: dashboard_connections.clone(),
            shutdown_rx,
        },
        poller::PollerConfig {
            interval_ms: app_config.polling.interval_ms,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    let app = routes::app(routes::AppDeps {
        gateway_rpc,
        snapshots,
        view_rx,
        updates_tx,
        dashboard_connections,
    });
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
            let _ = poller_handle.await;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
