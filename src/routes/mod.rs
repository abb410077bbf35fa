// HTTP + WebSocket routes

mod error;
mod gateway;
mod http;
mod ws;

pub use error::{ApiError, MISSING_PUBLIC_KEY};

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::{broadcast, watch};
use tower_http::cors::{Any, CorsLayer};

use crate::models::DashboardViewModel;
use crate::rpc_repo::RpcRepo;
use crate::snapshot_store::SnapshotStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) gateway_rpc: Arc<RpcRepo>,
    pub(crate) snapshots: Arc<SnapshotStore>,
    pub(crate) view_rx: watch::Receiver<DashboardViewModel>,
    pub(crate) updates_tx: broadcast::Sender<DashboardViewModel>,
    pub(crate) dashboard_connections: Arc<AtomicUsize>,
}

/// Shared handles the router needs; built once in main.
pub struct AppDeps {
    /// Client for the gateway routes and wallet balances.
    pub gateway_rpc: Arc<RpcRepo>,
    pub snapshots: Arc<SnapshotStore>,
    pub view_rx: watch::Receiver<DashboardViewModel>,
    pub updates_tx: broadcast::Sender<DashboardViewModel>,
    pub dashboard_connections: Arc<AtomicUsize>,
}

pub fn app(deps: AppDeps) -> Router {
    let state = AppState {
        gateway_rpc: deps.gateway_rpc,
        snapshots: deps.snapshots,
        view_rx: deps.view_rx,
        updates_tx: deps.updates_tx,
        dashboard_connections: deps.dashboard_connections,
    };
    Router::new()
        .route("/", get(http::dashboard_page_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/dashboard", get(http::dashboard_json_handler)) // GET /api/dashboard
        .route("/api/snapshots", get(http::snapshots_handler)) // GET /api/snapshots
        .route("/api/latest-blockhash", get(gateway::latest_blockhash)) // GET /api/latest-blockhash
        .route("/api/slot", get(gateway::slot)) // GET /api/slot
        .route("/api/balance", get(gateway::balance)) // GET /api/balance?publicKey=
        .route("/api/block-height", get(gateway::block_height)) // GET /api/block-height
        .route("/api/epoch-info", get(gateway::epoch_info)) // GET /api/epoch-info
        .route("/api/tps", get(gateway::tps)) // GET /api/tps
        .route("/api/transactions", get(gateway::transactions)) // GET /api/transactions?publicKey=
        .route("/api/vote-accounts", get(gateway::vote_accounts)) // GET /api/vote-accounts
        .route("/ws/dashboard", get(ws::ws_dashboard)) // WS /ws/dashboard
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
