// Background dashboard poller.
// Each tick fires the whole RPC batch concurrently; the view model is only replaced when every call succeeds.

use crate::error::UpstreamError;
use crate::marketplace_repo::MarketplaceRepo;
use crate::models::{DashboardInputs, DashboardViewModel, MetricKind, now_ms};
use crate::rpc_repo::RpcRepo;
use crate::snapshot_store::SnapshotStore;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::{broadcast, watch};
use tokio::time::{Duration, Instant, interval};
use tracing::Instrument;

/// Message shown to users when a poll batch fails; detail goes to the log.
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching data";

/// Rate limit for the "no receivers" notice (avoid logging every tick when no one is on /ws/dashboard)
const NO_RECEIVERS_WARN_INTERVAL: Duration = Duration::from_secs(60);

/// Upstream clients, channels, and shutdown for the poller.
pub struct PollerDeps {
    pub rpc: Arc<RpcRepo>,
    pub marketplace: Arc<MarketplaceRepo>,
    pub snapshots: Arc<SnapshotStore>,
    pub view_tx: watch::Sender<DashboardViewModel>,
    pub updates_tx: broadcast::Sender<DashboardViewModel>,
    pub dashboard_connections: Arc<AtomicUsize>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct PollerConfig {
    pub interval_ms: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Runs the full batch concurrently. The first failure aborts the batch.
pub async fn fetch_batch(
    rpc: &RpcRepo,
    marketplace: &MarketplaceRepo,
) -> Result<DashboardInputs, UpstreamError> {
    let (supply, epoch_info, block_height, slot, performance_samples, nft_collections) = tokio::try_join!(
        rpc.get_supply(),
        rpc.get_epoch_info(),
        rpc.get_block_height(),
        rpc.get_slot(),
        rpc.get_recent_performance_samples(),
        marketplace.popular_collections(),
    )?;
    Ok(DashboardInputs {
        supply,
        epoch_info,
        block_height,
        slot,
        performance_samples,
        nft_collections,
    })
}

async fn record_snapshots(snapshots: &SnapshotStore, inputs: &DashboardInputs) {
    let entries = [
        (MetricKind::Supply, serde_json::to_value(&inputs.supply)),
        (MetricKind::EpochInfo, serde_json::to_value(&inputs.epoch_info)),
        (MetricKind::BlockHeight, serde_json::to_value(inputs.block_height)),
        (MetricKind::Slot, serde_json::to_value(inputs.slot)),
        (
            MetricKind::PerformanceSamples,
            serde_json::to_value(&inputs.performance_samples),
        ),
        (
            MetricKind::NftCollections,
            serde_json::to_value(&inputs.nft_collections),
        ),
    ];
    for (kind, value) in entries {
        match value {
            Ok(v) => {
                snapshots.record(kind, v).await;
            }
            Err(e) => tracing::warn!(error = %e, kind = %kind, "snapshot encode failed"),
        }
    }
}

/// Result of one poll: the view model to publish, and the failure if the batch was discarded.
pub struct PollOutcome {
    pub view: DashboardViewModel,
    pub error: Option<UpstreamError>,
}

/// One poll. On failure the view is `previous` with the error flag set; no partial merge.
pub async fn run_one_poll(
    rpc: &RpcRepo,
    marketplace: &MarketplaceRepo,
    snapshots: &SnapshotStore,
    previous: &DashboardViewModel,
) -> PollOutcome {
    match fetch_batch(rpc, marketplace).await {
        Ok(inputs) => {
            record_snapshots(snapshots, &inputs).await;
            PollOutcome {
                view: DashboardViewModel::from_inputs(inputs, now_ms()),
                error: None,
            }
        }
        Err(e) => PollOutcome {
            view: previous.with_error(FETCH_ERROR_MESSAGE),
            error: Some(e),
        },
    }
}

pub fn spawn(deps: PollerDeps, config: PollerConfig) -> tokio::task::JoinHandle<()> {
    let PollerDeps {
        rpc,
        marketplace,
        snapshots,
        view_tx,
        updates_tx,
        dashboard_connections,
        mut shutdown_rx,
    } = deps;
    let PollerConfig {
        interval_ms,
        stats_log_interval_secs,
    } = config;

    let stats_log_interval = Duration::from_secs(stats_log_interval_secs);

    let poller_span = tracing::debug_span!("poller", interval_ms);
    tokio::spawn(
        async move {
            let mut tick = interval(Duration::from_millis(interval_ms));
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut stats_log_tick = interval(stats_log_interval);
            stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            let mut polls_ok_total: u64 = 0;
            let mut polls_failed_total: u64 = 0;
            let mut last_no_receivers_warn: Option<Instant> = None;

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        let previous = view_tx.borrow().clone();
                        let PollOutcome { view: next, error } =
                            run_one_poll(&rpc, &marketplace, &snapshots, &previous).await;
                        match error {
                            None => {
                                polls_ok_total += 1;
                                tracing::debug!(
                                    operation = "poll",
                                    block_height = next.network.block_height,
                                    slot = next.network.slot_height,
                                    tps = next.network.tps,
                                    "dashboard updated"
                                );
                            }
                            Some(e) => {
                                polls_failed_total += 1;
                                tracing::warn!(
                                    error = %e,
                                    kind = e.kind(),
                                    operation = "poll",
                                    "dashboard poll failed; keeping previous view"
                                );
                            }
                        }

                        view_tx.send_replace(next.clone());
                        if updates_tx.send(next).is_err() {
                            let should_warn = last_no_receivers_warn
                                .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_WARN_INTERVAL);
                            if should_warn {
                                tracing::debug!(
                                    operation = "broadcast_dashboard",
                                    "No active WebSocket clients; broadcast channel has no receivers"
                                );
                                last_no_receivers_warn = Some(Instant::now());
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Poller shutting down");
                        break;
                    }
                    _ = stats_log_tick.tick() => {
                        tracing::info!(
                            dashboard_clients =
                                dashboard_connections.load(std::sync::atomic::Ordering::Relaxed),
                            polls_ok_total,
                            polls_failed_total,
                            "app stats"
                        );
                    }
                }
            }
        }
        .instrument(poller_span),
    )
}
