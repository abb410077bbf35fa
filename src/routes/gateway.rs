// RPC gateway: one GET route per metric, one upstream call each

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::Value;

use super::AppState;
use super::error::ApiError;
use crate::models::{MetricKind, PublicKey};

type ApiResult = Result<Json<Value>, ApiError>;

#[derive(Debug, Deserialize)]
pub(super) struct PublicKeyQuery {
    #[serde(rename = "publicKey")]
    public_key: Option<String>,
}

impl PublicKeyQuery {
    /// Presence check first, then base58 validation; both before any network call.
    fn require(&self) -> Result<PublicKey, ApiError> {
        match self.public_key.as_deref() {
            None | Some("") => Err(ApiError::MissingPublicKey),
            Some(s) => Ok(s.parse()?),
        }
    }
}

/// Records the snapshot and returns the value as the response body.
async fn respond(state: &AppState, kind: MetricKind, value: Value) -> ApiResult {
    let snapshot = state.snapshots.record(kind, value).await;
    Ok(Json(snapshot.value))
}

fn to_value<T: serde::Serialize>(v: T) -> Result<Value, ApiError> {
    serde_json::to_value(v)
        .map_err(|e| ApiError::Upstream(crate::error::UpstreamError::Malformed(e.to_string())))
}

/// GET /api/latest-blockhash: `{ blockhash, lastValidBlockHeight }`.
pub(super) async fn latest_blockhash(State(state): State<AppState>) -> ApiResult {
    let blockhash = state.gateway_rpc.get_latest_blockhash().await?;
    respond(&state, MetricKind::Blockhash, to_value(blockhash)?).await
}

/// GET /api/slot
pub(super) async fn slot(State(state): State<AppState>) -> ApiResult {
    let slot = state.gateway_rpc.get_slot().await?;
    respond(&state, MetricKind::Slot, Value::from(slot)).await
}

/// GET /api/balance?publicKey=: lamports.
pub(super) async fn balance(
    State(state): State<AppState>,
    Query(query): Query<PublicKeyQuery>,
) -> ApiResult {
    let key = query.require()?;
    let lamports = state.gateway_rpc.get_balance(&key).await?;
    respond(&state, MetricKind::Balance, Value::from(lamports)).await
}

/// GET /api/block-height
pub(super) async fn block_height(State(state): State<AppState>) -> ApiResult {
    let height = state.gateway_rpc.get_block_height().await?;
    respond(&state, MetricKind::BlockHeight, Value::from(height)).await
}

/// GET /api/epoch-info: passed through unchanged.
pub(super) async fn epoch_info(State(state): State<AppState>) -> ApiResult {
    let info = state.gateway_rpc.get_epoch_info_raw().await?;
    respond(&state, MetricKind::EpochInfo, info).await
}

/// GET /api/tps: one TPS value per recent performance sample.
pub(super) async fn tps(State(state): State<AppState>) -> ApiResult {
    let samples = state.gateway_rpc.get_recent_performance_samples().await?;
    let tps: Vec<f64> = samples.iter().map(|s| s.tps()).collect();
    respond(&state, MetricKind::PerformanceSamples, to_value(tps)?).await
}

/// GET /api/transactions?publicKey=: signature records, newest first.
pub(super) async fn transactions(
    State(state): State<AppState>,
    Query(query): Query<PublicKeyQuery>,
) -> ApiResult {
    let key = query.require()?;
    let signatures = state.gateway_rpc.get_signatures_for_address(&key).await?;
    respond(&state, MetricKind::TransactionList, Value::Array(signatures)).await
}

/// GET /api/vote-accounts: passed through unchanged.
pub(super) async fn vote_accounts(State(state): State<AppState>) -> ApiResult {
    let accounts = state.gateway_rpc.get_vote_accounts().await?;
    respond(&state, MetricKind::VoteAccounts, accounts).await
}
