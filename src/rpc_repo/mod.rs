// Solana JSON-RPC client over a shared reqwest::Client

mod envelope;

use crate::error::UpstreamError;
use crate::models::*;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::instrument;

/// Builds the HTTP client shared by every upstream repo (connection pool reused across calls).
pub fn build_http_client(request_timeout: Duration) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(request_timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;
    Ok(client)
}

pub struct RpcRepo {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcRepo {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One JSON-RPC call. `params` may be `Value::Null` or an empty array for no params.
    #[instrument(skip(self, params), fields(repo = "rpc", url = %self.url))]
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, UpstreamError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = envelope::RpcRequest::new(id, method, &params);
        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Unavailable(format!("HTTP {}", status)));
        }
        let body = response.bytes().await?;
        envelope::decode_response(&body)
    }

    pub async fn get_latest_blockhash(&self) -> Result<LatestBlockhash, UpstreamError> {
        let r: WithContext<LatestBlockhash> = self.call("getLatestBlockhash", Value::Null).await?;
        Ok(r.value)
    }

    pub async fn get_slot(&self) -> Result<u64, UpstreamError> {
        self.call("getSlot", Value::Null).await
    }

    pub async fn get_block_height(&self) -> Result<u64, UpstreamError> {
        self.call("getBlockHeight", Value::Null).await
    }

    /// Raw epoch info object, passed through unchanged.
    pub async fn get_epoch_info_raw(&self) -> Result<Value, UpstreamError> {
        self.call("getEpochInfo", Value::Null).await
    }

    pub async fn get_epoch_info(&self) -> Result<EpochInfo, UpstreamError> {
        self.call("getEpochInfo", Value::Null).await
    }

    /// Lamports held by `key`.
    pub async fn get_balance(&self, key: &PublicKey) -> Result<u64, UpstreamError> {
        let r: WithContext<u64> = self.call("getBalance", json!([key.as_str()])).await?;
        Ok(r.value)
    }

    /// Lamports from getAccountInfo; a missing account counts as 0.
    pub async fn get_account_lamports(&self, key: &PublicKey) -> Result<u64, UpstreamError> {
        let r: WithContext<Option<AccountInfo>> = self
            .call(
                "getAccountInfo",
                json!([key.as_str(), { "encoding": "base64", "dataSlice": { "offset": 0, "length": 0 } }]),
            )
            .await?;
        Ok(r.value.map(|a| a.lamports).unwrap_or(0))
    }

    /// Signature records for `key`, newest first, as returned by the node.
    pub async fn get_signatures_for_address(
        &self,
        key: &PublicKey,
    ) -> Result<Vec<Value>, UpstreamError> {
        self.call("getSignaturesForAddress", json!([key.as_str()]))
            .await
    }

    pub async fn get_vote_accounts(&self) -> Result<Value, UpstreamError> {
        self.call("getVoteAccounts", Value::Null).await
    }

    pub async fn get_recent_performance_samples(
        &self,
    ) -> Result<Vec<PerformanceSample>, UpstreamError> {
        self.call("getRecentPerformanceSamples", Value::Null).await
    }

    pub async fn get_supply(&self) -> Result<Supply, UpstreamError> {
        let r: WithContext<Supply> = self
            .call(
                "getSupply",
                json!([{ "excludeNonCirculatingAccountsList": true }]),
            )
            .await?;
        Ok(r.value)
    }
}
