// One RPC result at a point in time

use serde::{Deserialize, Serialize};

/// Which upstream call a snapshot came from; serializes to camelCase JSON (e.g. "blockHeight").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    Blockhash,
    Slot,
    BlockHeight,
    EpochInfo,
    Balance,
    TransactionList,
    VoteAccounts,
    PerformanceSamples,
    Supply,
    NftCollections,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Blockhash => "blockhash",
            MetricKind::Slot => "slot",
            MetricKind::BlockHeight => "blockHeight",
            MetricKind::EpochInfo => "epochInfo",
            MetricKind::Balance => "balance",
            MetricKind::TransactionList => "transactionList",
            MetricKind::VoteAccounts => "voteAccounts",
            MetricKind::PerformanceSamples => "performanceSamples",
            MetricKind::Supply => "supply",
            MetricKind::NftCollections => "nftCollections",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    pub kind: MetricKind,
    pub value: serde_json::Value,
    /// Unix milliseconds.
    pub fetched_at: u64,
}

impl MetricSnapshot {
    pub fn new(kind: MetricKind, value: serde_json::Value) -> Self {
        Self {
            kind,
            value,
            fetched_at: now_ms(),
        }
    }
}

/// Current unix time in milliseconds (0 if the clock is before the epoch).
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
            0
        })
}
