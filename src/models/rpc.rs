// Solana JSON-RPC result payloads and the marketplace collection listing

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcContext {
    pub slot: u64,
}

/// `{ context, value }` wrapper used by getBalance, getSupply, getLatestBlockhash, getAccountInfo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithContext<T> {
    pub context: RpcContext,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochInfo {
    pub epoch: u64,
    /// Current slot relative to the start of the epoch.
    pub slot_index: u64,
    pub slots_in_epoch: u64,
    pub absolute_slot: u64,
    pub block_height: u64,
    #[serde(default)]
    pub transaction_count: Option<u64>,
}

impl EpochInfo {
    pub fn slots_remaining(&self) -> u64 {
        self.slots_in_epoch.saturating_sub(self.slot_index)
    }

    /// Human label for the epoch progress card, e.g. "60 slots".
    pub fn time_remaining(&self) -> String {
        format!("{} slots", self.slots_remaining())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    pub slot: u64,
    pub num_transactions: u64,
    pub num_slots: u64,
    pub sample_period_secs: u16,
    #[serde(default)]
    pub num_non_vote_transactions: Option<u64>,
}

impl PerformanceSample {
    /// Transactions per second over the sample window; 0 for an empty window.
    pub fn tps(&self) -> f64 {
        if self.sample_period_secs == 0 {
            return 0.0;
        }
        self.num_transactions as f64 / self.sample_period_secs as f64
    }
}

/// getSupply value (lamports). Account lists are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supply {
    pub total: u64,
    pub circulating: u64,
    pub non_circulating: u64,
}

/// getAccountInfo value; only the lamports are used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub lamports: u64,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub executable: bool,
}

/// One entry of the marketplace "popular collections" listing.
/// Fields the dashboard does not render are kept in `extra` and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftCollection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub floor_price: Option<f64>,
    #[serde(default)]
    pub volume_all: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Listings sometimes carry `null` for text fields; treat it like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
