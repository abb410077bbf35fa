// Dashboard view model: latest poll results plus derived fields.
// Default is the all-zero placeholder so the page renders before the first poll lands.

use serde::{Deserialize, Serialize};

use super::{EpochInfo, NftCollection, PerformanceSample, Supply};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolSupply {
    pub circulating: u64,
    pub non_circulating: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochView {
    /// `[slotIndex, slotsInEpoch]`.
    pub slot_range: [u64; 2],
    pub time_remaining: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkHealth {
    pub block_height: u64,
    pub slot_height: u64,
    pub tps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefiVolume {
    pub name: String,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingTime {
    pub name: String,
    pub time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TpsPoint {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewModel {
    pub sol_supply: SolSupply,
    pub epoch: EpochView,
    pub network: NetworkHealth,
    pub nft_dashboard: Vec<NftCollection>,
    /// Placeholder dataset; no upstream source is wired up.
    pub defi_dashboard: Vec<DefiVolume>,
    pub tps_data: Vec<TpsPoint>,
    /// Placeholder dataset; no upstream source is wired up.
    pub ping_time: Vec<PingTime>,
    /// User-facing message set when the last poll failed.
    #[serde(default)]
    pub error: Option<String>,
    /// Unix ms of the last successful poll; 0 = never.
    #[serde(default)]
    pub updated_at: u64,
}

/// Results of one complete poll batch.
#[derive(Debug, Clone)]
pub struct DashboardInputs {
    pub supply: Supply,
    pub epoch_info: EpochInfo,
    pub block_height: u64,
    pub slot: u64,
    pub performance_samples: Vec<PerformanceSample>,
    pub nft_collections: Vec<NftCollection>,
}

/// TPS of the most recent sample (the RPC returns newest first).
/// An empty sample list yields 0 instead of failing the poll batch.
pub fn tps_from_samples(samples: &[PerformanceSample]) -> f64 {
    samples.first().map(PerformanceSample::tps).unwrap_or(0.0)
}

impl DashboardViewModel {
    pub fn from_inputs(inputs: DashboardInputs, updated_at: u64) -> Self {
        let tps = tps_from_samples(&inputs.performance_samples);
        Self {
            sol_supply: SolSupply {
                circulating: inputs.supply.circulating,
                non_circulating: inputs.supply.non_circulating,
            },
            epoch: EpochView {
                slot_range: [inputs.epoch_info.slot_index, inputs.epoch_info.slots_in_epoch],
                time_remaining: inputs.epoch_info.time_remaining(),
            },
            network: NetworkHealth {
                block_height: inputs.block_height,
                slot_height: inputs.slot,
                tps,
            },
            nft_dashboard: inputs.nft_collections,
            defi_dashboard: placeholder_defi_volumes(),
            tps_data: vec![TpsPoint {
                name: "TPS".into(),
                value: tps,
            }],
            ping_time: placeholder_ping_times(),
            error: None,
            updated_at,
        }
    }

    /// Same data, with the error flag set. Used when a poll batch fails.
    pub fn with_error(&self, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..self.clone()
        }
    }

    /// True until the first successful poll has filled in network health.
    pub fn is_loading(&self) -> bool {
        self.network.block_height == 0
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// First `n` collections in upstream order.
    pub fn top_collections(&self, n: usize) -> &[NftCollection] {
        &self.nft_dashboard[..self.nft_dashboard.len().min(n)]
    }
}

fn placeholder_defi_volumes() -> Vec<DefiVolume> {
    vec![
        DefiVolume {
            name: "AMM 1".into(),
            volume: 1_000_000,
        },
        DefiVolume {
            name: "AMM 2".into(),
            volume: 800_000,
        },
    ]
}

fn placeholder_ping_times() -> Vec<PingTime> {
    vec![
        PingTime {
            name: "Node 1".into(),
            time: 50,
        },
        PingTime {
            name: "Node 2".into(),
            time: 45,
        },
    ]
}
