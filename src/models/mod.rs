// Domain models: RPC payloads, metric snapshots, dashboard view model, wallet session

mod dashboard;
mod metric;
mod rpc;
mod wallet;

pub use dashboard::{
    DashboardInputs, DashboardViewModel, DefiVolume, EpochView, NetworkHealth, PingTime,
    SolSupply, TpsPoint, tps_from_samples,
};
pub use metric::{MetricKind, MetricSnapshot, now_ms};
pub use rpc::{
    AccountInfo, EpochInfo, LatestBlockhash, NftCollection, PerformanceSample, RpcContext,
    Supply, WithContext,
};
pub use wallet::{LAMPORTS_PER_SOL, PublicKey, PublicKeyError, WalletSession, lamports_to_sol};
