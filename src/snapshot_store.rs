// Latest MetricSnapshot per kind, in memory only

use crate::models::{MetricKind, MetricSnapshot};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct SnapshotStore {
    latest: RwLock<BTreeMap<MetricKind, MetricSnapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` as the newest snapshot of `kind`, replacing any older one.
    pub async fn record(&self, kind: MetricKind, value: serde_json::Value) -> MetricSnapshot {
        let snapshot = MetricSnapshot::new(kind, value);
        self.latest.write().await.insert(kind, snapshot.clone());
        snapshot
    }

    pub async fn get(&self, kind: MetricKind) -> Option<MetricSnapshot> {
        self.latest.read().await.get(&kind).cloned()
    }

    /// All snapshots ordered by kind.
    pub async fn all(&self) -> Vec<MetricSnapshot> {
        self.latest.read().await.values().cloned().collect()
    }
}
