use std::collections::HashMap;
use std::sync::Mutex;

use originals_core::provenance::MigrationRecord;

/// Process-local, per-asset migration history, keyed by the asset's origin
/// (`did:peer`) identifier — the one label that never changes across layer
/// migrations, per §4.6.
#[derive(Default)]
pub struct MigrationManager {
    histories: Mutex<HashMap<String, Vec<MigrationRecord>>>,
}

impl MigrationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, origin_id: &str, record: MigrationRecord) {
        let mut histories = self.histories.lock().unwrap_or_else(|e| e.into_inner());
        histories.entry(origin_id.to_string()).or_default().push(record);
    }

    /// Synchronous lookup of everything recorded for `origin_id`, oldest first.
    pub fn get_migration_history(&self, origin_id: &str) -> Vec<MigrationRecord> {
        let histories = self.histories.lock().unwrap_or_else(|e| e.into_inner());
        histories.get(origin_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_core::Layer;

    fn record(from: Layer, to: Layer) -> MigrationRecord {
        MigrationRecord { from_layer: from, to_layer: to, timestamp: 0, reveal_tx_id: None, inscription_id: None, satoshi: None, fee_rate: None, commit_tx_id: None }
    }

    #[test]
    fn history_accumulates_per_origin_id() {
        let manager = MigrationManager::new();
        manager.record("did:peer:abc", record(Layer::Peer, Layer::Webvh));
        manager.record("did:peer:abc", record(Layer::Webvh, Layer::Btco));
        manager.record("did:peer:def", record(Layer::Peer, Layer::Btco));

        assert_eq!(manager.get_migration_history("did:peer:abc").len(), 2);
        assert_eq!(manager.get_migration_history("did:peer:def").len(), 1);
        assert!(manager.get_migration_history("did:peer:unknown").is_empty());
    }
}
