use serde::{Deserialize, Serialize};

use crate::types::{Did, Layer, Timestamp};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreationRecord {
    pub creator: Did,
    pub timestamp: Timestamp,
}

/// A single layer migration. The Bitcoin-specific fields are only populated
/// when `to_layer == Layer::Btco` (§3).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MigrationRecord {
    pub from_layer: Layer,
    pub to_layer: Layer,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal_tx_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inscription_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satoshi: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_tx_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransferRecord {
    pub from: String,
    pub to: String,
    pub timestamp: Timestamp,
    pub tx_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResourceUpdateRecord {
    pub resource_id: String,
    pub from_version: u32,
    pub to_version: u32,
    pub timestamp: Timestamp,
}

/// An append-only record of everything that has happened to an asset, per §3.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ProvenanceChain {
    pub creation: Option<CreationRecord>,
    pub migrations: Vec<MigrationRecord>,
    pub transfers: Vec<TransferRecord>,
    pub resource_updates: Vec<ResourceUpdateRecord>,
}

impl ProvenanceChain {
    pub fn new(creator: Did, timestamp: Timestamp) -> Self {
        Self {
            creation: Some(CreationRecord { creator, timestamp }),
            migrations: Vec::new(),
            transfers: Vec::new(),
            resource_updates: Vec::new(),
        }
    }

    pub fn last_activity(&self) -> Option<Timestamp> {
        let mut latest = self.creation.as_ref().map(|c| c.timestamp);
        for m in &self.migrations {
            latest = Some(latest.map_or(m.timestamp, |l| l.max(m.timestamp)));
        }
        for t in &self.transfers {
            latest = Some(latest.map_or(t.timestamp, |l| l.max(t.timestamp)));
        }
        for r in &self.resource_updates {
            latest = Some(latest.map_or(r.timestamp, |l| l.max(r.timestamp)));
        }
        latest
    }

    /// Migrations must walk the allowed transition graph strictly forward,
    /// never revisiting a layer and never skipping past `Btco`.
    pub fn migrations_are_monotonic(&self) -> bool {
        let mut current: Option<Layer> = self.creation.as_ref().map(|_| Layer::Peer);
        for m in &self.migrations {
            if let Some(cur) = current {
                if m.from_layer != cur || !cur.can_migrate_to(m.to_layer) {
                    return false;
                }
            }
            current = Some(m.to_layer);
        }
        true
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProvenanceSummary {
    pub created: Option<Timestamp>,
    pub creator: Option<Did>,
    pub current_layer: Layer,
    pub migration_count: usize,
    pub transfer_count: usize,
    pub last_activity: Option<Timestamp>,
}
