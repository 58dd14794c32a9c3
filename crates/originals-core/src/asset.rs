use serde::{Deserialize, Serialize};

use crate::credential::VerifiableCredential;
use crate::error::{OriginalsError, Result};
use crate::provenance::{ProvenanceChain, ProvenanceSummary};
use crate::resource::AssetResource;
use crate::types::{Did, Layer};

/// Historical layer identifiers recorded for an asset. Append-only: once a
/// field is `Some`, it must never change (§3 invariant).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Bindings {
    pub peer_did: Option<Did>,
    pub webvh_did: Option<Did>,
    pub btco_did: Option<Did>,
}

impl Bindings {
    pub fn get(&self, layer: Layer) -> Option<&Did> {
        match layer {
            Layer::Peer => self.peer_did.as_ref(),
            Layer::Webvh => self.webvh_did.as_ref(),
            Layer::Btco => self.btco_did.as_ref(),
        }
    }

    /// Set the binding for `layer`, refusing to overwrite an existing value.
    fn set(&mut self, layer: Layer, did: Did) -> Result<()> {
        let slot = match layer {
            Layer::Peer => &mut self.peer_did,
            Layer::Webvh => &mut self.webvh_did,
            Layer::Btco => &mut self.btco_did,
        };
        if slot.is_some() {
            return Err(OriginalsError::conflict(format!(
                "binding for layer {layer} is already set"
            )));
        }
        *slot = Some(did);
        Ok(())
    }
}

/// The kind of event an `OriginalsAsset` emits over its event bus (§4.7).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum AssetEvent {
    Created { id: Did },
    Migrated { from: Layer, to: Layer, did: Did },
    Transferred { tx_id: String },
    ResourceUpdated { resource_id: String },
    CredentialIssued { credential_type: String },
}

/// Closure-based subscriber registry. Each subscriber is a boxed closure
/// accepting a typed event — no inheritance, per §9's re-architecture note.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn Fn(&AssetEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { subscribers: Vec::new() }
    }

    pub fn subscribe<F>(&mut self, f: F)
    where
        F: Fn(&AssetEvent) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(f));
    }

    /// Deliver `event` to every subscriber in registration order. Not
    /// re-entrant: a subscriber must not call back into the emitting asset.
    pub fn emit(&self, event: &AssetEvent) {
        for sub in &self.subscribers {
            sub(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("subscriber_count", &self.subscribers.len()).finish()
    }
}

/// The runtime asset entity described in §3/§4.7.
///
/// Mutation is performed only through the methods below, which are intended
/// to be called exclusively by a `LifecycleManager`; read access is open to
/// any caller. This mirrors the dependency-inversion note in §9: the asset
/// never reaches back into the manager that drives it.
#[derive(Debug)]
pub struct OriginalsAsset {
    id: Did,
    current_layer: Layer,
    resources: Vec<AssetResource>,
    bindings: Bindings,
    credentials: Vec<VerifiableCredential>,
    provenance: ProvenanceChain,
    events: EventBus,
}

impl OriginalsAsset {
    /// Construct a freshly created `did:peer` asset. Only the Lifecycle
    /// Manager's `createDraft` should call this.
    pub fn new_peer(id: Did, resources: Vec<AssetResource>, created_at: crate::types::Timestamp) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for r in &resources {
            if !seen.insert(r.id.clone()) {
                return Err(OriginalsError::validation(format!(
                    "duplicate resource id within asset: {}",
                    r.id
                )));
            }
        }
        let mut bindings = Bindings::default();
        bindings.set(Layer::Peer, id.clone())?;
        Ok(Self {
            id: id.clone(),
            current_layer: Layer::Peer,
            resources,
            bindings,
            credentials: Vec::new(),
            provenance: ProvenanceChain::new(id, created_at),
            events: EventBus::new(),
        })
    }

    // ── Read accessors ───────────────────────────────────────────────────────

    pub fn id(&self) -> &Did {
        &self.id
    }

    pub fn current_layer(&self) -> Layer {
        self.current_layer
    }

    pub fn resources(&self) -> &[AssetResource] {
        &self.resources
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn credentials(&self) -> &[VerifiableCredential] {
        &self.credentials
    }

    pub fn provenance(&self) -> &ProvenanceChain {
        &self.provenance
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn provenance_summary(&self) -> ProvenanceSummary {
        ProvenanceSummary {
            created: self.provenance.creation.as_ref().map(|c| c.timestamp),
            creator: self.provenance.creation.as_ref().map(|c| c.creator.clone()),
            current_layer: self.current_layer,
            migration_count: self.provenance.migrations.len(),
            transfer_count: self.provenance.transfers.len(),
            last_activity: self.provenance.last_activity(),
        }
    }

    // ── Restricted mutation (Lifecycle Manager only) ────────────────────────

    /// Record a completed migration, rebind the new layer's DID, move
    /// `current_layer` forward, and attach the issued credential.
    pub fn apply_migration(
        &mut self,
        record: crate::provenance::MigrationRecord,
        new_did: Did,
        credential: VerifiableCredential,
    ) -> Result<()> {
        if !self.current_layer.can_migrate_to(record.to_layer) || record.from_layer != self.current_layer {
            return Err(OriginalsError::state(format!(
                "illegal transition {} -> {}",
                record.from_layer, record.to_layer
            )));
        }
        self.bindings.set(record.to_layer, new_did.clone())?;
        self.provenance.migrations.push(record.clone());
        self.credentials.push(credential);
        self.current_layer = record.to_layer;
        self.id = new_did.clone();
        self.events.emit(&AssetEvent::Migrated { from: record.from_layer, to: record.to_layer, did: new_did });
        Ok(())
    }

    /// Record a completed ownership transfer. Does not change `id` or
    /// `bindings` — the DID and satoshi never move on transfer (§3, §4.5).
    pub fn apply_transfer(&mut self, record: crate::provenance::TransferRecord, credential: VerifiableCredential) -> Result<()> {
        if self.current_layer != Layer::Btco {
            return Err(OriginalsError::state("transfer requires the asset to be on the btco layer"));
        }
        self.provenance.transfers.push(record.clone());
        self.credentials.push(credential);
        self.events.emit(&AssetEvent::Transferred { tx_id: record.tx_id });
        Ok(())
    }

    pub fn attach_credential(&mut self, credential: VerifiableCredential) {
        let type_name = credential.subtype().map(|t| t.as_str().to_string()).unwrap_or_default();
        self.credentials.push(credential);
        self.events.emit(&AssetEvent::CredentialIssued { credential_type: type_name });
    }

    /// Record that `resource_id`'s bytes are now reachable at `url`. Does not
    /// touch provenance: publishing a resource to a Storage Adapter changes
    /// where it lives, not what it is.
    pub fn set_resource_url(&mut self, resource_id: &str, url: String) -> Result<()> {
        let slot = self
            .resources
            .iter_mut()
            .find(|r| r.id == resource_id)
            .ok_or_else(|| OriginalsError::not_found(format!("resource not found on asset: {resource_id}")))?;
        slot.url = Some(url);
        Ok(())
    }

    pub fn record_resource_update(&mut self, resource: AssetResource, from_version: u32, to_version: u32, timestamp: crate::types::Timestamp) {
        let resource_id = resource.id.clone();
        if let Some(slot) = self.resources.iter_mut().find(|r| r.id == resource.id) {
            *slot = resource;
        } else {
            self.resources.push(resource);
        }
        self.provenance.resource_updates.push(crate::provenance::ResourceUpdateRecord {
            resource_id: resource_id.clone(),
            from_version,
            to_version,
            timestamp,
        });
        self.events.emit(&AssetEvent::ResourceUpdated { resource_id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceType;

    fn sample_resource(id: &str) -> AssetResource {
        AssetResource {
            id: id.to_string(),
            resource_type: ResourceType::Text,
            content_type: "text/plain".to_string(),
            hash: "deadbeef".to_string(),
            size: Some(4),
            url: None,
        }
    }

    #[test]
    fn duplicate_resource_ids_rejected() {
        let res = OriginalsAsset::new_peer(
            "did:peer:abc".to_string(),
            vec![sample_resource("r1"), sample_resource("r1")],
            0,
        );
        assert!(res.is_err());
    }

    #[test]
    fn bindings_are_append_only() {
        let asset = OriginalsAsset::new_peer("did:peer:abc".to_string(), vec![], 0).unwrap();
        assert_eq!(asset.bindings().peer_did.as_deref(), Some("did:peer:abc"));
    }
}
