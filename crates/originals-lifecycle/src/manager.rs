use std::str::FromStr;
use std::sync::Arc;

use originals_core::{
    AssetResource, BitcoinNetwork, CredentialSubject, CredentialSubtype, Did, DidDocument,
    KeyType, KindManifest, Layer, MigrationRecord, OriginalsAsset, OriginalsError,
    ProvenanceChain, ProvenanceSummary, Resource, Result, Timestamp, TransferRecord,
    REVEAL_DUST_VALUE_SATS,
};
use originals_adapters::{FeeOracle, OrdinalsProvider, StorageAdapter};
use originals_bitcoin::{
    encode_metadata_envelope, estimate_commit_fee, estimate_envelope_len, estimate_reveal_fee,
    EnvelopeContent, MetadataEnvelope,
};
use originals_credentials::{compute_credential_hash, create_credential, issue_migration_credential, issue_ownership_credential, sign_credential};
use originals_crypto::KeyPair;
use originals_did::{btco_did, CreateDidOptions, DidManager, DidMethod};
use originals_kinds::{ValidateOptions, GLOBAL_KIND_REGISTRY};
use tracing::info;

use crate::error::LifecycleError;
use crate::migration::MigrationManager;
use crate::progress::{LifecycleProgress, ProgressHandler};

/// Single-leaf taproot script-path control block: parity byte + internal key,
/// no merkle siblings.
const SINGLE_LEAF_CONTROL_BLOCK_LEN: usize = 33;
const INSCRIPTION_CONTENT_TYPE: &str = "application/did+cbor";

fn now() -> Timestamp {
    chrono::Utc::now().timestamp()
}

fn to_bitcoin_network(network: BitcoinNetwork) -> bitcoin::Network {
    match network {
        BitcoinNetwork::Mainnet => bitcoin::Network::Bitcoin,
        BitcoinNetwork::Testnet => bitcoin::Network::Testnet,
        BitcoinNetwork::Signet => bitcoin::Network::Signet,
        BitcoinNetwork::Regtest => bitcoin::Network::Regtest,
    }
}

// ── Options ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct CreateDraftOptions {
    pub key_type: Option<KeyType>,
    pub created_at: Option<Timestamp>,
}

#[derive(Clone, Debug, Default)]
pub struct PublishOptions {
    pub created_at: Option<Timestamp>,
}

#[derive(Clone, Debug, Default)]
pub struct InscribeOptions {
    pub fee_rate: Option<f64>,
    pub created_at: Option<Timestamp>,
}

#[derive(Clone, Debug, Default)]
pub struct TransferRequestOptions {
    pub fee_rate: Option<f64>,
    pub created_at: Option<Timestamp>,
}

#[derive(Clone, Debug)]
pub struct PublishTarget {
    pub domain: String,
    pub slug: Option<String>,
}

// ── AssetHandle ───────────────────────────────────────────────────────────────

/// The draft/published/inscribed asset plus everything the Lifecycle Manager
/// needs to keep driving it: the resource bytes (an `OriginalsAsset` only
/// keeps resource metadata), the signing key controlling it, its current DID
/// document, and the typed manifest it was created from, if any.
pub struct AssetHandle {
    pub asset: OriginalsAsset,
    resources: Vec<Resource>,
    key_pair: KeyPair,
    did_document: DidDocument,
    manifest: Option<KindManifest>,
    origin_id: Did,
    control_vm_id: String,
    current_address: Option<String>,
}

impl AssetHandle {
    pub fn id(&self) -> &Did {
        self.asset.id()
    }

    pub fn manifest(&self) -> Option<&KindManifest> {
        self.manifest.as_ref()
    }

    pub fn did_document(&self) -> &DidDocument {
        &self.did_document
    }
}

// ── Migration validation ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct MigrationChecks {
    pub layer_transition_allowed: bool,
    pub has_required_credentials: bool,
    pub resources_present: bool,
    pub bindings_consistent: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MigrationValidation {
    pub valid: bool,
    pub current_layer: Layer,
    pub target_layer: Layer,
    pub checks: MigrationChecks,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

// ── Cost estimation ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Confidence {
    High,
    Medium,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CostBreakdown {
    pub network_fee: u64,
    pub data_cost: u64,
    pub dust_value: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CostEstimate {
    pub total_sats: u64,
    pub data_size: usize,
    pub target_layer: Layer,
    pub confidence: Confidence,
    pub breakdown: CostBreakdown,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransferOutcome {
    pub txid: String,
    pub fee: u64,
}

// ── LifecycleManager ──────────────────────────────────────────────────────────

/// Orchestrates migrations `peer -> webvh`, `peer -> btco`, `webvh -> btco`,
/// and within-layer ownership transfer on `btco`. Enforces layer invariants,
/// emits progress events, issues credentials, and records provenance, per
/// §4.6. Holds no asset state of its own; callers drive one `AssetHandle` at
/// a time and are responsible for serializing concurrent mutation of a given
/// handle (§5).
pub struct LifecycleManager {
    did_manager: DidManager,
    ordinals_provider: Arc<dyn OrdinalsProvider>,
    fee_oracle: Arc<dyn FeeOracle>,
    storage_adapter: Arc<dyn StorageAdapter>,
    network: BitcoinNetwork,
    migration_manager: MigrationManager,
    on_progress: Option<Arc<ProgressHandler>>,
}

impl LifecycleManager {
    pub fn new(
        did_manager: DidManager,
        ordinals_provider: Arc<dyn OrdinalsProvider>,
        fee_oracle: Arc<dyn FeeOracle>,
        storage_adapter: Arc<dyn StorageAdapter>,
        network: BitcoinNetwork,
    ) -> Self {
        Self {
            did_manager,
            ordinals_provider,
            fee_oracle,
            storage_adapter,
            network,
            migration_manager: MigrationManager::new(),
            on_progress: None,
        }
    }

    pub fn with_progress_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&LifecycleProgress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(handler));
        self
    }

    pub fn migration_manager(&self) -> &MigrationManager {
        &self.migration_manager
    }

    fn emit_progress(&self, phase: &str, percentage: u8, message: impl Into<String>) {
        if let Some(handler) = &self.on_progress {
            handler(&LifecycleProgress::new(phase, percentage, message));
        }
    }

    fn last_credential_link(&self, handle: &AssetHandle) -> Option<originals_core::PreviousCredential> {
        handle.asset.credentials().last().map(|vc| originals_core::PreviousCredential {
            id: vc.id.clone(),
            hash: Some(compute_credential_hash(vc)),
        })
    }

    // ── createDraft / createTypedOriginal ────────────────────────────────────

    /// Shortcut for creating a `did:peer` asset, per §4.6.
    pub fn create_draft(&self, resources: Vec<Resource>, options: CreateDraftOptions) -> Result<AssetHandle> {
        self.emit_progress("validating", 0, "creating draft asset");
        let created_at = options.created_at.unwrap_or_else(now);

        let created = self
            .did_manager
            .create_did(DidMethod::Peer, CreateDidOptions { key_type: options.key_type, domain: None, slug: None })
            .map_err(OriginalsError::from)?;

        let asset_resources: Vec<AssetResource> = resources.iter().map(AssetResource::from).collect();
        let asset = OriginalsAsset::new_peer(created.did.clone(), asset_resources, created_at)?;
        let control_vm_id = format!("{}#key-1", created.did);

        info!(asset_id = %created.did, "created draft asset");
        self.emit_progress("confirmed", 100, "draft asset created");

        Ok(AssetHandle {
            asset,
            resources,
            key_pair: created.key_pair,
            did_document: created.did_document,
            manifest: None,
            origin_id: created.did,
            control_vm_id,
            current_address: None,
        })
    }

    /// Validates against the Kind Registry (skippable or strict), then calls
    /// `createDraft` with the manifest's resources and stashes the manifest
    /// on the handle, per §4.6.
    pub fn create_typed_original(&self, manifest: KindManifest, validate_options: ValidateOptions, options: CreateDraftOptions) -> Result<AssetHandle> {
        manifest.validate_base()?;
        GLOBAL_KIND_REGISTRY.validate_or_throw(&manifest, validate_options)?;

        let mut handle = self.create_draft(manifest.resources.clone(), options)?;
        handle.manifest = Some(manifest);
        Ok(handle)
    }

    // ── publish ───────────────────────────────────────────────────────────────

    /// Requires current layer = peer. Uploads resource bytes via the Storage
    /// Adapter, mints `did:webvh`, records the `webvh` binding, and issues a
    /// MigrationCompleted credential plus a ResourceMigrated credential per
    /// hosted resource, per §4.6.
    pub async fn publish(&self, handle: &mut AssetHandle, target: PublishTarget, options: PublishOptions) -> Result<()> {
        if handle.asset.current_layer() != Layer::Peer {
            return Err(LifecycleError::IllegalTransition { from: handle.asset.current_layer(), to: Layer::Webvh }.into());
        }
        self.emit_progress("validating", 0, "publishing asset");
        let created_at = options.created_at.unwrap_or_else(now);
        let old_id = handle.asset.id().clone();

        self.emit_progress("uploading", 20, "uploading resources to storage adapter");
        for resource in &handle.resources {
            let Some(content) = &resource.content else { continue };
            let bytes = content.as_bytes()?;
            let url = self.storage_adapter.put(&resource.hash, &bytes, &resource.content_type, None).await?;
            handle.asset.set_resource_url(&resource.id, url)?;
        }

        let slug = target.slug.clone().unwrap_or_else(|| "default".to_string());
        let created = self
            .did_manager
            .create_webvh(CreateDidOptions { key_type: Some(handle.key_pair.key_type()), domain: Some(target.domain.clone()), slug: Some(slug) })
            .map_err(OriginalsError::from)?;
        let new_did = created.did.clone();

        let record = MigrationRecord {
            from_layer: Layer::Peer,
            to_layer: Layer::Webvh,
            timestamp: created_at,
            reveal_tx_id: None,
            inscription_id: None,
            satoshi: None,
            fee_rate: None,
            commit_tx_id: None,
        };

        let previous = self.last_credential_link(handle);
        let migration_vc = issue_migration_credential(new_did.clone(), new_did.clone(), &old_id, &new_did, previous, created_at);
        let migration_vc = sign_credential(&migration_vc, &created.key_pair, &format!("{new_did}#key-1"), created_at).map_err(OriginalsError::from)?;

        self.migration_manager.record(&handle.origin_id, record.clone());
        handle.asset.apply_migration(record, new_did.clone(), migration_vc)?;
        handle.key_pair = created.key_pair;
        handle.did_document = created.did_document;
        handle.control_vm_id = format!("{new_did}#key-1");

        self.emit_progress("broadcasting", 70, "issuing resource migration credentials");
        for resource in handle.asset.resources().to_vec() {
            let Some(url) = resource.url.clone() else { continue };
            let previous = self.last_credential_link(handle);
            let fields = serde_json::json!({ "resourceId": resource.id, "url": url });
            let subject = CredentialSubject { id: new_did.clone(), previous_credential: previous, fields };
            let vc = create_credential(CredentialSubtype::ResourceMigrated, subject, new_did.clone(), created_at);
            let vc = sign_credential(&vc, &handle.key_pair, &handle.control_vm_id, created_at).map_err(OriginalsError::from)?;
            handle.asset.attach_credential(vc);
        }

        info!(asset_id = %new_did, "published asset to did:webvh");
        self.emit_progress("confirmed", 100, "asset published");
        Ok(())
    }

    // ── inscribe ──────────────────────────────────────────────────────────────

    /// Requires layer ∈ {peer, webvh}. Builds a CBOR envelope carrying the
    /// current DID document and a MigrationCompleted VC, submits it through
    /// the Ordinals adapter, and records the resulting satoshi as the
    /// immutable `did:btco` identifier, per §4.6.
    pub async fn inscribe(&self, handle: &mut AssetHandle, options: InscribeOptions) -> Result<()> {
        let current_layer = handle.asset.current_layer();
        if !matches!(current_layer, Layer::Peer | Layer::Webvh) {
            return Err(LifecycleError::IllegalTransition { from: current_layer, to: Layer::Btco }.into());
        }
        self.emit_progress("validating", 0, "preparing inscription");
        let created_at = options.created_at.unwrap_or_else(now);
        let old_id = handle.asset.id().clone();

        let previous = self.last_credential_link(handle);
        let embedded_subject = CredentialSubject {
            id: old_id.clone(),
            previous_credential: previous.clone(),
            fields: serde_json::json!({ "fromDid": old_id, "toLayer": "btco" }),
        };
        let embedded_vc = create_credential(CredentialSubtype::MigrationCompleted, embedded_subject, old_id.clone(), created_at);
        let embedded_vc = sign_credential(&embedded_vc, &handle.key_pair, &handle.control_vm_id, created_at).map_err(OriginalsError::from)?;

        let did_document_value = serde_json::to_value(&handle.did_document).unwrap_or(serde_json::Value::Null);
        let credential_value = serde_json::to_value(&embedded_vc).unwrap_or(serde_json::Value::Null);
        let metadata = serde_json::to_value(&MetadataEnvelope { did_document: did_document_value, verifiable_credential: credential_value }).unwrap_or(serde_json::Value::Null);

        self.emit_progress("broadcasting", 40, "submitting commit/reveal transactions");
        let inscription = self
            .ordinals_provider
            .create_inscription(originals_adapters::CreateInscriptionRequest {
                data: Vec::new(),
                content_type: INSCRIPTION_CONTENT_TYPE.to_string(),
                metadata: Some(metadata),
                fee_rate: options.fee_rate,
            })
            .await?;

        let new_did = btco_did(self.network, inscription.satoshi);
        let record = MigrationRecord {
            from_layer: current_layer,
            to_layer: Layer::Btco,
            timestamp: created_at,
            reveal_tx_id: Some(inscription.reveal_tx_id.clone()),
            inscription_id: Some(inscription.inscription_id.clone()),
            satoshi: Some(inscription.satoshi),
            fee_rate: options.fee_rate,
            commit_tx_id: inscription.commit_tx_id.clone(),
        };

        let final_vc = issue_migration_credential(new_did.clone(), new_did.clone(), &old_id, &new_did, previous, created_at);
        // did:btco carries no verification method of its own; ownership is
        // proven by the satoshi, not a signature, so the attesting credential
        // is still signed by the control key carried forward from the
        // source layer.
        let final_vc = sign_credential(&final_vc, &handle.key_pair, &handle.control_vm_id, created_at).map_err(OriginalsError::from)?;

        self.migration_manager.record(&handle.origin_id, record.clone());
        handle.asset.apply_migration(record, new_did.clone(), final_vc)?;

        info!(asset_id = %new_did, satoshi = inscription.satoshi, "inscribed asset to did:btco");
        self.emit_progress("confirmed", 100, "inscription confirmed");
        Ok(())
    }

    // ── transfer ──────────────────────────────────────────────────────────────

    /// Requires layer = btco. Validates the recipient Bitcoin address,
    /// constructs and broadcasts the UTXO-moving transaction, records the
    /// transfer in provenance, and issues an OwnershipTransferred credential.
    /// Does not change the asset's DID, per §4.6.
    pub async fn transfer(&self, handle: &mut AssetHandle, recipient_address: &str, options: TransferRequestOptions) -> Result<TransferOutcome> {
        if handle.asset.current_layer() != Layer::Btco {
            return Err(LifecycleError::IllegalTransition { from: handle.asset.current_layer(), to: Layer::Btco }.into());
        }
        self.emit_progress("validating", 0, "validating recipient address");
        let unchecked = bitcoin::Address::from_str(recipient_address).map_err(|e| LifecycleError::InvalidAddress(e.to_string()))?;
        unchecked.require_network(to_bitcoin_network(self.network)).map_err(|e| LifecycleError::InvalidAddress(e.to_string()))?;

        let inscription_id = handle
            .asset
            .provenance()
            .migrations
            .iter()
            .rev()
            .find(|m| m.to_layer == Layer::Btco)
            .and_then(|m| m.inscription_id.clone())
            .ok_or(LifecycleError::NoInscription)?;

        let created_at = options.created_at.unwrap_or_else(now);
        self.emit_progress("broadcasting", 50, "broadcasting transfer transaction");
        let result = self
            .ordinals_provider
            .transfer_inscription(&inscription_id, recipient_address, originals_adapters::TransferOptions { fee_rate: options.fee_rate })
            .await?;

        let from_address = handle.current_address.clone().unwrap_or_default();
        let to_address = recipient_address.to_string();
        let previous = self.last_credential_link(handle);
        let vc = issue_ownership_credential(handle.asset.id().clone(), handle.asset.id().clone(), &from_address, &to_address, result.satoshi, previous, created_at);
        let vc = sign_credential(&vc, &handle.key_pair, &handle.control_vm_id, created_at).map_err(OriginalsError::from)?;

        let record = TransferRecord { from: from_address, to: to_address.clone(), timestamp: created_at, tx_id: result.txid.clone() };
        handle.asset.apply_transfer(record, vc)?;
        handle.current_address = Some(to_address);

        info!(asset_id = %handle.asset.id(), txid = %result.txid, "transferred ownership");
        self.emit_progress("confirmed", 100, "transfer confirmed");
        Ok(TransferOutcome { txid: result.txid, fee: result.fee })
    }

    // ── validateMigration ─────────────────────────────────────────────────────

    /// Pure function, no side effects: checks {layerTransitionAllowed,
    /// hasRequiredCredentials, resourcesPresent, bindingsConsistent}, per §4.6.
    pub fn validate_migration(&self, handle: &AssetHandle, target: Layer) -> MigrationValidation {
        let current_layer = handle.asset.current_layer();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let layer_transition_allowed = current_layer.can_migrate_to(target);
        if !layer_transition_allowed {
            errors.push(format!("layer {current_layer} cannot migrate to {target}"));
        }

        let has_required_credentials = !(current_layer == Layer::Webvh && handle.asset.credentials().is_empty());
        if !has_required_credentials {
            errors.push("webvh layer has no migration credential yet".to_string());
        }

        let resources_present = !handle.resources.is_empty();
        if !resources_present {
            warnings.push("asset carries no resources".to_string());
        }

        let bindings_consistent = handle.asset.bindings().get(current_layer) == Some(handle.asset.id()) && handle.asset.provenance().migrations_are_monotonic();
        if !bindings_consistent {
            errors.push("current binding does not match the asset id, or migration history is non-monotonic".to_string());
        }

        if target == Layer::Btco && current_layer == Layer::Peer {
            warnings.push("skipping did:webvh publication; the asset will have no publicly resolvable document".to_string());
        }

        let valid = layer_transition_allowed && has_required_credentials && bindings_consistent;
        MigrationValidation {
            valid,
            current_layer,
            target_layer: target,
            checks: MigrationChecks { layer_transition_allowed, has_required_credentials, resources_present, bindings_consistent },
            errors,
            warnings,
        }
    }

    // ── estimateCost / estimateTypedOriginalCost ─────────────────────────────

    async fn resolve_fee_rate(&self, fee_rate: Option<f64>) -> Result<(f64, Confidence)> {
        match fee_rate {
            Some(rate) => Ok((rate, Confidence::High)),
            None => Ok((self.fee_oracle.estimate_fee(None).await?, Confidence::Medium)),
        }
    }

    fn btco_cost_from_envelope(content: &EnvelopeContent, fee_rate: f64, confidence: Confidence) -> CostEstimate {
        let data_size = estimate_envelope_len(content);
        let commit_fee = estimate_commit_fee(1, 1, fee_rate);
        let reveal_fee = estimate_reveal_fee(1, SINGLE_LEAF_CONTROL_BLOCK_LEN, content, 1, fee_rate);
        let network_fee = commit_fee + reveal_fee;
        let data_cost = (data_size as f64 * fee_rate).ceil() as u64;

        CostEstimate {
            total_sats: network_fee + REVEAL_DUST_VALUE_SATS,
            data_size,
            target_layer: Layer::Btco,
            confidence,
            breakdown: CostBreakdown { network_fee, data_cost, dust_value: REVEAL_DUST_VALUE_SATS },
        }
    }

    fn zero_cost(target: Layer) -> CostEstimate {
        CostEstimate {
            total_sats: 0,
            data_size: 0,
            target_layer: target,
            confidence: Confidence::High,
            breakdown: CostBreakdown { network_fee: 0, data_cost: 0, dust_value: 0 },
        }
    }

    /// For a `did:webvh` target returns zero; for `did:btco` computes the
    /// payload size of the envelope (DID document + primary VC) and
    /// multiplies by the vbyte estimator at the provided or oracle-supplied
    /// fee rate, per §4.6.
    pub async fn estimate_cost(&self, handle: &AssetHandle, target: Layer, fee_rate: Option<f64>) -> Result<CostEstimate> {
        match target {
            Layer::Webvh => Ok(Self::zero_cost(target)),
            Layer::Btco => {
                let (rate, confidence) = self.resolve_fee_rate(fee_rate).await?;
                let vc = handle.asset.credentials().last().map(|vc| serde_json::to_value(vc).unwrap_or(serde_json::Value::Null)).unwrap_or(serde_json::Value::Null);
                let did_document_value = serde_json::to_value(&handle.did_document).unwrap_or(serde_json::Value::Null);
                let cbor = encode_metadata_envelope(&MetadataEnvelope { did_document: did_document_value, verifiable_credential: vc }).map_err(|e| OriginalsError::validation(e.to_string()))?;
                let content = EnvelopeContent { content_type: INSCRIPTION_CONTENT_TYPE.to_string(), body: Vec::new(), metaprotocol: Some("originals".to_string()), cbor_metadata: Some(cbor) };
                Ok(Self::btco_cost_from_envelope(&content, rate, confidence))
            }
            Layer::Peer => Err(LifecycleError::IllegalTransition { from: handle.asset.current_layer(), to: target }.into()),
        }
    }

    /// As `estimateCost`, but operates on a manifest without requiring a live
    /// asset, per §4.6.
    pub async fn estimate_typed_original_cost(&self, manifest: &KindManifest, target: Layer, fee_rate: Option<f64>) -> Result<CostEstimate> {
        if manifest.resources.is_empty() {
            return Err(LifecycleError::EmptyManifest.into());
        }
        match target {
            Layer::Webvh => Ok(Self::zero_cost(target)),
            Layer::Btco => {
                let (rate, confidence) = self.resolve_fee_rate(fee_rate).await?;
                let payload_len: u64 = manifest.resources.iter().map(|r| r.size).sum();
                let metadata_len = serde_json::to_vec(&manifest.metadata).map(|b| b.len()).unwrap_or(0) as u64;
                let content_type = manifest.resources[0].content_type.clone();
                let content = EnvelopeContent {
                    content_type,
                    body: vec![0u8; (payload_len + metadata_len) as usize],
                    metaprotocol: Some("originals".to_string()),
                    cbor_metadata: None,
                };
                Ok(Self::btco_cost_from_envelope(&content, rate, confidence))
            }
            Layer::Peer => Err(LifecycleError::IllegalTransition { from: Layer::Peer, to: target }.into()),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn get_manifest<'a>(&self, handle: &'a AssetHandle) -> Option<&'a KindManifest> {
        handle.manifest.as_ref()
    }

    pub fn get_provenance<'a>(&self, handle: &'a AssetHandle) -> &'a ProvenanceChain {
        handle.asset.provenance()
    }

    pub fn get_provenance_summary(&self, handle: &AssetHandle) -> ProvenanceSummary {
        handle.asset.provenance_summary()
    }

    /// Verifies every attached credential against the DID bindings, per §4.7.
    pub fn verify_asset(&self, handle: &AssetHandle) -> bool {
        let resolver = |verification_method_id: &str| -> Option<String> {
            let did = verification_method_id.split('#').next()?;
            let document = self.did_manager.resolve_did(did).ok()?;
            document.find_verification_method(verification_method_id).map(|vm| vm.public_key_multibase.clone())
        };
        let result = originals_credentials::verify_credential_chain(handle.asset.credentials(), Some(&resolver));
        result.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_adapters::{FixedFeeOracle, InMemoryStorageAdapter, MockOrdinalsProvider};
    use originals_core::{ResourceContent, ResourceType};

    fn manager() -> LifecycleManager {
        LifecycleManager::new(
            DidManager::new(KeyType::Ed25519),
            Arc::new(MockOrdinalsProvider::default()),
            Arc::new(FixedFeeOracle::new(2.0)),
            Arc::new(InMemoryStorageAdapter::new("example.com", "widget")),
            BitcoinNetwork::Mainnet,
        )
    }

    fn sample_resource() -> Resource {
        Resource {
            id: "r1".to_string(),
            resource_type: ResourceType::Text,
            content_type: "text/plain".to_string(),
            hash: originals_crypto::sha256_hex(b"hello"),
            size: 5,
            version: 1,
            previous_version_hash: None,
            created_at: 0,
            url: None,
            content: Some(ResourceContent::Bytes(b"hello".to_vec())),
        }
    }

    #[test]
    fn create_draft_produces_a_peer_asset_bound_to_its_own_id() {
        let manager = manager();
        let handle = manager.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        assert_eq!(handle.asset.current_layer(), Layer::Peer);
        assert_eq!(handle.asset.bindings().peer_did.as_deref(), Some(handle.asset.id().as_str()));
    }

    #[tokio::test]
    async fn publish_migrates_to_webvh_and_issues_credentials() {
        let manager = manager();
        let mut handle = manager.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        manager.publish(&mut handle, PublishTarget { domain: "example.com".to_string(), slug: Some("widget".to_string()) }, PublishOptions::default()).await.unwrap();

        assert_eq!(handle.asset.current_layer(), Layer::Webvh);
        assert!(handle.asset.id().starts_with("did:webvh:"));
        assert_eq!(handle.asset.resources()[0].url.as_deref().map(|u| u.contains("example.com")), Some(true));
        assert!(handle.asset.credentials().len() >= 2);
        assert_eq!(manager.migration_manager().get_migration_history(&handle.origin_id).len(), 1);
    }

    #[tokio::test]
    async fn inscribe_directly_from_peer_binds_a_btco_did() {
        let manager = manager();
        let mut handle = manager.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        manager.inscribe(&mut handle, InscribeOptions { fee_rate: Some(5.0), created_at: None }).await.unwrap();

        assert_eq!(handle.asset.current_layer(), Layer::Btco);
        assert!(handle.asset.id().starts_with("did:btco:"));
        assert!(handle.asset.bindings().btco_did.is_some());
    }

    #[tokio::test]
    async fn transfer_requires_the_btco_layer() {
        let manager = manager();
        let mut handle = manager.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        let err = manager.transfer(&mut handle, "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq", TransferRequestOptions::default()).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn transfer_after_inscribe_moves_ownership_without_changing_the_did() {
        let manager = manager();
        let mut handle = manager.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        manager.inscribe(&mut handle, InscribeOptions::default()).await.unwrap();
        let id_before = handle.asset.id().clone();

        let outcome = manager.transfer(&mut handle, "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq", TransferRequestOptions::default()).await.unwrap();
        assert_eq!(handle.asset.id(), &id_before);
        assert!(!outcome.txid.is_empty());
        assert_eq!(handle.asset.provenance().transfers.len(), 1);
    }

    #[test]
    fn validate_migration_flags_disallowed_targets() {
        let manager = manager();
        let handle = manager.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        let result = manager.validate_migration(&handle, Layer::Peer);
        assert!(!result.valid);
        assert!(!result.checks.layer_transition_allowed);
    }

    #[tokio::test]
    async fn estimate_cost_is_zero_for_webvh_and_positive_for_btco() {
        let manager = manager();
        let handle = manager.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        let webvh_cost = manager.estimate_cost(&handle, Layer::Webvh, None).await.unwrap();
        assert_eq!(webvh_cost.total_sats, 0);

        let btco_cost = manager.estimate_cost(&handle, Layer::Btco, Some(4.0)).await.unwrap();
        assert!(btco_cost.total_sats > 0);
        assert_eq!(btco_cost.confidence, Confidence::High);
    }

    #[tokio::test]
    async fn verify_asset_accepts_a_freshly_published_chain() {
        let manager = manager();
        let mut handle = manager.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        manager.publish(&mut handle, PublishTarget { domain: "example.com".to_string(), slug: None }, PublishOptions::default()).await.unwrap();
        assert!(manager.verify_asset(&handle));
    }
}
