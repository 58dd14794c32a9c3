use std::sync::Arc;

use originals_core::{KindManifest, Layer, ProvenanceChain, ProvenanceSummary, Resource, Result};
use originals_did::DidManager;
use originals_kinds::ValidateOptions;
use originals_lifecycle::{
    AssetHandle, BatchOperations, CostEstimate, CreateDraftOptions, InscribeOptions, LifecycleManager,
    MigrationValidation, PublishOptions, PublishTarget, TransferOutcome, TransferRequestOptions,
};
use tracing::info;

use crate::config::OriginalsConfig;
use crate::telemetry;

/// The single entry point a consumer of this crate constructs: wires the
/// configured adapters into a `LifecycleManager` and initializes logging,
/// the way `chronx-wallet`'s `main()` wires a `WalletRpcClient` from parsed
/// config before dispatching to a subcommand.
pub struct OriginalsSdk {
    config: OriginalsConfig,
    lifecycle: LifecycleManager,
}

impl OriginalsSdk {
    /// Builds the SDK from a config, initializing the global `tracing`
    /// subscriber as a side effect. Safe to call more than once per process;
    /// a second subscriber init attempt is logged and ignored rather than
    /// propagated, since a consumer embedding this SDK inside a larger
    /// application may already have installed its own subscriber.
    pub fn new(config: OriginalsConfig) -> Self {
        if let Err(err) = telemetry::init_tracing(config.enable_logging, &config.logging) {
            eprintln!("tracing subscriber already initialized: {err}");
        }

        let did_manager = DidManager::new(config.default_key_type);
        let lifecycle = LifecycleManager::new(
            did_manager,
            config.ordinals_provider.clone(),
            config.fee_oracle.clone(),
            config.storage_adapter.clone(),
            config.network,
        );

        info!(network = %config.network, default_key_type = ?config.default_key_type, "originals sdk initialized");
        Self { config, lifecycle }
    }

    pub fn config(&self) -> &OriginalsConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    /// A `BatchOperations` handle, bounded to `concurrency` concurrent
    /// adapter calls, driving a manager built from this SDK's config.
    /// `LifecycleManager` holds its adapters behind `Arc<dyn _>` already, so
    /// rebuilding one is cheap and avoids requiring `OriginalsSdk` itself to
    /// be `Clone`.
    pub fn batch(&self, concurrency: usize) -> BatchOperations {
        let manager = LifecycleManager::new(
            DidManager::new(self.config.default_key_type),
            self.config.ordinals_provider.clone(),
            self.config.fee_oracle.clone(),
            self.config.storage_adapter.clone(),
            self.config.network,
        );
        BatchOperations::new(Arc::new(manager), concurrency)
    }

    pub fn create_draft(&self, resources: Vec<Resource>, options: CreateDraftOptions) -> Result<AssetHandle> {
        self.lifecycle.create_draft(resources, options)
    }

    pub fn create_typed_original(&self, manifest: KindManifest, validate_options: ValidateOptions, options: CreateDraftOptions) -> Result<AssetHandle> {
        self.lifecycle.create_typed_original(manifest, validate_options, options)
    }

    pub async fn publish(&self, handle: &mut AssetHandle, target: PublishTarget, options: PublishOptions) -> Result<()> {
        self.lifecycle.publish(handle, target, options).await
    }

    pub async fn inscribe(&self, handle: &mut AssetHandle, options: InscribeOptions) -> Result<()> {
        self.lifecycle.inscribe(handle, options).await
    }

    pub async fn transfer(&self, handle: &mut AssetHandle, recipient_address: &str, options: TransferRequestOptions) -> Result<TransferOutcome> {
        self.lifecycle.transfer(handle, recipient_address, options).await
    }

    pub fn validate_migration(&self, handle: &AssetHandle, target: Layer) -> MigrationValidation {
        self.lifecycle.validate_migration(handle, target)
    }

    pub async fn estimate_cost(&self, handle: &AssetHandle, target: Layer, fee_rate: Option<f64>) -> Result<CostEstimate> {
        self.lifecycle.estimate_cost(handle, target, fee_rate).await
    }

    pub fn get_manifest<'a>(&self, handle: &'a AssetHandle) -> Option<&'a KindManifest> {
        self.lifecycle.get_manifest(handle)
    }

    pub fn get_provenance<'a>(&self, handle: &'a AssetHandle) -> &'a ProvenanceChain {
        self.lifecycle.get_provenance(handle)
    }

    pub fn get_provenance_summary(&self, handle: &AssetHandle) -> ProvenanceSummary {
        self.lifecycle.get_provenance_summary(handle)
    }

    pub fn verify_asset(&self, handle: &AssetHandle) -> bool {
        self.lifecycle.verify_asset(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OriginalsConfigBuilder;
    use originals_adapters::{FixedFeeOracle, InMemoryStorageAdapter, LocalExternalSigner, MockOrdinalsProvider};
    use originals_core::{BitcoinNetwork, KeyType, ResourceContent, ResourceType};
    use originals_crypto::KeyPair;

    fn sdk() -> OriginalsSdk {
        let key_pair = KeyPair::generate(KeyType::Ed25519).unwrap();
        let config = OriginalsConfigBuilder::new()
            .network(BitcoinNetwork::Regtest)
            .ordinals_provider(Arc::new(MockOrdinalsProvider::default()))
            .fee_oracle(Arc::new(FixedFeeOracle::new(2.0)))
            .storage_adapter(Arc::new(InMemoryStorageAdapter::new("example.com", "widget")))
            .key_store(Arc::new(LocalExternalSigner::new("did:peer:0abc#key-1", key_pair)))
            .build()
            .unwrap();
        OriginalsSdk::new(config)
    }

    fn sample_resource() -> Resource {
        Resource {
            id: "text-1".to_string(),
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
    fn create_draft_produces_a_peer_asset() {
        let sdk = sdk();
        let handle = sdk.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        assert!(handle.id().starts_with("did:peer:"));
    }

    #[tokio::test]
    async fn publish_moves_the_asset_to_webvh() {
        let sdk = sdk();
        let mut handle = sdk.create_draft(vec![sample_resource()], CreateDraftOptions::default()).unwrap();
        sdk.publish(&mut handle, PublishTarget { domain: "example.com".to_string(), slug: None }, PublishOptions::default())
            .await
            .unwrap();
        assert!(handle.id().starts_with("did:webvh:"));
    }
}
