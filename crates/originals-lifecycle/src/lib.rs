//! Lifecycle Manager, Migration Manager, and Batch Operations: the
//! orchestration layer driving an `OriginalsAsset` through `createDraft`,
//! `publish`, `inscribe`, and `transfer`, per §4.6.

pub mod batch;
pub mod error;
pub mod manager;
pub mod migration;
pub mod progress;

pub use batch::{BatchError, BatchOperations, BatchResult, BatchStats};
pub use error::LifecycleError;
pub use manager::{
    AssetHandle, Confidence, CostBreakdown, CostEstimate, CreateDraftOptions, InscribeOptions,
    LifecycleManager, MigrationChecks, MigrationValidation, PublishOptions, PublishTarget,
    TransferOutcome, TransferRequestOptions,
};
pub use migration::MigrationManager;
pub use progress::{LifecycleProgress, ProgressHandler};

/// The full typed event set an `OriginalsAsset` emits over its lifetime
/// (§4.7). The bus itself lives with the asset, not the manager, since an
/// asset must be able to notify subscribers regardless of which manager
/// instance is driving it.
pub use originals_core::asset::{AssetEvent, EventBus};
