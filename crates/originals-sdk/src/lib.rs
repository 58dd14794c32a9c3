//! Facade crate: wires the adapter, DID, credential, and lifecycle crates
//! into a single `OriginalsSdk` entry point plus the `OriginalsConfig`
//! builder consumers actually construct, per §6.

pub mod config;
pub mod sdk;
pub mod telemetry;

pub use config::{
    parse_default_key_type, parse_network, ConfigError, LogLevel, LogOutput, LoggingConfig,
    MetricsConfig, OriginalsConfig, OriginalsConfigBuilder,
};
pub use sdk::OriginalsSdk;

pub use originals_lifecycle::{
    AssetHandle, BatchOperations, BatchResult, Confidence, CostEstimate, CreateDraftOptions,
    InscribeOptions, LifecycleError, MigrationValidation, PublishOptions, PublishTarget,
    TransferOutcome, TransferRequestOptions,
};
