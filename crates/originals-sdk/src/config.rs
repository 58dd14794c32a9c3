use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use originals_adapters::{DidDocumentLoader, FeeOracle, OrdinalsProvider, StorageAdapter};
use originals_core::{BitcoinNetwork, KeyType, OriginalsError};
use originals_credentials::ExternalSigner;
use serde::{Deserialize, Serialize};

/// A `tracing` level name, recognized per spec §6 (`trace`, `debug`, `info`,
/// `warn`, `error`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::InvalidValue {
                field: "logging.level",
                value: other.to_string(),
            }),
        }
    }
}

/// Where log output is written. `Stdout` covers the common case; `File`
/// mirrors a path the same way a deployment would point chronx-wallet's
/// tracing output at a log file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    File { path: String },
}

/// Logging configuration, per spec §6's `logging` block. `event_logging`
/// holds per-event-name level overrides (e.g. `"asset:migrated" -> Debug`)
/// layered on top of `level` as extra `tracing_subscriber::EnvFilter`
/// directives.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub outputs: Vec<LogOutput>,
    pub sanitize_logs: bool,
    pub event_logging: HashMap<String, LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            outputs: vec![LogOutput::Stdout],
            sanitize_logs: true,
            event_logging: HashMap::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

/// Parses the spec's three recognized `defaultKeyType` names onto the
/// underlying key types: `ES256K` is secp256k1, `ES256` is P-256.
pub fn parse_default_key_type(name: &str) -> Result<KeyType, ConfigError> {
    match name {
        "Ed25519" => Ok(KeyType::Ed25519),
        "ES256K" => Ok(KeyType::Secp256k1),
        "ES256" => Ok(KeyType::P256),
        other => Err(ConfigError::InvalidValue {
            field: "defaultKeyType",
            value: other.to_string(),
        }),
    }
}

pub fn parse_network(name: &str) -> Result<BitcoinNetwork, ConfigError> {
    match name {
        "mainnet" => Ok(BitcoinNetwork::Mainnet),
        "testnet" => Ok(BitcoinNetwork::Testnet),
        "signet" => Ok(BitcoinNetwork::Signet),
        "regtest" => Ok(BitcoinNetwork::Regtest),
        other => Err(ConfigError::InvalidValue {
            field: "network",
            value: other.to_string(),
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("missing required adapter: {0}")]
    MissingAdapter(&'static str),
}

impl From<ConfigError> for OriginalsError {
    fn from(err: ConfigError) -> Self {
        OriginalsError::configuration(err.to_string())
    }
}

/// The SDK's runtime configuration, per spec §6. Built through
/// `OriginalsConfigBuilder` rather than constructed directly, the same way
/// `chronx-wallet`'s `main.rs` assembles a parsed `Args` into the state the
/// rest of the binary runs on.
#[derive(Clone)]
pub struct OriginalsConfig {
    pub network: BitcoinNetwork,
    pub default_key_type: KeyType,
    pub webvh_network: Option<String>,
    pub enable_logging: bool,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub ordinals_provider: Arc<dyn OrdinalsProvider>,
    pub fee_oracle: Arc<dyn FeeOracle>,
    pub storage_adapter: Arc<dyn StorageAdapter>,
    pub key_store: Arc<dyn ExternalSigner>,
    pub did_document_loader: Option<Arc<dyn DidDocumentLoader>>,
}

pub struct OriginalsConfigBuilder {
    network: BitcoinNetwork,
    default_key_type: KeyType,
    webvh_network: Option<String>,
    enable_logging: bool,
    logging: LoggingConfig,
    metrics: MetricsConfig,
    ordinals_provider: Option<Arc<dyn OrdinalsProvider>>,
    fee_oracle: Option<Arc<dyn FeeOracle>>,
    storage_adapter: Option<Arc<dyn StorageAdapter>>,
    key_store: Option<Arc<dyn ExternalSigner>>,
    did_document_loader: Option<Arc<dyn DidDocumentLoader>>,
}

impl Default for OriginalsConfigBuilder {
    fn default() -> Self {
        Self {
            network: BitcoinNetwork::Mainnet,
            default_key_type: KeyType::Ed25519,
            webvh_network: None,
            enable_logging: true,
            logging: LoggingConfig::default(),
            metrics: MetricsConfig::default(),
            ordinals_provider: None,
            fee_oracle: None,
            storage_adapter: None,
            key_store: None,
            did_document_loader: None,
        }
    }
}

impl OriginalsConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network(mut self, network: BitcoinNetwork) -> Self {
        self.network = network;
        self
    }

    pub fn default_key_type(mut self, key_type: KeyType) -> Self {
        self.default_key_type = key_type;
        self
    }

    pub fn webvh_network(mut self, tag: impl Into<String>) -> Self {
        self.webvh_network = Some(tag.into());
        self
    }

    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    pub fn metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn ordinals_provider(mut self, provider: Arc<dyn OrdinalsProvider>) -> Self {
        self.ordinals_provider = Some(provider);
        self
    }

    pub fn fee_oracle(mut self, oracle: Arc<dyn FeeOracle>) -> Self {
        self.fee_oracle = Some(oracle);
        self
    }

    pub fn storage_adapter(mut self, adapter: Arc<dyn StorageAdapter>) -> Self {
        self.storage_adapter = Some(adapter);
        self
    }

    pub fn key_store(mut self, key_store: Arc<dyn ExternalSigner>) -> Self {
        self.key_store = Some(key_store);
        self
    }

    pub fn did_document_loader(mut self, loader: Arc<dyn DidDocumentLoader>) -> Self {
        self.did_document_loader = Some(loader);
        self
    }

    pub fn build(self) -> Result<OriginalsConfig, ConfigError> {
        Ok(OriginalsConfig {
            network: self.network,
            default_key_type: self.default_key_type,
            webvh_network: self.webvh_network,
            enable_logging: self.enable_logging,
            logging: self.logging,
            metrics: self.metrics,
            ordinals_provider: self.ordinals_provider.ok_or(ConfigError::MissingAdapter("ordinalsProvider"))?,
            fee_oracle: self.fee_oracle.ok_or(ConfigError::MissingAdapter("feeOracle"))?,
            storage_adapter: self.storage_adapter.ok_or(ConfigError::MissingAdapter("storageAdapter"))?,
            key_store: self.key_store.ok_or(ConfigError::MissingAdapter("keyStore"))?,
            did_document_loader: self.did_document_loader,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_adapters::{FixedFeeOracle, InMemoryStorageAdapter, MockOrdinalsProvider};
    use originals_adapters::LocalExternalSigner;
    use originals_crypto::KeyPair;

    fn sample_builder() -> OriginalsConfigBuilder {
        let key_pair = KeyPair::generate(KeyType::Ed25519).unwrap();
        OriginalsConfigBuilder::new()
            .network(BitcoinNetwork::Regtest)
            .ordinals_provider(Arc::new(MockOrdinalsProvider::default()))
            .fee_oracle(Arc::new(FixedFeeOracle::new(1.5)))
            .storage_adapter(Arc::new(InMemoryStorageAdapter::new("example.com", "demo")))
            .key_store(Arc::new(LocalExternalSigner::new("did:peer:0abc#key-1", key_pair)))
    }

    #[test]
    fn build_fails_without_required_adapters() {
        let err = OriginalsConfigBuilder::new().build();
        assert!(matches!(err, Err(ConfigError::MissingAdapter("ordinalsProvider"))));
    }

    #[test]
    fn build_succeeds_with_all_adapters_supplied() {
        let config = sample_builder().build().unwrap();
        assert_eq!(config.network, BitcoinNetwork::Regtest);
        assert_eq!(config.default_key_type, KeyType::Ed25519);
    }

    #[test]
    fn parses_the_three_recognized_key_type_names() {
        assert_eq!(parse_default_key_type("Ed25519").unwrap(), KeyType::Ed25519);
        assert_eq!(parse_default_key_type("ES256K").unwrap(), KeyType::Secp256k1);
        assert_eq!(parse_default_key_type("ES256").unwrap(), KeyType::P256);
        assert!(parse_default_key_type("RS256").is_err());
    }

    #[test]
    fn parses_the_four_recognized_network_names() {
        assert_eq!(parse_network("mainnet").unwrap(), BitcoinNetwork::Mainnet);
        assert_eq!(parse_network("regtest").unwrap(), BitcoinNetwork::Regtest);
        assert!(parse_network("devnet").is_err());
    }
}
