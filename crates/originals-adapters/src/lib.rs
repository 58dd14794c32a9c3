pub mod did_loader;
pub mod fee_oracle;
#[cfg(feature = "http")]
pub mod http_ordinals;
pub mod ordinals;
pub mod signer;
pub mod storage;

#[cfg(feature = "http")]
pub use http_ordinals::HttpOrdinalsProvider;

pub use did_loader::{DidDocumentLoader, LoadedVerificationMethod, StaticDidDocumentLoader};
pub use fee_oracle::{FeeOracle, FixedFeeOracle};
pub use ordinals::{
    CreateInscriptionRequest, Inscription, MockOrdinalsProvider, OrdinalsProvider,
    TransactionStatus, TransferOptions, TransferResult,
};
pub use signer::LocalExternalSigner;
pub use storage::{InMemoryStorageAdapter, StorageAdapter};
