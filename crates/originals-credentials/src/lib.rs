pub mod chain;
pub mod error;
pub mod issuer;
pub mod presentation;
pub mod selective_disclosure;
pub mod signer;

pub use chain::{compute_credential_hash, verify_credential_chain, ChainVerification};
pub use error::{CredentialError, Result};
pub use issuer::{
    create_credential, issue_migration_credential, issue_ownership_credential,
    issue_resource_credential, issue_resource_update_credential,
};
pub use presentation::create_presentation;
pub use selective_disclosure::{derive_disclosure, get_field_by_pointer, prepare_disclosure};
pub use signer::{credential_signing_digest, sign_credential, sign_credential_with_external_signer, verify_credential, ExternalSigner};
