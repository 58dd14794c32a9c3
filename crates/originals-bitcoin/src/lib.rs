pub mod envelope;
pub mod error;
pub mod fee;
pub mod inscription;
pub mod metadata;
pub mod size;
pub mod transfer;
pub mod utxo;

pub use envelope::{build_envelope_script, push_overhead, EnvelopeContent};
pub use error::{BitcoinError, Result};
pub use fee::{estimate_commit_fee, estimate_envelope_len, estimate_reveal_fee, ConfirmationSpeed};
pub use inscription::{build_and_sign_reveal_transaction, build_commit_transaction, untweaked_internal_key, InscriptionKey};
pub use metadata::{decode_metadata_envelope, encode_metadata_envelope, MetadataEnvelope};
pub use size::{estimate_reveal_vsize, estimate_vsize};
pub use transfer::build_transfer_transaction;
pub use utxo::{select_utxos, InscriptionDetails, Selection, Utxo};
