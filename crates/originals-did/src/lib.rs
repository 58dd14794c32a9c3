pub mod btco;
pub mod error;
pub mod manager;
pub mod peer;
pub mod webvh;

pub use btco::{btco_did, parse_btco_did};
pub use error::{DidError, Result};
pub use manager::{CreateDidOptions, CreatedDid, DidManager, DidMethod, DidResolver};
pub use peer::{create_peer_did, peer_multikey};
pub use webvh::{create_webvh_did, LogEntry, LogEntryProof, Parameters, Witness, WitnessWeight};
