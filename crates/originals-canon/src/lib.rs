pub mod jcs;
pub mod rdf;

pub use jcs::{canonical_hash_hex, canonicalize};
pub use rdf::canonicalize_rdf;
