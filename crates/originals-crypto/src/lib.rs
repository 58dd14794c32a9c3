pub mod error;
pub mod hash;
pub mod keypair;
pub mod multikey;

pub use error::CryptoError;
pub use hash::{sha256, sha256_hex};
pub use keypair::{verify, KeyPair};
pub use multikey::{decode_multibase_bytes, decode_public_key, decode_public_key_any, encode_multibase_bytes, encode_public_key};
