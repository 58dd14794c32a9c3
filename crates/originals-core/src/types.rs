use serde::{Deserialize, Serialize};
use std::fmt;

/// Unix timestamp (seconds, UTC). Kept as a plain alias rather than a newtype
/// so that provenance records and credentials can compare/order timestamps
/// with ordinary arithmetic.
pub type Timestamp = i64;

/// A decentralized identifier string, e.g. `did:peer:z6Mk...` or
/// `did:btco:mainnet:1234567890`. Kept opaque; layer-specific parsing lives
/// in `originals-did`.
pub type Did = String;

// ── Layer ─────────────────────────────────────────────────────────────────────

/// The three identity layers an asset can occupy, in lifecycle order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// `did:peer` — private, offline, self-certifying.
    Peer,
    /// `did:webvh` — publicly hostable, resolved from an HTTPS log.
    Webvh,
    /// `did:btco` — Bitcoin-anchored, bound to an inscribed satoshi.
    Btco,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Layer::Peer => "peer",
            Layer::Webvh => "webvh",
            Layer::Btco => "btco",
        };
        write!(f, "{s}")
    }
}

impl Layer {
    /// Every transition this layer may legally migrate to. `Btco` is
    /// terminal: only ownership transfer is permitted from it.
    pub fn allowed_targets(self) -> &'static [Layer] {
        match self {
            Layer::Peer => &[Layer::Webvh, Layer::Btco],
            Layer::Webvh => &[Layer::Btco],
            Layer::Btco => &[],
        }
    }

    pub fn can_migrate_to(self, target: Layer) -> bool {
        self.allowed_targets().contains(&target)
    }
}

// ── KeyType ───────────────────────────────────────────────────────────────────

/// Supported verification-method key types, shared across DID documents and
/// Data-Integrity proofs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum KeyType {
    Ed25519,
    Secp256k1,
    P256,
    Bls12381G2,
}

impl KeyType {
    /// Fixed public-key length in bytes for this key type, per §3 invariants.
    pub const fn public_key_len(self) -> usize {
        match self {
            KeyType::Ed25519 => 32,
            KeyType::Secp256k1 => 33,
            KeyType::P256 => 33,
            KeyType::Bls12381G2 => 96,
        }
    }

    /// Fixed private-key length in bytes for this key type.
    pub const fn private_key_len(self) -> usize {
        match self {
            KeyType::Ed25519 => 32,
            KeyType::Secp256k1 => 32,
            KeyType::P256 => 32,
            KeyType::Bls12381G2 => 32,
        }
    }

    /// The Data-Integrity cryptosuite this key type signs with by default
    /// (the JCS-canonicalized family; see [`Self::cryptosuite_algorithm`]
    /// for the full set a verifier should accept).
    pub const fn default_cryptosuite(self) -> &'static str {
        match self {
            KeyType::Ed25519 => "eddsa-jcs-2022",
            KeyType::Secp256k1 => "ecdsa-jcs-2019",
            KeyType::P256 => "ecdsa-jcs-2019",
            KeyType::Bls12381G2 => "bbs-2023",
        }
    }

    /// The signature algorithm family a cryptosuite identifier must start
    /// with to be compatible with this key type, independent of whether the
    /// suite canonicalizes via JCS or RDF dataset canonicalization (§4.4).
    pub const fn cryptosuite_algorithm(self) -> &'static str {
        match self {
            KeyType::Ed25519 => "eddsa",
            KeyType::Secp256k1 | KeyType::P256 => "ecdsa",
            KeyType::Bls12381G2 => "bbs",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyType::Ed25519 => "Ed25519",
            KeyType::Secp256k1 => "Secp256k1",
            KeyType::P256 => "P256",
            KeyType::Bls12381G2 => "Bls12381G2",
        };
        write!(f, "{s}")
    }
}

// ── BitcoinNetwork ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BitcoinNetwork {
    Mainnet,
    Testnet,
    Signet,
    Regtest,
}

impl fmt::Display for BitcoinNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BitcoinNetwork::Mainnet => "mainnet",
            BitcoinNetwork::Testnet => "testnet",
            BitcoinNetwork::Signet => "signet",
            BitcoinNetwork::Regtest => "regtest",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peer_can_reach_webvh_and_btco_but_not_reverse() {
        assert!(Layer::Peer.can_migrate_to(Layer::Webvh));
        assert!(Layer::Peer.can_migrate_to(Layer::Btco));
        assert!(Layer::Webvh.can_migrate_to(Layer::Btco));
        assert!(!Layer::Webvh.can_migrate_to(Layer::Peer));
        assert!(!Layer::Btco.can_migrate_to(Layer::Peer));
        assert!(!Layer::Btco.can_migrate_to(Layer::Webvh));
    }

    #[test]
    fn key_lengths_match_spec() {
        assert_eq!(KeyType::Ed25519.public_key_len(), 32);
        assert_eq!(KeyType::Secp256k1.public_key_len(), 33);
        assert_eq!(KeyType::P256.public_key_len(), 33);
        assert_eq!(KeyType::Bls12381G2.public_key_len(), 96);
    }
}
