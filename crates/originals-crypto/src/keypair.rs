use ed25519_dalek::{Signer as _, SigningKey as Ed25519SigningKey, Verifier as _, VerifyingKey as Ed25519VerifyingKey};
use originals_core::KeyType;
use p256::ecdsa::signature::{Signer as P256Signer, Verifier as P256Verifier};
use p256::ecdsa::{Signature as P256Signature, SigningKey as P256SigningKey, VerifyingKey as P256VerifyingKey};
use rand_core::OsRng;
use secp256k1::{ecdsa::Signature as Secp256k1Signature, Message, PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey as Secp256k1SecretKey};
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

/// A generated or restored keypair for one of the four supported key types.
/// The secret-key bytes are wiped on drop (mirroring the teacher's
/// `KeyPair`'s `Drop` impl).
pub enum KeyPair {
    Ed25519 { signing_key: Ed25519SigningKey },
    Secp256k1 { secret_key: Secp256k1SecretKey },
    P256 { signing_key: P256SigningKey },
    /// BLS12-381-G2 signing is not implemented; the variant exists so that
    /// key material can be generated and stored ahead of the BBS+
    /// selective-disclosure work landing in `originals-credentials`.
    Bls12381G2 { secret_key: [u8; 32] },
}

impl KeyPair {
    pub fn key_type(&self) -> KeyType {
        match self {
            KeyPair::Ed25519 { .. } => KeyType::Ed25519,
            KeyPair::Secp256k1 { .. } => KeyType::Secp256k1,
            KeyPair::P256 { .. } => KeyType::P256,
            KeyPair::Bls12381G2 { .. } => KeyType::Bls12381G2,
        }
    }

    pub fn generate(key_type: KeyType) -> Result<Self> {
        Ok(match key_type {
            KeyType::Ed25519 => KeyPair::Ed25519 { signing_key: Ed25519SigningKey::generate(&mut OsRng) },
            KeyType::Secp256k1 => {
                let secp = Secp256k1::new();
                let (secret_key, _) = secp.generate_keypair(&mut rand::thread_rng());
                KeyPair::Secp256k1 { secret_key }
            }
            KeyType::P256 => KeyPair::P256 { signing_key: P256SigningKey::random(&mut OsRng) },
            KeyType::Bls12381G2 => {
                let mut secret_key = [0u8; 32];
                rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut secret_key);
                KeyPair::Bls12381G2 { secret_key }
            }
        })
    }

    pub fn public_key_bytes(&self) -> Vec<u8> {
        match self {
            KeyPair::Ed25519 { signing_key } => signing_key.verifying_key().to_bytes().to_vec(),
            KeyPair::Secp256k1 { secret_key } => {
                let secp = Secp256k1::new();
                Secp256k1PublicKey::from_secret_key(&secp, secret_key).serialize().to_vec()
            }
            KeyPair::P256 { signing_key } => {
                P256VerifyingKey::from(signing_key).to_encoded_point(true).as_bytes().to_vec()
            }
            KeyPair::Bls12381G2 { .. } => vec![0u8; KeyType::Bls12381G2.public_key_len()],
        }
    }

    pub fn secret_key_bytes(&self) -> Vec<u8> {
        match self {
            KeyPair::Ed25519 { signing_key } => signing_key.to_bytes().to_vec(),
            KeyPair::Secp256k1 { secret_key } => secret_key.secret_bytes().to_vec(),
            KeyPair::P256 { signing_key } => signing_key.to_bytes().to_vec(),
            KeyPair::Bls12381G2 { secret_key } => secret_key.to_vec(),
        }
    }

    /// Sign `digest` (already hashed per the credential-signing algorithm in
    /// §4.4) and return the raw signature bytes.
    pub fn sign(&self, digest: &[u8]) -> Result<Vec<u8>> {
        match self {
            KeyPair::Ed25519 { signing_key } => Ok(signing_key.sign(digest).to_bytes().to_vec()),
            KeyPair::Secp256k1 { secret_key } => {
                let secp = Secp256k1::new();
                let message = Message::from_digest_slice(digest)
                    .map_err(|e| CryptoError::CurveError(e.to_string()))?;
                Ok(secp.sign_ecdsa(&message, secret_key).serialize_compact().to_vec())
            }
            KeyPair::P256 { signing_key } => {
                let sig: P256Signature = signing_key.sign(digest);
                Ok(sig.to_bytes().to_vec())
            }
            KeyPair::Bls12381G2 { .. } => Err(CryptoError::CurveError(
                "bls12-381-g2 signing is not implemented".to_string(),
            )),
        }
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        match self {
            KeyPair::Bls12381G2 { secret_key } => secret_key.zeroize(),
            // ed25519-dalek, secp256k1, and p256 signing keys zeroize their
            // own backing buffers on drop.
            _ => {}
        }
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyPair {{ key_type: {:?} }}", self.key_type())
    }
}

/// Verify `signature` over `digest` against a raw public key of `key_type`.
pub fn verify(key_type: KeyType, public_key: &[u8], digest: &[u8], signature: &[u8]) -> Result<bool> {
    match key_type {
        KeyType::Ed25519 => {
            let vk_bytes: [u8; 32] = public_key
                .try_into()
                .map_err(|_| CryptoError::KeyLengthMismatch { expected: 32, found: public_key.len() })?;
            let vk = Ed25519VerifyingKey::from_bytes(&vk_bytes).map_err(|e| CryptoError::CurveError(e.to_string()))?;
            let sig_bytes: [u8; 64] = signature
                .try_into()
                .map_err(|_| CryptoError::CurveError("ed25519 signature must be 64 bytes".to_string()))?;
            let sig = ed25519_dalek::Signature::from_bytes(&sig_bytes);
            Ok(vk.verify(digest, &sig).is_ok())
        }
        KeyType::Secp256k1 => {
            let secp = Secp256k1::new();
            let pk = Secp256k1PublicKey::from_slice(public_key).map_err(|e| CryptoError::CurveError(e.to_string()))?;
            let message = Message::from_digest_slice(digest).map_err(|e| CryptoError::CurveError(e.to_string()))?;
            let sig = Secp256k1Signature::from_compact(signature).map_err(|e| CryptoError::CurveError(e.to_string()))?;
            Ok(secp.verify_ecdsa(&message, &sig, &pk).is_ok())
        }
        KeyType::P256 => {
            let vk = P256VerifyingKey::from_sec1_bytes(public_key).map_err(|e| CryptoError::CurveError(e.to_string()))?;
            let sig = P256Signature::try_from(signature).map_err(|e| CryptoError::CurveError(e.to_string()))?;
            Ok(vk.verify(digest, &sig).is_ok())
        }
        KeyType::Bls12381G2 => Err(CryptoError::CurveError(
            "bls12-381-g2 verification is not implemented".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ed25519_roundtrip_signs_and_verifies() {
        let kp = KeyPair::generate(KeyType::Ed25519).unwrap();
        let digest = crate::hash::sha256(b"hello originals");
        let sig = kp.sign(&digest).unwrap();
        assert!(verify(KeyType::Ed25519, &kp.public_key_bytes(), &digest, &sig).unwrap());
    }

    #[test]
    fn secp256k1_roundtrip_signs_and_verifies() {
        let kp = KeyPair::generate(KeyType::Secp256k1).unwrap();
        let digest = crate::hash::sha256(b"hello originals");
        let sig = kp.sign(&digest).unwrap();
        assert!(verify(KeyType::Secp256k1, &kp.public_key_bytes(), &digest, &sig).unwrap());
    }

    #[test]
    fn p256_roundtrip_signs_and_verifies() {
        let kp = KeyPair::generate(KeyType::P256).unwrap();
        let digest = crate::hash::sha256(b"hello originals");
        let sig = kp.sign(&digest).unwrap();
        assert!(verify(KeyType::P256, &kp.public_key_bytes(), &digest, &sig).unwrap());
    }

    #[test]
    fn tampered_digest_fails_verification() {
        let kp = KeyPair::generate(KeyType::Ed25519).unwrap();
        let digest = crate::hash::sha256(b"hello originals");
        let sig = kp.sign(&digest).unwrap();
        let other_digest = crate::hash::sha256(b"goodbye originals");
        assert!(!verify(KeyType::Ed25519, &kp.public_key_bytes(), &other_digest, &sig).unwrap());
    }
}
