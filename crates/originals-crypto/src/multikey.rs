use originals_core::KeyType;

use crate::error::{CryptoError, Result};

/// Multicodec codepoints for public keys, per the multiformats table.
const MC_ED25519_PUB: u64 = 0xed;
const MC_SECP256K1_PUB: u64 = 0xe7;
const MC_P256_PUB: u64 = 0x1200;
const MC_BLS12_381_G2_PUB: u64 = 0xeb;

fn multicodec_for(key_type: KeyType) -> u64 {
    match key_type {
        KeyType::Ed25519 => MC_ED25519_PUB,
        KeyType::Secp256k1 => MC_SECP256K1_PUB,
        KeyType::P256 => MC_P256_PUB,
        KeyType::Bls12381G2 => MC_BLS12_381_G2_PUB,
    }
}

fn key_type_for_multicodec(code: u64) -> Option<KeyType> {
    match code {
        MC_ED25519_PUB => Some(KeyType::Ed25519),
        MC_SECP256K1_PUB => Some(KeyType::Secp256k1),
        MC_P256_PUB => Some(KeyType::P256),
        MC_BLS12_381_G2_PUB => Some(KeyType::Bls12381G2),
        _ => None,
    }
}

/// Unsigned-LEB128 varint encoding, as used by the multicodec prefix.
fn varint_encode(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

fn varint_decode(bytes: &[u8]) -> Option<(u64, &[u8])> {
    let mut value: u64 = 0;
    let mut shift = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        value |= ((byte & 0x7f) as u64) << shift;
        if byte & 0x80 == 0 {
            return Some((value, &bytes[i + 1..]));
        }
        shift += 7;
    }
    None
}

/// Multikey-encode a raw public key: multicodec prefix + key bytes,
/// multibase-encoded with the `z` (base58btc) prefix, per §3/§9 GLOSSARY.
pub fn encode_public_key(key_type: KeyType, raw: &[u8]) -> Result<String> {
    if raw.len() != key_type.public_key_len() {
        return Err(CryptoError::KeyLengthMismatch { expected: key_type.public_key_len(), found: raw.len() });
    }
    let mut buf = Vec::with_capacity(raw.len() + 2);
    varint_encode(multicodec_for(key_type), &mut buf);
    buf.extend_from_slice(raw);
    Ok(multibase::encode(multibase::Base::Base58Btc, buf))
}

/// Decode a multibase-encoded, multicodec-prefixed public key, validating
/// that the header matches `expected` and that the decoded length is exactly
/// right for that key type.
pub fn decode_public_key(expected: KeyType, encoded: &str) -> Result<Vec<u8>> {
    let (_, bytes) = multibase::decode(encoded).map_err(|e| CryptoError::MultibaseDecode(e.to_string()))?;
    let (code, rest) = varint_decode(&bytes).ok_or_else(|| CryptoError::MultibaseDecode("truncated multicodec header".to_string()))?;
    let expected_code = multicodec_for(expected);
    if code != expected_code {
        return Err(CryptoError::MulticodecMismatch { expected: expected_code, found: code });
    }
    if rest.len() != expected.public_key_len() {
        return Err(CryptoError::KeyLengthMismatch { expected: expected.public_key_len(), found: rest.len() });
    }
    Ok(rest.to_vec())
}

/// Decode a multikey-encoded public key without knowing the key type up
/// front, inferring it from the multicodec header.
pub fn decode_public_key_any(encoded: &str) -> Result<(KeyType, Vec<u8>)> {
    let (_, bytes) = multibase::decode(encoded).map_err(|e| CryptoError::MultibaseDecode(e.to_string()))?;
    let (code, rest) = varint_decode(&bytes).ok_or_else(|| CryptoError::MultibaseDecode("truncated multicodec header".to_string()))?;
    let key_type = key_type_for_multicodec(code).ok_or_else(|| CryptoError::MulticodecMismatch { expected: 0, found: code })?;
    if rest.len() != key_type.public_key_len() {
        return Err(CryptoError::KeyLengthMismatch { expected: key_type.public_key_len(), found: rest.len() });
    }
    Ok((key_type, rest.to_vec()))
}

/// Multibase-encode an arbitrary signature or digest as base58btc, the
/// encoding used for `proofValue` (§3).
pub fn encode_multibase_bytes(raw: &[u8]) -> String {
    multibase::encode(multibase::Base::Base58Btc, raw)
}

pub fn decode_multibase_bytes(encoded: &str) -> Result<Vec<u8>> {
    let (_, bytes) = multibase::decode(encoded).map_err(|e| CryptoError::MultibaseDecode(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrips_for_every_key_type() {
        for (kt, len) in [
            (KeyType::Ed25519, 32),
            (KeyType::Secp256k1, 33),
            (KeyType::P256, 33),
            (KeyType::Bls12381G2, 96),
        ] {
            let raw = vec![7u8; len];
            let encoded = encode_public_key(kt, &raw).unwrap();
            let decoded = decode_public_key(kt, &encoded).unwrap();
            assert_eq!(decoded, raw);
        }
    }

    #[test]
    fn wrong_key_type_is_rejected_on_decode() {
        let raw = vec![1u8; 32];
        let encoded = encode_public_key(KeyType::Ed25519, &raw).unwrap();
        assert!(decode_public_key(KeyType::Secp256k1, &encoded).is_err());
    }

    #[test]
    fn wrong_length_is_rejected() {
        let raw = vec![1u8; 10];
        assert!(encode_public_key(KeyType::Ed25519, &raw).is_err());
    }

    #[test]
    fn decode_any_infers_key_type_from_header() {
        let raw = vec![9u8; 33];
        let encoded = encode_public_key(KeyType::Secp256k1, &raw).unwrap();
        let (kt, decoded) = decode_public_key_any(&encoded).unwrap();
        assert_eq!(kt, KeyType::Secp256k1);
        assert_eq!(decoded, raw);
    }
}
