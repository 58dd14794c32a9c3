use sha2::{Digest, Sha256};

/// SHA-256 of `data`, as a raw 32-byte digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 of `data`, hex-encoded. Used for resource and credential hashes
/// throughout the SDK (§4.1, §4.4).
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_matches_known_vector() {
        let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        assert_eq!(expected.len(), 64);
        assert_eq!(sha256_hex(b"abc"), expected);
    }

    #[test]
    fn equivalent_string_and_byte_inputs_hash_identically() {
        let s = "hello originals";
        assert_eq!(sha256_hex(s.as_bytes()), sha256_hex(s.to_string().into_bytes().as_slice()));
    }
}
