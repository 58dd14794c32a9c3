use originals_core::{BitcoinNetwork, Did};

use crate::error::{DidError, Result};

/// Build a `did:btco:<network>:<satoshi>` identifier. Mainnet omits the
/// network segment entirely (`did:btco:<satoshi>`), matching the external
/// `did:btco` convention; testnet/signet/regtest always name themselves.
pub fn btco_did(network: BitcoinNetwork, satoshi: u64) -> Did {
    match network {
        BitcoinNetwork::Mainnet => format!("did:btco:{satoshi}"),
        other => format!("did:btco:{other}:{satoshi}"),
    }
}

/// Parse a `did:btco` identifier back into its network and bound satoshi.
/// The satoshi is permanent once inscribed; this function only recovers the
/// identifier's components, it does not touch chain state.
pub fn parse_btco_did(did: &str) -> Result<(BitcoinNetwork, u64)> {
    let rest = did
        .strip_prefix("did:btco:")
        .ok_or_else(|| DidError::Malformed(format!("not a did:btco: {did}")))?;

    let parts: Vec<&str> = rest.split(':').collect();
    let (network, satoshi_str) = match parts.as_slice() {
        [satoshi] => (BitcoinNetwork::Mainnet, *satoshi),
        ["testnet", satoshi] => (BitcoinNetwork::Testnet, *satoshi),
        ["signet", satoshi] => (BitcoinNetwork::Signet, *satoshi),
        ["regtest", satoshi] => (BitcoinNetwork::Regtest, *satoshi),
        _ => return Err(DidError::Malformed(format!("unrecognized did:btco shape: {did}"))),
    };

    let satoshi = satoshi_str
        .parse::<u64>()
        .map_err(|_| DidError::Malformed(format!("non-numeric satoshi in did:btco: {did}")))?;
    Ok((network, satoshi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_omits_network_segment() {
        let did = btco_did(BitcoinNetwork::Mainnet, 1_234_567_890);
        assert_eq!(did, "did:btco:1234567890");
        assert_eq!(parse_btco_did(&did).unwrap(), (BitcoinNetwork::Mainnet, 1_234_567_890));
    }

    #[test]
    fn testnet_roundtrips_through_the_network_segment() {
        let did = btco_did(BitcoinNetwork::Testnet, 42);
        assert_eq!(did, "did:btco:testnet:42");
        assert_eq!(parse_btco_did(&did).unwrap(), (BitcoinNetwork::Testnet, 42));
    }

    #[test]
    fn malformed_identifier_is_rejected() {
        assert!(parse_btco_did("did:btco:testnet:not-a-number").is_err());
        assert!(parse_btco_did("did:peer:abc").is_err());
    }
}
