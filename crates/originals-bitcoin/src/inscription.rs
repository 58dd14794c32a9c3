use bitcoin::key::UntweakedPublicKey;
use bitcoin::secp256k1::{Keypair as SecpKeypair, Secp256k1, SecretKey};
use bitcoin::sighash::{Prevouts, SighashCache};
use bitcoin::taproot::{LeafVersion, TaprootBuilder, TaprootSpendInfo};
use bitcoin::{
    Address, Amount, Network, OutPoint, ScriptBuf, Sequence, TapSighashType, Transaction, TxIn,
    TxOut, Witness,
};

use originals_core::REVEAL_DUST_VALUE_SATS;

use crate::error::{BitcoinError, Result};

/// Everything needed to fund, build, and later reveal a Taproot
/// script-path inscription.
pub struct InscriptionKey {
    secp: Secp256k1<bitcoin::secp256k1::All>,
    internal_key: UntweakedPublicKey,
    envelope_script: ScriptBuf,
    spend_info: TaprootSpendInfo,
}

impl InscriptionKey {
    pub fn new(internal_key: UntweakedPublicKey, envelope_script: ScriptBuf) -> Result<Self> {
        let secp = Secp256k1::new();
        let spend_info = TaprootBuilder::new()
            .add_leaf(0, envelope_script.clone())
            .map_err(|e| BitcoinError::TransactionConstruction(e.to_string()))?
            .finalize(&secp, internal_key)
            .map_err(|_| BitcoinError::TransactionConstruction("taproot finalization failed".to_string()))?;
        Ok(Self { secp, internal_key, envelope_script, spend_info })
    }

    /// The address the commit transaction pays, derived from the
    /// inscription script's Taproot output key.
    pub fn commit_address(&self, network: Network) -> Address {
        Address::p2tr(&self.secp, self.internal_key, self.spend_info.merkle_root(), network)
    }

    pub fn commit_script_pubkey(&self, network: Network) -> ScriptBuf {
        self.commit_address(network).script_pubkey()
    }
}

/// Build the commit transaction: spends `funding_inputs` to a single P2TR
/// output derived from the inscription script, holding `commit_value_sats`.
pub fn build_commit_transaction(
    funding_inputs: &[OutPoint],
    commit_script_pubkey: ScriptBuf,
    commit_value_sats: u64,
    change_script_pubkey: Option<ScriptBuf>,
    change_value_sats: Option<u64>,
) -> Transaction {
    let mut output = vec![TxOut { value: Amount::from_sat(commit_value_sats), script_pubkey: commit_script_pubkey }];
    if let (Some(script), Some(value)) = (change_script_pubkey, change_value_sats) {
        output.push(TxOut { value: Amount::from_sat(value), script_pubkey: script });
    }

    Transaction {
        version: bitcoin::transaction::Version::TWO,
        lock_time: bitcoin::absolute::LockTime::ZERO,
        input: funding_inputs
            .iter()
            .map(|outpoint| TxIn {
                previous_output: *outpoint,
                script_sig: ScriptBuf::new(),
                sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
                witness: Witness::new(),
            })
            .collect(),
        output,
    }
}

/// Build and sign the reveal transaction: spends the commit output via the
/// script path, producing a dust-value output (§4.5) that carries the
/// inscribed satoshi as its first sat.
pub fn build_and_sign_reveal_transaction(
    key: &InscriptionKey,
    commit_outpoint: OutPoint,
    commit_value_sats: u64,
    destination: ScriptBuf,
    secret_key: &SecretKey,
) -> Result<Transaction> {
    let mut tx = Transaction {
        version: bitcoin::transaction::Version::TWO,
        lock_time: bitcoin::absolute::LockTime::ZERO,
        input: vec![TxIn {
            previous_output: commit_outpoint,
            script_sig: ScriptBuf::new(),
            sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
            witness: Witness::new(),
        }],
        output: vec![TxOut { value: Amount::from_sat(REVEAL_DUST_VALUE_SATS), script_pubkey: destination }],
    };

    let prevout = TxOut { value: Amount::from_sat(commit_value_sats), script_pubkey: key.commit_script_pubkey(Network::Bitcoin) };
    let leaf_hash = bitcoin::taproot::TapLeafHash::from_script(&key.envelope_script, LeafVersion::TapScript);

    let mut sighash_cache = SighashCache::new(&tx);
    let sighash = sighash_cache
        .taproot_script_spend_signature_hash(0, &Prevouts::All(&[prevout]), leaf_hash, TapSighashType::Default)
        .map_err(|e| BitcoinError::TransactionConstruction(e.to_string()))?;

    let keypair = SecpKeypair::from_secret_key(&key.secp, secret_key);
    let message = bitcoin::secp256k1::Message::from_digest(sighash.to_byte_array());
    let signature = key.secp.sign_schnorr(&message, &keypair);

    let control_block = key
        .spend_info
        .control_block(&(key.envelope_script.clone(), LeafVersion::TapScript))
        .ok_or_else(|| BitcoinError::TransactionConstruction("control block unavailable for envelope leaf".to_string()))?;

    let mut witness = Witness::new();
    witness.push(signature.as_ref());
    witness.push(key.envelope_script.as_bytes());
    witness.push(control_block.serialize());
    tx.input[0].witness = witness;

    Ok(tx)
}

/// The untweaked internal key for the commit output, derived from a raw
/// secret key the caller holds. `Address::p2tr` applies the script-tree
/// tweak itself, so this is just the key's x-only public point.
pub fn untweaked_internal_key(secp: &Secp256k1<bitcoin::secp256k1::All>, secret_key: &SecretKey) -> UntweakedPublicKey {
    let keypair = SecpKeypair::from_secret_key(secp, secret_key);
    let (xonly, _parity) = keypair.x_only_public_key();
    xonly
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::secp256k1::rand;

    fn sample_key() -> (Secp256k1<bitcoin::secp256k1::All>, SecretKey, UntweakedPublicKey) {
        let secp = Secp256k1::new();
        let secret_key = SecretKey::new(&mut rand::thread_rng());
        let keypair = SecpKeypair::from_secret_key(&secp, &secret_key);
        let (xonly, _) = keypair.x_only_public_key();
        (secp, secret_key, xonly)
    }

    #[test]
    fn commit_address_is_deterministic_for_the_same_script() {
        let (_, _, xonly) = sample_key();
        let script = ScriptBuf::from(vec![0x00]);
        let key = InscriptionKey::new(xonly, script).unwrap();
        let a = key.commit_address(Network::Regtest);
        let b = key.commit_address(Network::Regtest);
        assert_eq!(a, b);
    }
}
