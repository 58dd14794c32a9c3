use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};

use crate::error::Result;

/// Move the UTXO holding an inscribed satoshi to a new owner's address. No
/// new inscription is created and the satoshi/inscription id are untouched
/// (§4.5); this only spends the existing output to a fresh Taproot output.
pub fn build_transfer_transaction(
    inscription_outpoint: OutPoint,
    inscription_value_sats: u64,
    destination_script_pubkey: ScriptBuf,
    funding_inputs: &[OutPoint],
    change_script_pubkey: Option<ScriptBuf>,
    change_value_sats: Option<u64>,
) -> Result<Transaction> {
    let mut input = vec![TxIn {
        previous_output: inscription_outpoint,
        script_sig: ScriptBuf::new(),
        sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
        witness: Witness::new(),
    }];
    input.extend(funding_inputs.iter().map(|outpoint| TxIn {
        previous_output: *outpoint,
        script_sig: ScriptBuf::new(),
        sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
        witness: Witness::new(),
    }));

    let mut output = vec![TxOut { value: Amount::from_sat(inscription_value_sats), script_pubkey: destination_script_pubkey }];
    if let (Some(script), Some(value)) = (change_script_pubkey, change_value_sats) {
        output.push(TxOut { value: Amount::from_sat(value), script_pubkey: script });
    }

    Ok(Transaction {
        version: bitcoin::transaction::Version::TWO,
        lock_time: bitcoin::absolute::LockTime::ZERO,
        input,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::Txid;

    #[test]
    fn inscribed_satoshi_is_the_first_output_and_keeps_its_value() {
        let outpoint = OutPoint { txid: Txid::from_byte_array([0u8; 32]), vout: 0 };
        let destination = ScriptBuf::new();
        let tx = build_transfer_transaction(outpoint, 546, destination, &[], None, None).unwrap();
        assert_eq!(tx.output[0].value.to_sat(), 546);
        assert_eq!(tx.input.len(), 1);
    }
}
