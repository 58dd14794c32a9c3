use originals_core::P2TR_DUST_THRESHOLD_SATS;

use crate::error::{BitcoinError, Result};
use crate::size::estimate_vsize;

#[derive(Clone, Debug, PartialEq)]
pub struct Utxo {
    pub txid: String,
    pub vout: u32,
    pub value_sats: u64,
}

/// Extra script weight to account for when the recipient output itself
/// carries an inline inscription envelope, rather than a plain payment.
#[derive(Clone, Copy, Debug, Default)]
pub struct InscriptionDetails {
    pub envelope_script_len: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub inputs: Vec<Utxo>,
    pub change_sats: Option<u64>,
    pub fee_sats: u64,
    pub vsize: f64,
}

fn vsize_with_inscription(num_inputs: u32, num_outputs: u32, inscription: Option<&InscriptionDetails>) -> f64 {
    let base = estimate_vsize(num_inputs, num_outputs);
    match inscription {
        Some(details) => base + (details.envelope_script_len as f64 / 4.0).ceil(),
        None => base,
    }
}

/// Select UTXOs to cover `recipient_amount_sats` plus fees, walking
/// largest-first for minimal input count. At each step recompute both the
/// with-change and without-change vbyte estimates; a change output below
/// the P2TR dust threshold is dropped entirely into fees, per §4.5.
pub fn select_utxos(
    utxos: &[Utxo],
    recipient_amount_sats: u64,
    fee_rate_sat_per_vb: f64,
    inscription: Option<&InscriptionDetails>,
    output_count: u32,
) -> Result<Selection> {
    let mut ordered: Vec<Utxo> = utxos.to_vec();
    ordered.sort_by(|a, b| b.value_sats.cmp(&a.value_sats));

    let mut selected: Vec<Utxo> = Vec::new();
    let mut accumulated: u64 = 0;

    for utxo in ordered {
        accumulated += utxo.value_sats;
        selected.push(utxo);

        let with_change_outputs = output_count + 1;
        let with_change_vsize = vsize_with_inscription(selected.len() as u32, with_change_outputs, inscription);
        let with_change_fee = (with_change_vsize * fee_rate_sat_per_vb).ceil() as u64;
        let required_with_change = recipient_amount_sats.saturating_add(with_change_fee);

        if accumulated >= required_with_change {
            let change = accumulated - required_with_change;
            if change >= P2TR_DUST_THRESHOLD_SATS {
                return Ok(Selection { inputs: selected, change_sats: Some(change), fee_sats: with_change_fee, vsize: with_change_vsize });
            }
        }

        let without_change_vsize = vsize_with_inscription(selected.len() as u32, output_count, inscription);
        let without_change_fee = (without_change_vsize * fee_rate_sat_per_vb).ceil() as u64;
        let required_without_change = recipient_amount_sats.saturating_add(without_change_fee);

        if accumulated >= required_without_change {
            let fee = accumulated - recipient_amount_sats;
            return Ok(Selection { inputs: selected, change_sats: None, fee_sats: fee, vsize: without_change_vsize });
        }
    }

    Err(BitcoinError::InsufficientFunds { needed: recipient_amount_sats, available: accumulated })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utxo(value: u64) -> Utxo {
        Utxo { txid: format!("{value:064x}"), vout: 0, value_sats: value }
    }

    #[test]
    fn selects_largest_first_and_returns_change() {
        let utxos = vec![utxo(1_000), utxo(50_000), utxo(10_000)];
        let selection = select_utxos(&utxos, 20_000, 2.0, None, 1).unwrap();
        assert_eq!(selection.inputs[0].value_sats, 50_000);
        assert!(selection.change_sats.unwrap() > 0);
    }

    #[test]
    fn dust_change_is_folded_into_fee_instead_of_emitted() {
        // The recipient amount is sized so whatever is left after the
        // with-change fee sits just under the dust threshold.
        let utxos = vec![utxo(20_200)];
        let selection = select_utxos(&utxos, 20_000, 1.0, None, 1).unwrap();
        assert!(selection.change_sats.is_none());
        assert_eq!(selection.fee_sats, 200);
    }

    #[test]
    fn insufficient_utxos_report_the_shortfall() {
        let utxos = vec![utxo(100)];
        let err = select_utxos(&utxos, 10_000, 2.0, None, 1).unwrap_err();
        match err {
            BitcoinError::InsufficientFunds { needed, available } => {
                assert_eq!(needed, 10_000);
                assert_eq!(available, 100);
            }
            _ => panic!("expected InsufficientFunds"),
        }
    }
}
