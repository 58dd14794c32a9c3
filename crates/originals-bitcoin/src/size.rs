use originals_core::{
    P2TR_KEY_PATH_INPUT_VBYTES, P2TR_OUTPUT_VBYTES, TX_BASE_OVERHEAD_VBYTES,
};

/// Non-witness portion of a P2TR input (outpoint, sequence, empty scriptSig
/// length byte), independent of spend path.
const P2TR_INPUT_BASE_VBYTES: f64 = 41.0;

/// Witness bytes are discounted 4:1 against vsize (BIP 141).
const WITNESS_DISCOUNT: f64 = 4.0;

/// Estimated vsize of a transaction funded entirely by key-path P2TR inputs,
/// with no inscription reveal, per §4.5.
pub fn estimate_vsize(num_inputs: u32, num_outputs: u32) -> f64 {
    TX_BASE_OVERHEAD_VBYTES
        + num_inputs as f64 * P2TR_KEY_PATH_INPUT_VBYTES
        + num_outputs as f64 * P2TR_OUTPUT_VBYTES
}

/// Estimated vsize of a reveal transaction: `funding_inputs` ordinary P2TR
/// key-path inputs, one script-path input whose witness carries
/// `control_block_len + envelope_script_len` bytes, and `num_outputs`
/// standard P2TR outputs.
pub fn estimate_reveal_vsize(funding_inputs: u32, control_block_len: usize, envelope_script_len: usize, num_outputs: u32) -> f64 {
    let witness_bytes = (control_block_len + envelope_script_len) as f64;
    let script_path_input_vbytes = P2TR_INPUT_BASE_VBYTES + (witness_bytes / WITNESS_DISCOUNT).ceil();

    TX_BASE_OVERHEAD_VBYTES
        + funding_inputs as f64 * P2TR_KEY_PATH_INPUT_VBYTES
        + script_path_input_vbytes
        + num_outputs as f64 * P2TR_OUTPUT_VBYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_input_single_output_matches_base_plus_one_of_each() {
        let vsize = estimate_vsize(1, 1);
        assert_eq!(vsize, TX_BASE_OVERHEAD_VBYTES + P2TR_KEY_PATH_INPUT_VBYTES + P2TR_OUTPUT_VBYTES);
    }

    #[test]
    fn reveal_vsize_grows_with_envelope_script_length() {
        let small = estimate_reveal_vsize(1, 33, 100, 1);
        let large = estimate_reveal_vsize(1, 33, 10_000, 1);
        assert!(large > small);
    }
}
