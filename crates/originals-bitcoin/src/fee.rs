use crate::envelope::{push_overhead, EnvelopeContent};
use crate::size::{estimate_reveal_vsize, estimate_vsize};

/// Desired confirmation speed; a Fee Oracle adapter resolves this to a
/// sat/vB rate from current mempool conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmationSpeed {
    Economy,
    Standard,
    Priority,
}

/// Estimated byte length of an inscription envelope's content push
/// section, used to size the reveal transaction ahead of constructing the
/// real script.
pub fn estimate_envelope_len(content: &EnvelopeContent) -> usize {
    let mut len = 3 + 1 + push_overhead(content.content_type.len()) + content.content_type.len();
    if let Some(meta) = &content.metaprotocol {
        len += 1 + push_overhead(meta.len()) + meta.len();
    }
    if let Some(cbor) = &content.cbor_metadata {
        for chunk in cbor.chunks(520) {
            len += 1 + push_overhead(chunk.len()) + chunk.len();
        }
    }
    len += 1; // body separator
    for chunk in content.body.chunks(520) {
        len += push_overhead(chunk.len()) + chunk.len();
    }
    len + 2 // OP_FALSE OP_IF / OP_ENDIF
}

/// Total fee, in satoshis, for the commit transaction at `fee_rate_sat_per_vb`.
pub fn estimate_commit_fee(num_inputs: u32, num_outputs: u32, fee_rate_sat_per_vb: f64) -> u64 {
    (estimate_vsize(num_inputs, num_outputs) * fee_rate_sat_per_vb).ceil() as u64
}

/// Total fee, in satoshis, for the reveal transaction carrying `content`.
pub fn estimate_reveal_fee(funding_inputs: u32, control_block_len: usize, content: &EnvelopeContent, num_outputs: u32, fee_rate_sat_per_vb: f64) -> u64 {
    let envelope_len = estimate_envelope_len(content);
    (estimate_reveal_vsize(funding_inputs, control_block_len, envelope_len, num_outputs) * fee_rate_sat_per_vb).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn larger_content_raises_the_reveal_fee() {
        let small = EnvelopeContent { content_type: "text/plain".to_string(), body: vec![0u8; 10], metaprotocol: None, cbor_metadata: None };
        let large = EnvelopeContent { content_type: "text/plain".to_string(), body: vec![0u8; 10_000], metaprotocol: None, cbor_metadata: None };
        assert!(estimate_reveal_fee(1, 33, &large, 1, 2.0) > estimate_reveal_fee(1, 33, &small, 1, 2.0));
    }
}
