use bitcoin::opcodes::all::{OP_ENDIF, OP_IF};
use bitcoin::opcodes::OP_FALSE;
use bitcoin::script::{Builder, PushBytesBuf};
use bitcoin::ScriptBuf;

use originals_core::{PUSHDATA1_THRESHOLD_BYTES, PUSHDATA2_THRESHOLD_BYTES, TAPSCRIPT_PUSH_LIMIT_BYTES};

use crate::error::{BitcoinError, Result};

const PROTOCOL_TAG: &[u8] = b"ord";
const CONTENT_TYPE_TAG: u8 = 1;
const METAPROTOCOL_TAG: u8 = 7;
const METADATA_TAG: u8 = 5;

fn push_bytes(builder: Builder, bytes: &[u8]) -> Result<Builder> {
    if bytes.len() > TAPSCRIPT_PUSH_LIMIT_BYTES {
        return Err(BitcoinError::PushTooLarge { len: bytes.len(), limit: TAPSCRIPT_PUSH_LIMIT_BYTES });
    }
    let buf = PushBytesBuf::try_from(bytes.to_vec()).map_err(|e| BitcoinError::TransactionConstruction(e.to_string()))?;
    Ok(builder.push_slice(buf))
}

fn push_tagged(builder: Builder, tag: u8, value: &[u8]) -> Result<Builder> {
    let builder = push_bytes(builder, &[tag])?;
    push_bytes(builder, value)
}

/// Split `data` into chunks no larger than the tapscript single-push limit.
fn chunk(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    data.chunks(TAPSCRIPT_PUSH_LIMIT_BYTES)
}

/// The byte cost of a single push, including its `OP_PUSHBYTES`/`OP_PUSHDATAN`
/// prefix, per §4.5.
pub fn push_overhead(len: usize) -> usize {
    if len < PUSHDATA1_THRESHOLD_BYTES {
        1
    } else if len < PUSHDATA2_THRESHOLD_BYTES {
        2
    } else {
        3
    }
}

#[derive(Clone, Debug, Default)]
pub struct EnvelopeContent {
    pub content_type: String,
    pub body: Vec<u8>,
    pub metaprotocol: Option<String>,
    pub cbor_metadata: Option<Vec<u8>>,
}

/// Build the inscription envelope script: `OP_FALSE OP_IF ... OP_ENDIF`
/// wrapping the `ord` protocol tag, a content-type push, optional
/// metaprotocol and CBOR metadata pushes, a body separator, and the content
/// itself chunked at the tapscript push limit, per §4.5.
pub fn build_envelope_script(content: &EnvelopeContent) -> Result<ScriptBuf> {
    let mut builder = Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF);
    builder = push_bytes(builder, PROTOCOL_TAG)?;
    builder = push_tagged(builder, CONTENT_TYPE_TAG, content.content_type.as_bytes())?;

    if let Some(metaprotocol) = &content.metaprotocol {
        builder = push_tagged(builder, METAPROTOCOL_TAG, metaprotocol.as_bytes())?;
    }

    if let Some(metadata) = &content.cbor_metadata {
        for piece in chunk(metadata) {
            builder = push_tagged(builder, METADATA_TAG, piece)?;
        }
    }

    builder = builder.push_opcode(OP_FALSE);
    for piece in chunk(&content.body) {
        builder = push_bytes(builder, piece)?;
    }

    builder = builder.push_opcode(OP_ENDIF);
    Ok(builder.into_script())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_roundtrips_a_small_plain_text_inscription() {
        let content = EnvelopeContent {
            content_type: "text/plain".to_string(),
            body: b"hello originals".to_vec(),
            metaprotocol: None,
            cbor_metadata: None,
        };
        let script = build_envelope_script(&content).unwrap();
        assert!(script.len() > content.body.len());
    }

    #[test]
    fn body_separator_is_a_single_op_0_byte_not_a_data_push() {
        let content = EnvelopeContent { content_type: "text/plain".to_string(), body: b"hi".to_vec(), metaprotocol: None, cbor_metadata: None };
        let script = build_envelope_script(&content).unwrap();
        let bytes = script.as_bytes();
        // OP_FALSE OP_IF "ord" <tag 1><"text/plain"> OP_0 "hi" OP_ENDIF
        let content_type_push_end = 1 + 1 + 1 + PROTOCOL_TAG.len() + 1 + 1 + 1 + content.content_type.len();
        assert_eq!(bytes[content_type_push_end], 0x00);
        assert_eq!(bytes[content_type_push_end + 1], b'h');
    }

    #[test]
    fn push_overhead_crosses_pushdata_boundaries() {
        assert_eq!(push_overhead(10), 1);
        assert_eq!(push_overhead(200), 2);
        assert_eq!(push_overhead(400), 3);
    }

    #[test]
    fn oversized_single_push_is_rejected() {
        let content = EnvelopeContent {
            content_type: "x".repeat(600),
            body: Vec::new(),
            metaprotocol: None,
            cbor_metadata: None,
        };
        assert!(build_envelope_script(&content).is_err());
    }

    #[test]
    fn body_larger_than_one_chunk_still_builds() {
        let content = EnvelopeContent {
            content_type: "application/octet-stream".to_string(),
            body: vec![7u8; 1200],
            metaprotocol: None,
            cbor_metadata: None,
        };
        let script = build_envelope_script(&content).unwrap();
        assert!(script.len() > 1200);
    }
}
