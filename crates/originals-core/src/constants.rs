//! Shared numeric constants referenced by the resource, kind, and bitcoin
//! layers. Kept centralized so a single source of truth backs every crate
//! that needs a dust threshold or a size ceiling.

/// Default maximum resource content size, per §4.1.
pub const DEFAULT_MAX_RESOURCE_BYTES: u64 = 10 * 1024 * 1024;

/// P2TR dust threshold in satoshis; outputs below this are unsafe to emit
/// and are folded into fee instead (§4.5).
pub const P2TR_DUST_THRESHOLD_SATS: u64 = 330;

/// Typical reveal-transaction output value holding the inscribed satoshi,
/// per §4.5's commit/reveal description.
pub const REVEAL_DUST_VALUE_SATS: u64 = 546;

/// Fixed base overhead of a transaction, in virtual bytes.
pub const TX_BASE_OVERHEAD_VBYTES: f64 = 10.5;

/// Virtual-byte cost of one P2TR key-path spend input.
pub const P2TR_KEY_PATH_INPUT_VBYTES: f64 = 58.0;

/// Virtual-byte cost of one P2TR output.
pub const P2TR_OUTPUT_VBYTES: f64 = 31.0;

/// Tapscript single-push size limit; CBOR metadata and content are chunked
/// at this boundary (§4.5).
pub const TAPSCRIPT_PUSH_LIMIT_BYTES: usize = 520;

/// `OP_PUSHDATA1` is used for pushes above this length...
pub const PUSHDATA1_THRESHOLD_BYTES: usize = 76;

/// ...and `OP_PUSHDATA2` above this one, up to the 520-byte tapscript limit.
pub const PUSHDATA2_THRESHOLD_BYTES: usize = 256;
