use thiserror::Error;

#[derive(Debug, Error)]
pub enum BitcoinError {
    #[error("insufficient funds: need {needed} sats, have {available} sats")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("output of {0} sats is below the P2TR dust threshold")]
    BelowDustThreshold(u64),

    #[error("content push of {len} bytes exceeds the tapscript limit of {limit} bytes per chunk")]
    PushTooLarge { len: usize, limit: usize },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("cbor encoding failed: {0}")]
    CborEncoding(String),

    #[error("cbor decoding failed: {0}")]
    CborDecoding(String),

    #[error("transaction construction failed: {0}")]
    TransactionConstruction(String),
}

impl From<BitcoinError> for originals_core::OriginalsError {
    fn from(e: BitcoinError) -> Self {
        originals_core::OriginalsError::validation(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BitcoinError>;
