use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("multicodec header mismatch: expected {expected:#x}, found {found:#x}")]
    MulticodecMismatch { expected: u64, found: u64 },

    #[error("key length mismatch: expected {expected} bytes, found {found}")]
    KeyLengthMismatch { expected: usize, found: usize },

    #[error("signature verification failed")]
    VerificationFailed,

    #[error("multibase decode error: {0}")]
    MultibaseDecode(String),

    #[error("underlying curve operation failed: {0}")]
    CurveError(String),
}

impl From<CryptoError> for originals_core::OriginalsError {
    fn from(e: CryptoError) -> Self {
        originals_core::OriginalsError::crypto(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CryptoError>;
