use thiserror::Error;

#[derive(Debug, Error)]
pub enum DidError {
    #[error("unsupported DID method: {0}")]
    UnsupportedMethod(String),

    #[error("malformed DID: {0}")]
    Malformed(String),

    #[error("did:webvh log construction failed: {0}")]
    LogConstruction(String),

    #[error("resolution failed: {0}")]
    ResolutionFailed(String),
}

impl From<DidError> for originals_core::OriginalsError {
    fn from(e: DidError) -> Self {
        originals_core::OriginalsError::validation(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DidError>;
