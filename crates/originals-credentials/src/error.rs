use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("invalid credential subject: {0}")]
    InvalidSubject(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("verification failed: {0}")]
    VerificationFailed(String),

    #[error("credential chain broken at index {index}: {reason}")]
    ChainBroken { index: usize, reason: String },

    #[error("unsupported cryptosuite: {0}")]
    UnsupportedCryptosuite(String),
}

impl From<CredentialError> for originals_core::OriginalsError {
    fn from(e: CredentialError) -> Self {
        originals_core::OriginalsError::validation(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CredentialError>;
