use originals_core::Layer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("illegal layer transition: {from} -> {to}")]
    IllegalTransition { from: Layer, to: Layer },

    #[error("asset has no recorded inscription to transfer")]
    NoInscription,

    #[error("invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("manifest carries no resources")]
    EmptyManifest,
}

impl From<LifecycleError> for originals_core::OriginalsError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::IllegalTransition { .. } => originals_core::OriginalsError::state(e.to_string()),
            _ => originals_core::OriginalsError::validation(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LifecycleError>;
