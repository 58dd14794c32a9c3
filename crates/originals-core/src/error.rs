use thiserror::Error;

/// The error taxonomy shared by every layer of the Originals SDK.
///
/// Each variant corresponds to one of the kinds an implementer can match on;
/// the `message`/`cause`/`retryable` fields a caller sees are carried by the
/// variant's own fields rather than a separate envelope struct.
#[derive(Debug, Error)]
pub enum OriginalsError {
    // ── Validation ───────────────────────────────────────────────────────────
    #[error("validation error: {0}")]
    ValidationError(String),

    // ── Lifecycle state ──────────────────────────────────────────────────────
    #[error("illegal state transition: {0}")]
    StateError(String),

    // ── Configuration ─────────────────────────────────────────────────────────
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    // ── Cryptography ──────────────────────────────────────────────────────────
    #[error("crypto error: {0}")]
    CryptoError(String),

    // ── Lookup failures ───────────────────────────────────────────────────────
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    // ── Bitcoin funding ───────────────────────────────────────────────────────
    #[error("insufficient funds: need {need} sats, have {have} sats")]
    InsufficientFunds { need: u64, have: u64 },

    // ── Adapter I/O ───────────────────────────────────────────────────────────
    #[error("network error: {message}")]
    NetworkError { message: String, retryable: bool, cause: Option<String> },

    // ── Conflicting mutation ─────────────────────────────────────────────────
    #[error("conflict: {0}")]
    ConflictError(String),
}

impl OriginalsError {
    /// Whether a caller may reasonably retry the operation that produced this
    /// error. Only `NetworkError` carries retry information; every other kind
    /// is a caller-side defect that retrying will not fix.
    pub fn retryable(&self) -> bool {
        matches!(self, OriginalsError::NetworkError { retryable: true, .. })
    }

    /// The underlying error this one was raised in response to, if any
    /// (e.g. the transport error behind a failed adapter call), per spec
    /// §7's "structured error containing {kind, message, optional cause,
    /// optional retryable flag}".
    pub fn cause(&self) -> Option<&str> {
        match self {
            OriginalsError::NetworkError { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        Self::StateError(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    pub fn crypto(msg: impl Into<String>) -> Self {
        Self::CryptoError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::ResourceNotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::ConflictError(msg.into())
    }

    pub fn network(msg: impl Into<String>, retryable: bool) -> Self {
        Self::NetworkError { message: msg.into(), retryable, cause: None }
    }

    pub fn network_with_cause(msg: impl Into<String>, retryable: bool, cause: impl Into<String>) -> Self {
        Self::NetworkError { message: msg.into(), retryable, cause: Some(cause.into()) }
    }
}

pub type Result<T> = std::result::Result<T, OriginalsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_reports_retryable() {
        let e = OriginalsError::network("timed out", true);
        assert!(e.retryable());
        let e = OriginalsError::validation("bad input");
        assert!(!e.retryable());
    }

    #[test]
    fn network_error_carries_an_optional_cause() {
        let e = OriginalsError::network("timed out", true);
        assert!(e.cause().is_none());
        let e = OriginalsError::network_with_cause("request failed", true, "connection reset by peer");
        assert_eq!(e.cause(), Some("connection reset by peer"));
        assert!(OriginalsError::validation("bad input").cause().is_none());
    }
}
