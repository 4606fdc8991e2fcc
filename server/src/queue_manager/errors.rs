use crate::store::StoreError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum QueueError {
    /// Status lookup for a token that is not in the waiting list
    TokenNotFound(String),

    /// The state store failed; never retried
    Store(StoreError),

    /// A command produced a response of the wrong shape
    UnexpectedResponse(String),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::TokenNotFound(token) => write!(f, "Token not found: {token}"),
            QueueError::Store(err) => write!(f, "State store error: {err}"),
            QueueError::UnexpectedResponse(msg) => write!(f, "Unexpected response: {msg}"),
        }
    }
}

impl std::error::Error for QueueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueueError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl QueueError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueueError::TokenNotFound(_))
    }
}

impl From<StoreError> for QueueError {
    fn from(err: StoreError) -> Self {
        QueueError::Store(err)
    }
}

// Result type alias for convenience
pub type QueueResult<T> = Result<T, QueueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_conversion() {
        let err: QueueError = StoreError::Connection {
            reason: "refused".to_string(),
        }
        .into();
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "State store error: Store connection failed: refused"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_not_found() {
        let err = QueueError::TokenNotFound("T7".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Token not found: T7");
    }
}
