use thiserror::Error;

/// Failures raised by a [`StateStore`](super::StateStore) backend.
///
/// Store failures are not recovered from; the queue manager propagates them
/// to its caller unchanged.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend could not be reached or the connection dropped
    #[error("Store connection failed: {reason}")]
    Connection { reason: String },

    /// A backend command was rejected or failed mid-flight
    #[error("Store command '{command}' failed: {reason}")]
    Command { command: String, reason: String },

    /// Stored data could not be encoded or decoded
    #[error("Store serialization failed for key '{key}': {reason}")]
    Serialization { key: String, reason: String },
}

impl StoreError {
    pub fn command(command: impl Into<String>, reason: impl ToString) -> Self {
        Self::Command {
            command: command.into(),
            reason: reason.to_string(),
        }
    }

    pub fn serialization(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Serialization {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = StoreError::command("RPUSH", "READONLY replica");
        assert_eq!(err.to_string(), "Store command 'RPUSH' failed: READONLY replica");

        let err = StoreError::serialization("queue", "expected value");
        assert!(err.to_string().contains("'queue'"));
    }
}
