use thiserror::Error;

/// Shown when the service rejects a word without a usable error payload.
pub const GENERIC_SERVICE_MESSAGE: &str = "Failed to get prediction";

/// Shown for anything that went wrong before a response could be read.
pub const CONNECTION_MESSAGE: &str = "Connection error. Is the backend running?";

/// Why a prediction request did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// The service answered with a non-2xx status.
    #[error("{0}")]
    Service(String),

    /// The request never completed, or the response body could not be decoded.
    #[error("transport error: {0}")]
    Transport(String),
}

impl PredictError {
    /// The text the user gets to see for this error.
    ///
    /// Service errors carry their own message; transport errors are collapsed
    /// into a single generic message and only the log keeps the details.
    pub fn user_message(&self) -> &str {
        match self {
            PredictError::Service(message) => message,
            PredictError::Transport(_) => CONNECTION_MESSAGE,
        }
    }
}

/// A platform capability (clipboard, haptics) failed.
///
/// These are logged and never reach the user.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("haptics unavailable: {0}")]
    Haptics(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_keep_their_message() {
        let err = PredictError::Service("word too short".to_string());
        assert_eq!(err.user_message(), "word too short");
        assert_eq!(err.to_string(), "word too short");
    }

    #[test]
    fn transport_errors_hide_details() {
        let err = PredictError::Transport("connection refused (os error 111)".to_string());
        assert_eq!(err.user_message(), CONNECTION_MESSAGE);
        assert!(err.to_string().contains("os error 111"));
    }
}
