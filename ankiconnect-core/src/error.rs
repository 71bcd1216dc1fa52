use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse classification of an [`AnkiError`], used to decide how far a
/// failure propagates through a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The endpoint could not be reached or answered with a non-success status.
    Transport,
    /// The reply did not match the `{error, result}` envelope contract.
    Protocol,
    /// AnkiConnect executed the action and reported a failure.
    Api,
    /// The caller supplied arguments the protocol cannot express.
    InvalidArgument,
    /// The dispatch owning a result was dropped before delivering it.
    Abandoned,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Api => "api",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Abandoned => "abandoned",
        };
        write!(f, "{}", s)
    }
}

/// Every failure a call can end in.
///
/// The type is `Clone` because a single transport or count-mismatch failure
/// is delivered to every handle of the affected flush.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnkiError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("HTTP error occurred: {status} {body}")]
    HttpStatus { status: u16, body: String },
    #[error("Unexpected API response: {0}")]
    Protocol(String),
    #[error("AnkiConnect error: {0}")]
    Api(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Batch was abandoned before its response was delivered")]
    Abandoned,
}

impl AnkiError {
    pub fn transport(message: impl Into<String>) -> Self {
        AnkiError::Transport(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        AnkiError::Protocol(message.into())
    }

    pub fn api(message: impl Into<String>) -> Self {
        AnkiError::Api(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AnkiError::InvalidArgument(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AnkiError::Transport(_) | AnkiError::HttpStatus { .. } => ErrorKind::Transport,
            AnkiError::Protocol(_) => ErrorKind::Protocol,
            AnkiError::Api(_) => ErrorKind::Api,
            AnkiError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            AnkiError::Abandoned => ErrorKind::Abandoned,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    pub fn is_protocol(&self) -> bool {
        self.kind() == ErrorKind::Protocol
    }

    pub fn is_api(&self) -> bool {
        self.kind() == ErrorKind::Api
    }
}

impl From<serde_json::Error> for AnkiError {
    fn from(err: serde_json::Error) -> Self {
        AnkiError::Protocol(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AnkiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AnkiError::transport("down").kind(), ErrorKind::Transport);
        assert_eq!(
            AnkiError::HttpStatus {
                status: 500,
                body: "oops".into()
            }
            .kind(),
            ErrorKind::Transport
        );
        assert_eq!(AnkiError::protocol("bad").kind(), ErrorKind::Protocol);
        assert_eq!(AnkiError::api("boom").kind(), ErrorKind::Api);
        assert_eq!(
            AnkiError::invalid_argument("ease").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(AnkiError::Abandoned.kind(), ErrorKind::Abandoned);
    }

    #[test]
    fn test_classifiers() {
        assert!(AnkiError::transport("x").is_transport());
        assert!(!AnkiError::transport("x").is_api());
        assert!(AnkiError::protocol("x").is_protocol());
        assert!(AnkiError::api("x").is_api());
    }

    #[test]
    fn test_error_display() {
        let err = AnkiError::api("deck was not found");
        assert_eq!(err.to_string(), "AnkiConnect error: deck was not found");

        let err = AnkiError::HttpStatus {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "HTTP error occurred: 403 forbidden");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::InvalidArgument.to_string(), "invalid_argument");
        assert_eq!(ErrorKind::Transport.to_string(), "transport");
    }

    #[test]
    fn test_from_json_error_is_protocol() {
        let err: AnkiError = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
        assert!(err.is_protocol());
    }
}
