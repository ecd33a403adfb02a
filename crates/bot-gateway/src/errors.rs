//! Bot gateway error types.
//!
//! Every failure surfaced by the client is a [`BotError`]. Remote failures
//! arrive as `tonic::Status` and are mapped onto typed variants so callers can
//! match on the cause instead of parsing status messages. [`BotError::kind`]
//! collapses the variants into the coarse call-level taxonomy:
//!
//! - `Connection`: transport could not be established or was lost
//! - `InvalidArgument`: a required field was missing or empty
//! - `Stream`: the join stream terminated abnormally
//! - `Cancellation`: the caller's context was cancelled or expired
//! - `Remote`: any other status returned by the bot service
//! - `Config`: local configuration was rejected

use thiserror::Error;
use tonic::{Code, Status};

/// Bot gateway error type.
#[derive(Debug, Clone, Error)]
pub enum BotError {
    /// Configuration error (invalid endpoint, unreadable TLS material).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport could not be established, was lost, or the client is closed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A required field was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The bot session does not exist on the remote side.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The bot session is already active on the remote side.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The caller's cancellation token fired.
    #[error("Call cancelled")]
    Cancelled,

    /// The caller's deadline expired.
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// The join stream terminated abnormally after it was opened.
    #[error("Join stream error: {0}")]
    Stream(String),

    /// Any other status returned by the bot service.
    #[error("Bot service error ({code:?}): {message}")]
    Remote { code: Code, message: String },

    /// Internal client error (background task failure).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`BotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Connection,
    InvalidArgument,
    Stream,
    Cancellation,
    Remote,
}

impl BotError {
    /// Returns the coarse error kind for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::Config(_) => ErrorKind::Config,
            BotError::Connection(_) => ErrorKind::Connection,
            BotError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            BotError::Stream(_) | BotError::Internal(_) => ErrorKind::Stream,
            BotError::Cancelled | BotError::DeadlineExceeded => ErrorKind::Cancellation,
            BotError::NotFound(_) | BotError::AlreadyExists(_) | BotError::Remote { .. } => {
                ErrorKind::Remote
            }
        }
    }

    /// Whether the caller may reasonably retry the same call.
    ///
    /// The client itself never retries; this is a hint for callers.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            BotError::Connection(_) | BotError::Stream(_) | BotError::DeadlineExceeded => true,
            BotError::Remote { code, .. } => {
                matches!(code, Code::Unavailable | Code::ResourceExhausted | Code::Aborted)
            }
            BotError::Config(_)
            | BotError::InvalidArgument(_)
            | BotError::NotFound(_)
            | BotError::AlreadyExists(_)
            | BotError::Cancelled
            | BotError::Internal(_) => false,
        }
    }

    /// Metric label for this error (bounded set).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            BotError::Config(_) => "config",
            BotError::Connection(_) => "connection",
            BotError::InvalidArgument(_) => "invalid_argument",
            BotError::NotFound(_) => "not_found",
            BotError::AlreadyExists(_) => "already_exists",
            BotError::Cancelled => "cancelled",
            BotError::DeadlineExceeded => "deadline_exceeded",
            BotError::Stream(_) => "stream",
            BotError::Remote { .. } => "remote",
            BotError::Internal(_) => "internal",
        }
    }

    /// Map a status received while a join stream was already open.
    ///
    /// Typed kinds keep their variant; anything generic becomes
    /// [`BotError::Stream`] so the consumer can tell it apart from a
    /// clean end of stream.
    #[must_use]
    pub fn from_stream_status(status: &Status) -> Self {
        match BotError::from(status) {
            BotError::Remote { code, message } => {
                BotError::Stream(format!("{}: {message}", code.description()))
            }
            BotError::Connection(message) => BotError::Stream(message),
            other => other,
        }
    }
}

impl From<&Status> for BotError {
    fn from(status: &Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            Code::InvalidArgument => BotError::InvalidArgument(message),
            Code::Unavailable => BotError::Connection(message),
            Code::Cancelled => BotError::Cancelled,
            Code::DeadlineExceeded => BotError::DeadlineExceeded,
            Code::NotFound => BotError::NotFound(message),
            Code::AlreadyExists => BotError::AlreadyExists(message),
            code => BotError::Remote { code, message },
        }
    }
}

impl From<Status> for BotError {
    fn from(status: Status) -> Self {
        BotError::from(&status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            BotError::from(Status::invalid_argument("missing required fields")),
            BotError::InvalidArgument(msg) if msg == "missing required fields"
        ));
        assert!(matches!(
            BotError::from(Status::unavailable("connection refused")),
            BotError::Connection(_)
        ));
        assert!(matches!(
            BotError::from(Status::cancelled("gone")),
            BotError::Cancelled
        ));
        assert!(matches!(
            BotError::from(Status::deadline_exceeded("slow")),
            BotError::DeadlineExceeded
        ));
        assert!(matches!(
            BotError::from(Status::not_found("no session")),
            BotError::NotFound(_)
        ));
        assert!(matches!(
            BotError::from(Status::already_exists("bot active")),
            BotError::AlreadyExists(_)
        ));
        assert!(matches!(
            BotError::from(Status::internal("boom")),
            BotError::Remote {
                code: Code::Internal,
                ..
            }
        ));
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            BotError::InvalidArgument("x".to_string()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            BotError::Connection("x".to_string()).kind(),
            ErrorKind::Connection
        );
        assert_eq!(BotError::Cancelled.kind(), ErrorKind::Cancellation);
        assert_eq!(BotError::DeadlineExceeded.kind(), ErrorKind::Cancellation);
        assert_eq!(BotError::Stream("x".to_string()).kind(), ErrorKind::Stream);
        assert_eq!(BotError::NotFound("x".to_string()).kind(), ErrorKind::Remote);
        assert_eq!(BotError::Config("x".to_string()).kind(), ErrorKind::Config);
    }

    #[test]
    fn test_stream_status_mapping() {
        // Generic failures become Stream errors
        let err = BotError::from_stream_status(&Status::internal("bot crashed"));
        assert!(matches!(err, BotError::Stream(msg) if msg.contains("bot crashed")));

        let err = BotError::from_stream_status(&Status::unavailable("reset"));
        assert!(matches!(err, BotError::Stream(_)));

        // Typed kinds are preserved
        let err = BotError::from_stream_status(&Status::invalid_argument("missing url"));
        assert!(matches!(err, BotError::InvalidArgument(_)));

        let err = BotError::from_stream_status(&Status::already_exists("bot active"));
        assert!(matches!(err, BotError::AlreadyExists(_)));
    }

    #[test]
    fn test_retryable() {
        assert!(BotError::Connection("x".to_string()).is_retryable());
        assert!(BotError::Stream("x".to_string()).is_retryable());
        assert!(!BotError::InvalidArgument("x".to_string()).is_retryable());
        assert!(!BotError::Cancelled.is_retryable());
        assert!(BotError::Remote {
            code: Code::ResourceExhausted,
            message: String::new()
        }
        .is_retryable());
        assert!(!BotError::Remote {
            code: Code::PermissionDenied,
            message: String::new()
        }
        .is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(BotError::Cancelled.to_string(), "Call cancelled");
        assert_eq!(
            BotError::InvalidArgument("missing IDs".to_string()).to_string(),
            "Invalid argument: missing IDs"
        );
    }
}
