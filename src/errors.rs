use std::str::FromStr;

use thiserror::Error;

/// Error types for the SQS poller.
///
/// Only [`SqsPollerError::QueueUrlResolution`] at startup ever stops the
/// polling loop. Every other variant is recovered locally: the batch or the
/// single message is skipped and the queue's visibility timeout takes care
/// of redelivery.
#[derive(Debug, Error)]
pub enum SqsPollerError {
    /// The poller configuration is incomplete or out of range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A receive or delete call against the queue failed.
    #[error("queue transport error: {0}")]
    Transport(String),

    /// The queue name could not be resolved to a URL.
    #[error("failed to resolve queue url for '{queue_name}': {message}")]
    QueueUrlResolution { queue_name: String, message: String },

    /// Neither the message attributes nor the envelope carried a type.
    #[error("message has no MessageType attribute")]
    MissingMessageType,

    /// The body had no direct type attribute and was not a valid envelope.
    #[error("message body is not a valid envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),

    #[error("no handler registered for message type '{0}'")]
    NoHandler(String),

    #[error("handler for message type '{0}' panicked")]
    HandlerPanicked(String),

    #[error("{0}")]
    GenericError(#[from] GenericError),
}

/// Generic error type handlers return for business failures.
#[derive(Debug, Error)]
pub struct GenericError(String);

impl GenericError {
    /// Creates a new `GenericError` with the provided message.
    pub fn new(message: String) -> Self {
        GenericError(message)
    }
}

impl std::fmt::Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GenericError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GenericError::new(s.to_string()))
    }
}

impl From<String> for GenericError {
    fn from(s: String) -> Self {
        GenericError::new(s)
    }
}

impl From<&str> for GenericError {
    fn from(s: &str) -> Self {
        GenericError::new(s.to_string())
    }
}
