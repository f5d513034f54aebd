use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::SqsPollerError;

/// A message as handed over by the queue.
///
/// Owned by the consumption cycle for one handling attempt and dropped
/// afterwards, whether or not it was deleted.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub message_id: Option<String>,

    /// Opaque token required to delete the message.
    pub receipt_handle: String,

    pub body: String,

    /// String-valued message attributes.
    pub attributes: HashMap<String, String>,

    pub received_at: DateTime<Utc>,
}

impl RawMessage {
    /// Creates a message received now with no attributes.
    pub fn new(receipt_handle: impl Into<String>, body: impl Into<String>) -> Self {
        RawMessage {
            message_id: None,
            receipt_handle: receipt_handle.into(),
            body: body.into(),
            attributes: HashMap::new(),
            received_at: Utc::now(),
        }
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// The queue operations the poller needs.
///
/// Implemented for `aws_sdk_sqs::Client` in [`crate::client`]. Retries,
/// authentication and network details belong to the implementation.
#[async_trait]
pub trait QueueTransport: Send + Sync {
    /// Receives up to `max_messages` messages, long-polling for at most
    /// `wait_time_seconds`.
    async fn receive(
        &self,
        queue_url: &str,
        max_messages: i32,
        wait_time_seconds: i32,
        attribute_names: &[String],
    ) -> Result<Vec<RawMessage>, SqsPollerError>;

    async fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<(), SqsPollerError>;

    /// Looks up the absolute URL of a queue by name.
    async fn resolve_queue_url(
        &self,
        queue_name: &str,
        owner_account_id: Option<&str>,
    ) -> Result<String, SqsPollerError>;
}
