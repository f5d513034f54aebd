//! Message type extraction.
//!
//! Producers either put the routing type directly on the SQS message as a
//! `MessageType` attribute, or publish through SNS, which wraps the payload
//! in a notification envelope and copies the attributes into it:
//!
//! ```json
//! {
//!   "Message": "{\"id\":2}",
//!   "MessageAttributes": {
//!     "MessageType": { "Type": "String", "Value": "OrderShipped" }
//!   }
//! }
//! ```
//!
//! The direct attribute always wins. The body is only parsed as an envelope
//! when the attribute is absent.

use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::SqsPollerError;
use crate::transport::RawMessage;

/// Attribute name carrying the logical message type in both encodings.
pub const MESSAGE_TYPE_ATTRIBUTE: &str = "MessageType";

/// Notification wrapper around the real payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEnvelope {
    #[serde(rename = "Message", alias = "message")]
    pub message: String,

    #[serde(rename = "MessageAttributes", alias = "messageAttributes", default)]
    pub message_attributes: HashMap<String, EnvelopeAttribute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopeAttribute {
    #[serde(rename = "Type", alias = "type", default)]
    pub data_type: Option<String>,

    #[serde(rename = "Value", alias = "value")]
    pub value: String,
}

impl MessageEnvelope {
    pub fn parse(body: &str) -> Result<Self, SqsPollerError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.message_attributes
            .get(name)
            .map(|attr| attr.value.as_str())
            .filter(|value| !value.is_empty())
    }
}

/// The routing decision for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedMessage {
    pub message_type: String,

    /// What the handler receives: the raw body, or the envelope's inner
    /// message when the type came from the envelope.
    pub payload: String,
}

/// Determines the logical type and effective payload of a message.
///
/// An empty `MessageType` value counts as absent, in both encodings.
pub fn extract_message_type(message: &RawMessage) -> Result<TypedMessage, SqsPollerError> {
    if let Some(message_type) = message
        .attributes
        .get(MESSAGE_TYPE_ATTRIBUTE)
        .filter(|value| !value.is_empty())
    {
        return Ok(TypedMessage {
            message_type: message_type.clone(),
            payload: message.body.clone(),
        });
    }

    let envelope = MessageEnvelope::parse(&message.body)?;
    let message_type = envelope
        .attribute(MESSAGE_TYPE_ATTRIBUTE)
        .ok_or(SqsPollerError::MissingMessageType)?
        .to_string();

    Ok(TypedMessage {
        message_type,
        payload: envelope.message,
    })
}
