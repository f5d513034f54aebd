//! # SQS Poller
//!
//! A long-running AWS SQS consumer that routes each message to a handler
//! chosen by its `MessageType` and deletes the message only after that
//! handler succeeds.
//!
//! ## Features
//!
//! - Asynchronous long polling with tokio, one batch at a time
//! - Routing by a `MessageType` message attribute, or by the same attribute
//!   inside an SNS notification envelope
//! - Trait-based and closure-based handlers with shared resources
//! - Delete-on-success; failed messages are left for SQS to redeliver
//! - Continue-on-error semantics: no message or batch failure stops the loop
//! - Cooperative shutdown through a `CancellationToken`
//! - Queue URL resolution that calls `GetQueueUrl` at most once
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sqs_poller::{
//!     CancellationToken,
//!     client::create_sqs_client_from_env,
//!     receiver::{SqsPoller, config::SqsPollerConfig, registry::HandlerRegistry},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     sqs_poller::logging::init();
//!
//!     let client = create_sqs_client_from_env().await;
//!     let config = SqsPollerConfig::for_queue_name("orders", None);
//!
//!     let mut registry = HandlerRegistry::new();
//!     registry.register_fn(
//!         "OrderCreated",
//!         |payload: String, shop: String, _cancel| async move {
//!             println!("{shop} received order: {payload}");
//!             Ok(())
//!         },
//!         "main-shop".to_string(),
//!     );
//!
//!     let cancel = CancellationToken::new();
//!     let poller = SqsPoller::new(Arc::new(client), config, registry);
//!     poller.run(cancel).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod errors;
pub mod logging;
pub mod message;
pub mod receiver;
pub mod resolver;
pub mod transport;

pub use errors::{GenericError, SqsPollerError};
pub use message::{MESSAGE_TYPE_ATTRIBUTE, MessageEnvelope, TypedMessage, extract_message_type};
pub use receiver::{
    CycleReport, MessageOutcome, SqsPoller,
    config::{QueueSource, SqsPollerConfig},
    functions::{MessageHandler, MessageHandlerFn},
    registry::HandlerRegistry,
};
pub use resolver::QueueUrlResolver;
pub use transport::{QueueTransport, RawMessage};
pub use tokio_util::sync::CancellationToken;
