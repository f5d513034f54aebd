use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::errors::SqsPollerError;
use crate::receiver::functions::{MessageHandler, MessageHandlerFn};

/// Maps message types to their handlers.
///
/// Populated once at startup and handed to [`crate::receiver::SqsPoller`],
/// which never mutates it.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn MessageHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a message type, replacing any previous one.
    pub fn register<H>(&mut self, message_type: &str, handler: H) -> &mut Self
    where
        H: MessageHandler + 'static,
    {
        if self
            .handlers
            .insert(message_type.to_string(), Arc::new(handler))
            .is_some()
        {
            warn!(message_type, "replacing previously registered handler");
        }
        self
    }

    /// Registers a handler function together with resources shared across calls.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sqs_poller::receiver::registry::HandlerRegistry;
    ///
    /// let mut registry = HandlerRegistry::new();
    /// registry.register_fn(
    ///     "OrderCreated",
    ///     |payload: String, prefix: String, _cancel| async move {
    ///         println!("{prefix}: {payload}");
    ///         Ok(())
    ///     },
    ///     "orders".to_string(),
    /// );
    /// assert!(registry.resolve("OrderCreated").is_ok());
    /// ```
    pub fn register_fn<F, Fut, TShared>(
        &mut self,
        message_type: &str,
        handler_fn: F,
        shared_resources: TShared,
    ) -> &mut Self
    where
        F: Fn(String, TShared, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SqsPollerError>> + Send + 'static,
        TShared: Send + Sync + Clone + 'static,
    {
        self.register(message_type, MessageHandlerFn::new(handler_fn, shared_resources))
    }

    pub fn resolve(&self, message_type: &str) -> Result<Arc<dyn MessageHandler>, SqsPollerError> {
        self.handlers
            .get(message_type)
            .cloned()
            .ok_or_else(|| SqsPollerError::NoHandler(message_type.to_string()))
    }

    pub fn message_types(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
