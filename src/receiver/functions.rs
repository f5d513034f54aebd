use crate::errors::SqsPollerError;
use async_trait::async_trait;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Trait for implementing asynchronous message handlers.
///
/// A handler consumes the effective payload of one message. Returning
/// `Ok(())` lets the poller delete the message; any error leaves it on the
/// queue for redelivery once its visibility timeout expires.
///
/// Handlers have no timeout imposed on them. Long-running handlers should
/// watch `cancel` and return early when the poller is shutting down.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handles one message payload.
    ///
    /// # Arguments
    ///
    /// * `payload` - The message body, or the envelope's inner message
    /// * `cancel` - The poller's cancellation token
    async fn handle(&self, payload: String, cancel: CancellationToken) -> Result<(), SqsPollerError>;
}

#[async_trait]
impl<F, Fut, TShared> MessageHandler for MessageHandlerFn<F, Fut, TShared>
where
    F: Fn(String, TShared, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SqsPollerError>> + Send + 'static,
    TShared: Send + Sync + Clone + 'static,
{
    async fn handle(&self, payload: String, cancel: CancellationToken) -> Result<(), SqsPollerError> {
        (self.handler_fn)(payload, self.shared_resources.clone(), cancel).await
    }
}

/// Implementation of `MessageHandler` backed by a function and shared resources.
///
/// # Type Parameters
///
/// * `F` - The message handler function type
/// * `Fut` - The future returned by the handler function
/// * `TShared` - The type of shared resources passed to the handler
pub struct MessageHandlerFn<F, Fut, TShared>
where
    F: Fn(String, TShared, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SqsPollerError>> + Send + 'static,
    TShared: Send + Sync + Clone + 'static,
{
    handler_fn: F,
    shared_resources: TShared,
}

impl<F, Fut, TShared> MessageHandlerFn<F, Fut, TShared>
where
    F: Fn(String, TShared, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), SqsPollerError>> + Send + 'static,
    TShared: Send + Sync + Clone + 'static,
{
    /// Creates a new handler from a function.
    ///
    /// # Arguments
    ///
    /// * `handler_fn` - The message handler function
    /// * `shared_resources` - Resources cloned into every call
    pub fn new(handler_fn: F, shared_resources: TShared) -> Self {
        MessageHandlerFn {
            handler_fn,
            shared_resources,
        }
    }
}
