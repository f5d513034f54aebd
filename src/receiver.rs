use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, trace, warn};
use uuid::Uuid;

use crate::errors::SqsPollerError;
use crate::message::extract_message_type;
use crate::resolver::QueueUrlResolver;
use crate::transport::{QueueTransport, RawMessage};

pub mod config;
pub mod functions;
pub mod registry;

use config::{QueueSource, SqsPollerConfig};
use registry::HandlerRegistry;

/// What happened to a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Handled and removed from the queue.
    Deleted,

    /// Handled, but the delete call failed. The queue will redeliver it.
    DeleteFailed,

    /// Extraction, resolution or the handler failed; the message stays.
    LeftForRedelivery,
}

/// Counters for one receive batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub received: usize,
    pub deleted: usize,
    pub delete_failed: usize,
    pub failed: usize,
}

impl CycleReport {
    /// Messages that reached a terminal state in this cycle.
    pub fn processed(&self) -> usize {
        self.deleted + self.delete_failed + self.failed
    }

    fn record(&mut self, outcome: MessageOutcome) {
        match outcome {
            MessageOutcome::Deleted => self.deleted += 1,
            MessageOutcome::DeleteFailed => self.delete_failed += 1,
            MessageOutcome::LeftForRedelivery => self.failed += 1,
        }
    }
}

/// Polls one queue and dispatches each message to the handler registered
/// for its type.
///
/// Messages within a batch are handled one after another. A message is
/// deleted only after its handler returns `Ok(())`; everything else is
/// logged and left for the queue to redeliver.
pub struct SqsPoller<T: QueueTransport> {
    transport: Arc<T>,
    resolver: QueueUrlResolver<T>,
    config: SqsPollerConfig,
    registry: Arc<HandlerRegistry>,
}

impl<T: QueueTransport> SqsPoller<T> {
    pub fn new(transport: Arc<T>, config: SqsPollerConfig, registry: HandlerRegistry) -> Self {
        SqsPoller {
            resolver: QueueUrlResolver::new(transport.clone()),
            transport,
            config,
            registry: Arc::new(registry),
        }
    }

    pub fn config(&self) -> &SqsPollerConfig {
        &self.config
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Returns the configured queue URL, resolving the queue name if needed.
    pub async fn queue_url(&self) -> Result<String, SqsPollerError> {
        match &self.config.queue {
            QueueSource::Url(url) => Ok(url.clone()),
            QueueSource::Name {
                name,
                owner_account_id,
            } => self.resolver.resolve(name, owner_account_id.as_deref()).await,
        }
    }

    /// Polls until `cancel` fires.
    ///
    /// Batch and message failures are logged and never end the loop. Errors
    /// are only returned before the first receive: an invalid configuration
    /// or a queue URL that cannot be resolved.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), SqsPollerError> {
        // The loop has no backoff, so a config SQS always rejects would spin.
        self.config.validate()?;
        let queue_url = self.queue_url().await?;
        info!(
            queue_url = %queue_url,
            message_types = self.registry.len(),
            "starting sqs poller"
        );

        while !cancel.is_cancelled() {
            self.run_once(&queue_url, &cancel).await;
        }

        info!(queue_url = %queue_url, "sqs poller stopped");
        Ok(())
    }

    /// Receives one batch and handles its messages in order.
    pub async fn run_once(&self, queue_url: &str, cancel: &CancellationToken) -> CycleReport {
        let span = info_span!("poll", correlation_id = %Uuid::new_v4());
        self.poll_batch(queue_url, cancel).instrument(span).await
    }

    async fn poll_batch(&self, queue_url: &str, cancel: &CancellationToken) -> CycleReport {
        let mut report = CycleReport::default();
        trace!("start polling messages from the queue");

        let received = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("receive interrupted by cancellation");
                return report;
            }
            received = self.transport.receive(
                queue_url,
                self.config.max_number_of_messages,
                self.config.wait_time_seconds,
                &self.config.message_attribute_names,
            ) => received,
        };

        let messages = match received {
            Ok(messages) => messages,
            Err(e) => {
                error!(error = %e, "failed to receive messages from the queue");
                return report;
            }
        };

        report.received = messages.len();
        trace!(count = messages.len(), "messages received");

        for message in messages {
            if cancel.is_cancelled() {
                debug!(
                    remaining = report.received - report.processed(),
                    "cancellation requested, leaving the rest of the batch"
                );
                break;
            }
            let outcome = self.handle_message(queue_url, message, cancel).await;
            report.record(outcome);
        }

        report
    }

    /// Runs one message through extract, resolve, invoke and delete.
    pub async fn handle_message(
        &self,
        queue_url: &str,
        message: RawMessage,
        cancel: &CancellationToken,
    ) -> MessageOutcome {
        let receipt_handle = message.receipt_handle.clone();

        if let Err(e) = self.dispatch(message, cancel).await {
            warn!(
                receipt_handle = %receipt_handle,
                error = %e,
                "failed to handle message, leaving it for redelivery"
            );
            return MessageOutcome::LeftForRedelivery;
        }

        trace!(receipt_handle = %receipt_handle, "deleting the message");
        match self.transport.delete(queue_url, &receipt_handle).await {
            Ok(()) => {
                trace!(receipt_handle = %receipt_handle, "the message has been deleted successfully");
                MessageOutcome::Deleted
            }
            Err(e) => {
                error!(receipt_handle = %receipt_handle, error = %e, "failed to delete handled message");
                MessageOutcome::DeleteFailed
            }
        }
    }

    async fn dispatch(&self, message: RawMessage, cancel: &CancellationToken) -> Result<(), SqsPollerError> {
        let typed = extract_message_type(&message)?;
        trace!(message_type = %typed.message_type, "message type resolved");

        let handler = self.registry.resolve(&typed.message_type)?;

        AssertUnwindSafe(handler.handle(typed.payload, cancel.clone()))
            .catch_unwind()
            .await
            .map_err(|_| SqsPollerError::HandlerPanicked(typed.message_type))?
    }
}
