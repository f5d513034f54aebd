use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::errors::SqsPollerError;
use crate::transport::QueueTransport;

/// Resolves queue names to URLs, calling `GetQueueUrl` at most once.
///
/// The first lookup caches the account's base URL (the queue URL minus the
/// queue name); later calls build URLs by concatenation, which avoids the
/// request fees for `GetQueueUrl`. Concurrent first calls may both hit the
/// transport; they derive the same base so the loser's write is dropped.
/// The cache lives as long as the resolver.
pub struct QueueUrlResolver<T: QueueTransport> {
    transport: Arc<T>,
    base_url: OnceLock<String>,
}

impl<T: QueueTransport> QueueUrlResolver<T> {
    pub fn new(transport: Arc<T>) -> Self {
        QueueUrlResolver {
            transport,
            base_url: OnceLock::new(),
        }
    }

    pub async fn resolve(
        &self,
        queue_name: &str,
        owner_account_id: Option<&str>,
    ) -> Result<String, SqsPollerError> {
        if let Some(base_url) = self.base_url.get() {
            return Ok(format!("{base_url}{queue_name}"));
        }

        let queue_url = self
            .transport
            .resolve_queue_url(queue_name, owner_account_id)
            .await?;

        // A URL that does not end in the name gives no usable base.
        if let Some(base_url) = queue_url.strip_suffix(queue_name) {
            debug!(base_url, "caching queue base url");
            let _ = self.base_url.set(base_url.to_string());
        }

        Ok(queue_url)
    }

    pub fn cached_base_url(&self) -> Option<&str> {
        self.base_url.get().map(String::as_str)
    }
}
