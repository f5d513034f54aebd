use std::env;

use crate::errors::SqsPollerError;

/// Where the poller finds its queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueSource {
    /// A fully qualified queue URL, used as-is.
    Url(String),

    /// A queue name, resolved to a URL once before polling starts.
    Name {
        name: String,
        owner_account_id: Option<String>,
    },
}

/// Configuration for the SQS poller.
///
/// # Fields
/// - `queue`: The queue to poll.
/// - `max_number_of_messages`: The maximum number of messages to receive in a single request.
/// - `wait_time_seconds`: The wait time for long polling, in seconds.
/// - `message_attribute_names`: Message attributes to request with each receive.
#[derive(Debug, Clone)]
pub struct SqsPollerConfig {
    pub queue: QueueSource,

    /// The maximum number of messages to receive in a single request (1-10).
    pub max_number_of_messages: i32,

    /// The wait time for long polling, in seconds (0-20).
    ///
    /// This is the only pacing the loop has: an empty queue costs one
    /// receive call per wait period.
    pub wait_time_seconds: i32,

    pub message_attribute_names: Vec<String>,
}

impl SqsPollerConfig {
    pub fn for_queue_url(queue_url: &str) -> Self {
        SqsPollerConfig {
            queue: QueueSource::Url(queue_url.to_string()),
            ..Default::default()
        }
    }

    pub fn for_queue_name(queue_name: &str, owner_account_id: Option<&str>) -> Self {
        SqsPollerConfig {
            queue: QueueSource::Name {
                name: queue_name.to_string(),
                owner_account_id: owner_account_id.map(str::to_string),
            },
            ..Default::default()
        }
    }

    /// Loads the configuration from `SQS_*` environment variables.
    ///
    /// - `SQS_QUEUE_URL` or `SQS_QUEUE_NAME` (the URL wins when both are set)
    /// - `SQS_QUEUE_OWNER_ACCOUNT_ID`
    /// - `SQS_MAX_NUMBER_OF_MESSAGES`
    /// - `SQS_WAIT_TIME_SECONDS`
    /// - `SQS_MESSAGE_ATTRIBUTE_NAMES`, comma separated
    pub fn from_env() -> Result<Self, SqsPollerError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`SqsPollerConfig::from_env`] with a custom variable lookup.
    pub fn from_vars<L>(lookup: L) -> Result<Self, SqsPollerError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = SqsPollerConfig::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let queue = match (var("SQS_QUEUE_URL"), var("SQS_QUEUE_NAME")) {
            (Some(url), _) => QueueSource::Url(url),
            (None, Some(name)) => QueueSource::Name {
                name,
                owner_account_id: var("SQS_QUEUE_OWNER_ACCOUNT_ID"),
            },
            (None, None) => {
                return Err(SqsPollerError::Configuration(
                    "SQS_QUEUE_URL or SQS_QUEUE_NAME must be set".to_string(),
                ));
            }
        };

        let max_number_of_messages = match var("SQS_MAX_NUMBER_OF_MESSAGES") {
            Some(v) => parse_int("SQS_MAX_NUMBER_OF_MESSAGES", &v)?,
            None => defaults.max_number_of_messages,
        };
        let wait_time_seconds = match var("SQS_WAIT_TIME_SECONDS") {
            Some(v) => parse_int("SQS_WAIT_TIME_SECONDS", &v)?,
            None => defaults.wait_time_seconds,
        };
        let message_attribute_names = match var("SQS_MESSAGE_ATTRIBUTE_NAMES") {
            Some(v) => v
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.message_attribute_names,
        };

        let config = SqsPollerConfig {
            queue,
            max_number_of_messages,
            wait_time_seconds,
            message_attribute_names,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the values against the limits SQS accepts.
    pub fn validate(&self) -> Result<(), SqsPollerError> {
        match &self.queue {
            QueueSource::Url(url) if url.is_empty() => {
                return Err(SqsPollerError::Configuration("queue url is empty".to_string()));
            }
            QueueSource::Name { name, .. } if name.is_empty() => {
                return Err(SqsPollerError::Configuration("queue name is empty".to_string()));
            }
            _ => {}
        }
        if !(1..=10).contains(&self.max_number_of_messages) {
            return Err(SqsPollerError::Configuration(format!(
                "max_number_of_messages must be between 1 and 10, got {}",
                self.max_number_of_messages
            )));
        }
        if !(0..=20).contains(&self.wait_time_seconds) {
            return Err(SqsPollerError::Configuration(format!(
                "wait_time_seconds must be between 0 and 20, got {}",
                self.wait_time_seconds
            )));
        }
        Ok(())
    }
}

fn parse_int(key: &str, value: &str) -> Result<i32, SqsPollerError> {
    value
        .trim()
        .parse()
        .map_err(|e| SqsPollerError::Configuration(format!("{key}: {e}")))
}

impl Default for SqsPollerConfig {
    fn default() -> Self {
        SqsPollerConfig {
            queue: QueueSource::Url(String::new()),
            max_number_of_messages: 10,
            wait_time_seconds: 20,
            message_attribute_names: vec!["All".to_string()],
        }
    }
}
