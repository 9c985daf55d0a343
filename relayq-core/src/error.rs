// relayq-core/src/error.rs
use thiserror::Error;

use crate::types::DeliveryTag;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("connection failure: {0}")]
    Connection(String),

    #[error("queue '{queue}' already exists with a different durability (requested durable={requested})")]
    ConflictingDeclaration { queue: String, requested: bool },

    #[error("channel closed: {0}")]
    ChannelClosed(String),

    #[error("publish error: {0}")]
    Publish(String),

    #[error("subscribe error: {0}")]
    Subscribe(String),

    #[error("invalid delivery tag: {0}")]
    InvalidDeliveryTag(DeliveryTag),

    #[error("queue name must not be empty")]
    EmptyQueueName,
}

impl QueueError {
    /// Per-message errors leave the consumer loop running; everything else
    /// tears the component down.
    pub fn is_per_message(&self) -> bool {
        matches!(self, QueueError::InvalidDeliveryTag(_))
    }
}
