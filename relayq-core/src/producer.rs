// relayq-core/src/producer.rs
use crate::{validate_queue_name, QueueClient, QueueConfig, QueueError};

/// Single-shot publisher: ensures the configured queue exists, then appends
/// one message to it. Connection setup and teardown belong to the client.
pub struct Producer<C> {
    client: C,
    config: QueueConfig,
}

impl<C: QueueClient> Producer<C> {
    pub fn new(client: C, config: QueueConfig) -> Self {
        Self { client, config }
    }

    /// Declares the target queue and publishes `payload` into it. Exactly one
    /// message is appended per successful call.
    pub async fn send(&self, payload: &[u8]) -> Result<(), QueueError> {
        validate_queue_name(&self.config.queue)?;
        self.client
            .declare(&self.config.queue, self.config.durable)
            .await?;
        self.client.publish(&self.config.queue, payload).await
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Recovers the client, typically to close its connection.
    pub fn into_inner(self) -> C {
        self.client
    }
}
