// relayq-core/src/consumer.rs
use crate::{validate_queue_name, QueueClient, QueueConfig, QueueError, Subscription};

/// Long-lived subscriber: ensures the configured queue exists, then hands out
/// its delivery sequence. The caller drives the loop and acknowledges each
/// delivery it has processed.
pub struct Consumer<C> {
    client: C,
    config: QueueConfig,
}

impl<C: QueueClient> Consumer<C> {
    pub fn new(client: C, config: QueueConfig) -> Self {
        Self { client, config }
    }

    /// Declares the target queue and subscribes to it. Registration returns
    /// immediately; awaiting deliveries happens on the returned subscription.
    pub async fn deliveries(&self) -> Result<Box<dyn Subscription>, QueueError> {
        validate_queue_name(&self.config.queue)?;
        self.client
            .declare(&self.config.queue, self.config.durable)
            .await?;
        self.client.subscribe(&self.config.queue).await
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn into_inner(self) -> C {
        self.client
    }
}
