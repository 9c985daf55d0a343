// relayq-core/src/client.rs
use async_trait::async_trait;

use crate::{QueueError, QueueHandle, Subscription};

/// One logical channel to the broker: declare queues, publish into them,
/// subscribe to them. Implementations own the connection lifecycle.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Ensures `name` exists with the given durability. Idempotent for
    /// identical parameters; a durability mismatch with an existing queue is
    /// [`QueueError::ConflictingDeclaration`].
    async fn declare(&self, name: &str, durable: bool) -> Result<QueueHandle, QueueError>;

    /// Hands `payload` to the broker for enqueue on `queue`. Fire-and-forget
    /// unless the client was configured with publisher confirms, in which
    /// case a broker Nack surfaces as [`QueueError::Publish`].
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), QueueError>;

    /// Registers a consumer on `queue` and returns immediately; deliveries
    /// are pulled from the returned [`Subscription`].
    async fn subscribe(&self, queue: &str) -> Result<Box<dyn Subscription>, QueueError>;
}
