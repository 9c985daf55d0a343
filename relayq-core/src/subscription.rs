// relayq-core/src/subscription.rs
use async_trait::async_trait;

use crate::{Delivery, DeliveryTag, QueueError};

/// A lazy, potentially infinite, non-restartable sequence of deliveries from
/// one queue. Deliveries arrive one at a time; under `auto_ack = false` each
/// must be acknowledged exactly once, and anything still unacknowledged when
/// the subscription drops is requeued by the broker.
#[async_trait]
pub trait Subscription: Send {
    /// Suspends until the broker pushes the next delivery. `None` means the
    /// channel or connection is gone; the sequence cannot be restarted.
    async fn next(&mut self) -> Option<Result<Delivery, QueueError>>;

    /// Acknowledges one delivery. Acking a tag the broker no longer knows
    /// (already acked, or from a dead channel) is
    /// [`QueueError::InvalidDeliveryTag`]. No-op when the subscription was
    /// opened with `auto_ack = true`.
    async fn ack(&mut self, tag: DeliveryTag) -> Result<(), QueueError>;
}

impl std::fmt::Debug for dyn Subscription + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Subscription")
    }
}
