// relayq-core/src/types.rs
use std::fmt;

use crate::QueueError;

/// Broker-assigned identifier for one in-flight, unacknowledged delivery.
/// Unique per channel; opaque to callers beyond equality and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeliveryTag(u64);

impl DeliveryTag {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeliveryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a successful queue declaration. The counts are whatever the
/// broker reported in its declare-ok reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueHandle {
    pub name: String,
    pub durable: bool,
    pub message_count: u32,
    pub consumer_count: u32,
}

/// One delivered message as yielded by a [`Subscription`](crate::Subscription).
///
/// `redelivered` is broker-reported and set only for messages that were
/// requeued after a previous consumer dropped before acknowledging.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub tag: DeliveryTag,
    pub payload: Vec<u8>,
    pub redelivered: bool,
}

/// Queue identity is an externally supplied, non-empty name.
pub fn validate_queue_name(name: &str) -> Result<(), QueueError> {
    if name.is_empty() {
        return Err(QueueError::EmptyQueueName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue_name_is_rejected() {
        assert!(matches!(
            validate_queue_name(""),
            Err(QueueError::EmptyQueueName)
        ));
        assert!(validate_queue_name("test-queue").is_ok());
    }

    #[test]
    fn delivery_tag_round_trips_raw_value() {
        let tag = DeliveryTag::new(42);
        assert_eq!(tag.as_u64(), 42);
        assert_eq!(tag.to_string(), "42");
    }
}
