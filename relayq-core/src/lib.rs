pub mod client;
pub mod config;
pub mod consumer;
pub mod error;
pub mod producer;
pub mod subscription;
pub mod types;

pub use client::QueueClient;
pub use config::QueueConfig;
pub use consumer::Consumer;
pub use error::QueueError;
pub use producer::Producer;
pub use subscription::Subscription;
pub use types::{validate_queue_name, Delivery, DeliveryTag, QueueHandle};
