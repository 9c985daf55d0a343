mod rabbit_queue_client;

pub use rabbit_queue_client::RabbitQueueClient;
