use std::process::ExitCode;

use relayq_core::{Consumer, QueueConfig, QueueError};
use relayq_rabbitmq::RabbitQueueClient;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Runs until the connection is lost or the process is killed.
    match run(QueueConfig::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: QueueConfig) -> Result<(), QueueError> {
    let client = RabbitQueueClient::connect(config.clone()).await?;
    let consumer = Consumer::new(client, config);
    let mut deliveries = consumer.deliveries().await?;
    info!("Waiting for messages in {}...", consumer.config().queue);

    while let Some(next) = deliveries.next().await {
        let delivery = next?;
        info!("Received: {}", String::from_utf8_lossy(&delivery.payload));
        if let Err(err) = deliveries.ack(delivery.tag).await {
            if err.is_per_message() {
                warn!("ack failed: {err}");
                continue;
            }
            return Err(err);
        }
    }

    Err(QueueError::Connection("delivery stream ended".to_string()))
}
