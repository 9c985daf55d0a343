use std::process::ExitCode;
use std::time::Duration;

use relayq_core::{Producer, QueueConfig, QueueError};
use relayq_rabbitmq::RabbitQueueClient;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

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
    let producer = Producer::new(client, config);

    let payload = b"Hello from the Producer!";
    producer.send(payload).await?;
    info!("Sent: {} on queue.", String::from_utf8_lossy(payload));

    // Let the broker take the frame before tearing the connection down.
    tokio::time::sleep(Duration::from_millis(500)).await;
    producer.into_inner().close().await
}
