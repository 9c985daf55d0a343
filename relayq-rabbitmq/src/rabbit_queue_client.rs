use async_trait::async_trait;
use futures_util::StreamExt;
use lapin::{
    options::*, types::FieldTable, BasicProperties, Channel, Connection, ConnectionProperties,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use relayq_core::{
    validate_queue_name, Delivery, DeliveryTag, QueueClient, QueueConfig, QueueError, QueueHandle,
    Subscription,
};

/// AMQP 406, raised for durability mismatches on declare and unknown tags on ack.
const PRECONDITION_FAILED: u16 = 406;

struct ConnState {
    conn: Connection,
    channel: Channel,
}

/// lapin-backed [`QueueClient`]. One connection, one channel; publishes go to
/// the default exchange so the routing key is the queue name itself.
pub struct RabbitQueueClient {
    config: QueueConfig,
    state: Arc<RwLock<Option<ConnState>>>,
}

impl RabbitQueueClient {
    pub async fn connect(config: QueueConfig) -> Result<Self, QueueError> {
        let client = Self {
            config,
            state: Arc::new(RwLock::new(None)),
        };
        client.connect_once().await?;
        Ok(client)
    }

    async fn connect_once(&self) -> Result<(), QueueError> {
        let conn = Connection::connect(&self.config.broker_url, ConnectionProperties::default())
            .await
            .map_err(|e| QueueError::Connection(e.to_string()))?;

        let channel = conn
            .create_channel()
            .await
            .map_err(|e| QueueError::Connection(e.to_string()))?;

        if self.config.confirms {
            channel
                .confirm_select(ConfirmSelectOptions { nowait: false })
                .await
                .map_err(|e| QueueError::Connection(e.to_string()))?;
        }

        let mut guard = self.state.write().await;
        *guard = Some(ConnState { conn, channel });

        info!("RabbitMQ connected. confirms={}", self.config.confirms);
        Ok(())
    }

    async fn current_channel(&self) -> Result<Channel, QueueError> {
        if let Some(ch) = self
            .state
            .read()
            .await
            .as_ref()
            .map(|s| s.channel.clone())
        {
            return Ok(ch);
        }
        self.connect_once().await?;
        self.state
            .read()
            .await
            .as_ref()
            .map(|s| s.channel.clone())
            .ok_or_else(|| QueueError::Connection("no channel after reconnect".into()))
    }

    /// Closes the connection, abandoning any unacknowledged deliveries. The
    /// broker requeues those; there is no graceful drain.
    pub async fn close(&self) -> Result<(), QueueError> {
        let state = self.state.write().await.take();
        if let Some(state) = state {
            state
                .conn
                .close(200, "closing") // reply-success
                .await
                .map_err(|e| QueueError::Connection(e.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl QueueClient for RabbitQueueClient {
    async fn declare(&self, name: &str, durable: bool) -> Result<QueueHandle, QueueError> {
        validate_queue_name(name)?;
        let channel = self.current_channel().await?;
        let queue = channel
            .queue_declare(
                name,
                QueueDeclareOptions {
                    durable,
                    auto_delete: false,
                    exclusive: false,
                    nowait: false,
                    passive: false,
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| map_declare_error(name, durable, e))?;

        Ok(QueueHandle {
            name: queue.name().as_str().to_string(),
            durable,
            message_count: queue.message_count(),
            consumer_count: queue.consumer_count(),
        })
    }

    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), QueueError> {
        let channel = self.current_channel().await?;

        let confirm = channel
            .basic_publish(
                "",
                queue,
                BasicPublishOptions {
                    mandatory: false,
                    immediate: false,
                },
                payload,
                BasicProperties::default(),
            )
            .await
            .map_err(map_publish_error)?
            .await
            .map_err(map_publish_error)?;

        // Without confirm_select the broker answers NotRequested, never a nack.
        if confirm.is_nack() {
            return Err(QueueError::Publish("publisher confirm NACK".to_string()));
        }
        Ok(())
    }

    async fn subscribe(&self, queue: &str) -> Result<Box<dyn Subscription>, QueueError> {
        validate_queue_name(queue)?;
        let channel = self.current_channel().await?;

        if self.config.prefetch > 0 {
            channel
                .basic_qos(self.config.prefetch, BasicQosOptions { global: false })
                .await
                .map_err(|e| QueueError::Subscribe(e.to_string()))?;
        }

        let consumer = channel
            .basic_consume(
                queue,
                &format!("relayq-{queue}"),
                BasicConsumeOptions {
                    no_ack: self.config.auto_ack,
                    exclusive: false,
                    nowait: false,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| QueueError::Subscribe(e.to_string()))?;

        info!("Consuming queue={queue} auto_ack={}", self.config.auto_ack);

        Ok(Box::new(RabbitSubscription {
            channel,
            consumer,
            auto_ack: self.config.auto_ack,
        }))
    }
}

struct RabbitSubscription {
    channel: Channel,
    consumer: lapin::Consumer,
    auto_ack: bool,
}

#[async_trait]
impl Subscription for RabbitSubscription {
    async fn next(&mut self) -> Option<Result<Delivery, QueueError>> {
        let delivery = self.consumer.next().await?;
        Some(
            delivery
                .map(|d| Delivery {
                    tag: DeliveryTag::new(d.delivery_tag),
                    payload: d.data,
                    redelivered: d.redelivered,
                })
                .map_err(map_channel_error),
        )
    }

    async fn ack(&mut self, tag: DeliveryTag) -> Result<(), QueueError> {
        if self.auto_ack {
            return Ok(());
        }
        self.channel
            .basic_ack(tag.as_u64(), BasicAckOptions { multiple: false })
            .await
            .map_err(|e| map_ack_error(tag, e))
    }
}

fn map_declare_error(queue: &str, requested: bool, err: lapin::Error) -> QueueError {
    if let lapin::Error::ProtocolError(ref amqp) = err {
        if amqp.get_id() == PRECONDITION_FAILED {
            return QueueError::ConflictingDeclaration {
                queue: queue.to_string(),
                requested,
            };
        }
    }
    map_channel_error(err)
}

fn map_publish_error(err: lapin::Error) -> QueueError {
    match err {
        lapin::Error::InvalidChannelState(state) => QueueError::ChannelClosed(format!("{state:?}")),
        lapin::Error::InvalidConnectionState(state) => {
            QueueError::ChannelClosed(format!("connection {state:?}"))
        }
        other => QueueError::Publish(other.to_string()),
    }
}

fn map_ack_error(tag: DeliveryTag, err: lapin::Error) -> QueueError {
    if let lapin::Error::ProtocolError(ref amqp) = err {
        if amqp.get_id() == PRECONDITION_FAILED {
            return QueueError::InvalidDeliveryTag(tag);
        }
    }
    map_channel_error(err)
}

fn map_channel_error(err: lapin::Error) -> QueueError {
    match err {
        lapin::Error::InvalidChannelState(state) => QueueError::ChannelClosed(format!("{state:?}")),
        other => QueueError::Connection(other.to_string()),
    }
}
