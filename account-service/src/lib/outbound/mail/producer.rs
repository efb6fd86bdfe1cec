use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;
use rdkafka::util::Timeout;
use thiserror::Error;

use crate::account::errors::MailerError;
use crate::account::ports::Mailer;
use crate::config::Config;
use crate::outbound::mail::messages::EmailMessage;

#[derive(Debug, Error)]
pub enum KafkaMailerError {
    #[error("Failed to send message to Kafka: {0}")]
    SendError(String),

    #[error("Failed to serialize message: {0}")]
    SerializationError(String),
}

impl From<KafkaMailerError> for MailerError {
    fn from(err: KafkaMailerError) -> Self {
        match err {
            KafkaMailerError::SerializationError(msg) => MailerError::SerializationFailed(msg),
            KafkaMailerError::SendError(msg) => MailerError::DeliveryFailed(msg),
        }
    }
}

/// Mailer that hands rendered emails to the mail worker through Kafka.
pub struct KafkaMailer {
    producer: FutureProducer,
    topic: String,
    timeout: Duration,
}

impl KafkaMailer {
    /// Create a new Kafka-backed mailer with "at least once" delivery semantics
    ///
    /// # Notes:
    /// - `acks=all`: Wait for all in-sync replicas to acknowledge
    /// - `enable.idempotence=true`: Prevents duplicate messages during retries
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        tracing::info!(
            brokers = %config.kafka.brokers,
            topic = %config.kafka.mail_topic,
            "Initializing Kafka mailer"
        );

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.kafka.brokers)
            .set("message.timeout.ms", "30000")
            .set("compression.type", "gzip")
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("retries", "10")
            .set("retry.backoff.ms", "100")
            .create()?;

        Ok(Self {
            producer,
            topic: config.kafka.mail_topic.to_string(),
            timeout: Duration::from_secs(30),
        })
    }

    async fn publish(&self, message: &EmailMessage) -> Result<(), KafkaMailerError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| KafkaMailerError::SerializationError(e.to_string()))?;

        let record = FutureRecord::to(&self.topic)
            .key(message.partition_key())
            .payload(&payload);

        self.producer
            .send(record, Timeout::After(self.timeout))
            .await
            .map(|_| {
                tracing::debug!(
                    topic = %self.topic,
                    message_id = %message.message_id,
                    "Email handed to mail topic"
                );
            })
            .map_err(|(err, _)| KafkaMailerError::SendError(err.to_string()))
    }
}

#[async_trait]
impl Mailer for KafkaMailer {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<(), MailerError> {
        let message = EmailMessage::new(recipients, subject, html_body);

        self.publish(&message).await.map_err(|e| {
            tracing::error!(
                message_id = %message.message_id,
                subject = subject,
                error = %e,
                "Failed to publish email"
            );
            e.into()
        })
    }
}
