use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Email delivery request published to the mail topic.
///
/// The mail worker consuming the topic owns SMTP; this service only hands
/// over fully rendered messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailMessage {
    pub message_id: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub requested_at: DateTime<Utc>,
}

impl EmailMessage {
    pub fn new(recipients: &[String], subject: &str, html_body: &str) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            recipients: recipients.to_vec(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            requested_at: Utc::now(),
        }
    }

    /// Partition key; keeps all mail for one recipient on the same partition.
    pub fn partition_key(&self) -> &str {
        self.recipients.first().map(String::as_str).unwrap_or("")
    }
}
