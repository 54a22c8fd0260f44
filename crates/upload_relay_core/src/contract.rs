use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;

pub const ACKNOWLEDGEMENT_STATUS: u16 = 200;
pub const ACKNOWLEDGEMENT_MESSAGE: &str = "Message processed";

/// Queue batch handed to one relay invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueBatch {
    #[serde(rename = "Records")]
    pub records: Vec<QueueRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueRecord {
    #[serde(rename = "messageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub body: String,
}

/// Topic notification wrapping the storage event as a JSON string.
#[derive(Debug, Clone, Deserialize)]
struct TopicEnvelope {
    #[serde(rename = "Message")]
    message: String,
}

/// Storage event notification. Subscription test events carry no `Records`.
#[derive(Debug, Clone, Deserialize)]
struct StorageNotification {
    #[serde(rename = "Records", default)]
    records: Vec<StorageEventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct StorageEventRecord {
    #[serde(rename = "eventTime")]
    event_time: String,
    s3: StorageEntity,
}

#[derive(Debug, Clone, Deserialize)]
struct StorageEntity {
    bucket: StorageBucket,
    object: StorageObject,
}

#[derive(Debug, Clone, Deserialize)]
struct StorageBucket {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct StorageObject {
    key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadEvent {
    pub bucket_name: String,
    pub object_key: String,
    pub event_time: String,
}

impl StorageEventRecord {
    fn into_upload_event(self) -> UploadEvent {
        UploadEvent {
            bucket_name: self.s3.bucket.name,
            object_key: self.s3.object.key,
            event_time: self.event_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayAcknowledgement {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl RelayAcknowledgement {
    /// The body is the JSON encoding of the confirmation text, quotes included.
    pub fn processed() -> Self {
        Self {
            status_code: ACKNOWLEDGEMENT_STATUS,
            body: Value::from(ACKNOWLEDGEMENT_MESSAGE).to_string(),
        }
    }
}

pub fn parse_queue_batch(payload: Value) -> Result<QueueBatch, RelayError> {
    serde_json::from_value(payload)
        .map_err(|error| RelayError::parse("queue batch", error.to_string()))
}

/// Unwraps both envelope layers of a queue record body.
pub fn decode_upload_events(body: &str) -> Result<Vec<UploadEvent>, RelayError> {
    let envelope: TopicEnvelope = serde_json::from_str(body)
        .map_err(|error| RelayError::parse("topic envelope", error.to_string()))?;
    let notification: StorageNotification = serde_json::from_str(&envelope.message)
        .map_err(|error| RelayError::parse("storage notification", error.to_string()))?;

    Ok(notification
        .records
        .into_iter()
        .map(StorageEventRecord::into_upload_event)
        .collect())
}
