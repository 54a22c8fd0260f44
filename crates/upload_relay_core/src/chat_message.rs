use serde::{Deserialize, Serialize};

use crate::console_url::object_console_url;
use crate::contract::UploadEvent;
use crate::error::RelayError;
use crate::event_time::parse_event_time;

pub const ATTACHMENT_COLOR: &str = "#36a64f";
pub const ATTACHMENT_TITLE: &str = "New S3 Upload";
pub const ATTACHMENT_FOOTER: &str = "AWS S3 Notification";
pub const VIEW_ACTION_TEXT: &str = "View in S3";

/// Webhook payload in the legacy attachments layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub attachments: Vec<ChatAttachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatAttachment {
    pub fallback: String,
    pub color: String,
    pub title: String,
    pub fields: Vec<AttachmentField>,
    pub footer: String,
    pub ts: i64,
    pub actions: Vec<AttachmentAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub text: String,
    pub url: String,
}

impl AttachmentField {
    fn short(title: &str, value: &str) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            short: true,
        }
    }
}

/// Builds the notification for one upload. Fails only on a malformed
/// event timestamp.
pub fn build_chat_message(event: &UploadEvent, region: &str) -> Result<ChatMessage, RelayError> {
    let ts = parse_event_time(&event.event_time)?;
    let url = object_console_url(&event.bucket_name, &event.object_key, region);

    Ok(ChatMessage {
        attachments: vec![ChatAttachment {
            fallback: format!("New file uploaded to {}", event.bucket_name),
            color: ATTACHMENT_COLOR.to_string(),
            title: ATTACHMENT_TITLE.to_string(),
            fields: vec![
                AttachmentField::short("Bucket", &event.bucket_name),
                AttachmentField::short("File", &event.object_key),
            ],
            footer: ATTACHMENT_FOOTER.to_string(),
            ts,
            actions: vec![AttachmentAction {
                action_type: "button".to_string(),
                text: VIEW_ACTION_TEXT.to_string(),
                url,
            }],
        }],
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::console_url::DEFAULT_CONSOLE_REGION;

    fn sample_event() -> UploadEvent {
        UploadEvent {
            bucket_name: "mybucket".to_string(),
            object_key: "path/file.txt".to_string(),
            event_time: "2024-01-02T03:04:05.678901Z".to_string(),
        }
    }

    #[test]
    fn serializes_attachment_layout() {
        let message = build_chat_message(&sample_event(), DEFAULT_CONSOLE_REGION)
            .expect("message should build");

        assert_eq!(
            serde_json::to_value(&message).expect("message should serialize"),
            json!({
                "attachments": [{
                    "fallback": "New file uploaded to mybucket",
                    "color": "#36a64f",
                    "title": "New S3 Upload",
                    "fields": [
                        {"title": "Bucket", "value": "mybucket", "short": true},
                        {"title": "File", "value": "path/file.txt", "short": true}
                    ],
                    "footer": "AWS S3 Notification",
                    "ts": 1_704_164_645_i64,
                    "actions": [{
                        "type": "button",
                        "text": "View in S3",
                        "url": "https://s3.console.aws.amazon.com/s3/object/mybucket/path/file.txt?region=ap-south-1"
                    }]
                }]
            })
        );
    }

    #[test]
    fn uses_configured_region_in_action_link() {
        let message =
            build_chat_message(&sample_event(), "us-east-1").expect("message should build");
        let url = &message.attachments[0].actions[0].url;
        assert!(url.contains("mybucket"));
        assert!(url.contains("path/file.txt"));
        assert!(url.ends_with("?region=us-east-1"));
    }

    #[test]
    fn malformed_timestamp_fails_to_build() {
        let mut event = sample_event();
        event.event_time = "yesterday".to_string();

        let error = build_chat_message(&event, DEFAULT_CONSOLE_REGION)
            .expect_err("timestamp should fail");
        assert!(error.is_parse());
    }
}
