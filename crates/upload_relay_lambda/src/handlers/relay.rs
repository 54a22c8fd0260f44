use serde_json::Value;
use upload_relay_core::chat_message::{build_chat_message, ChatMessage};
use upload_relay_core::contract::{
    decode_upload_events, parse_queue_batch, QueueBatch, RelayAcknowledgement, UploadEvent,
};
use upload_relay_core::error::RelayError;

use crate::adapters::webhook::WebhookSender;
use crate::config::RelayConfig;

pub const WEBHOOK_SUCCESS_STATUS: u16 = 200;

pub fn handle_relay_event(
    event: Value,
    config: &RelayConfig,
    sender: &dyn WebhookSender,
) -> Result<RelayAcknowledgement, RelayError> {
    let batch = parse_queue_batch(event)?;
    relay_batch(&batch, config, sender)
}

/// Relays every upload event in record order, stopping at the first failure.
/// Messages already delivered before a failure are not recalled.
pub fn relay_batch(
    batch: &QueueBatch,
    config: &RelayConfig,
    sender: &dyn WebhookSender,
) -> Result<RelayAcknowledgement, RelayError> {
    tracing::info!(records = batch.records.len(), "relay_started");

    let mut delivered = 0usize;
    for record in &batch.records {
        let events = decode_upload_events(&record.body)?;
        tracing::debug!(
            message_id = record.message_id.as_deref().unwrap_or_default(),
            events = ?events,
            "record_decoded"
        );

        for event in &events {
            let message = build_chat_message(event, &config.console_region)?;
            deliver(event, &message, sender)?;
            delivered += 1;
        }
    }

    tracing::info!(delivered, "relay_completed");
    Ok(RelayAcknowledgement::processed())
}

fn deliver(
    event: &UploadEvent,
    message: &ChatMessage,
    sender: &dyn WebhookSender,
) -> Result<(), RelayError> {
    let payload = serde_json::to_vec(message).expect("chat message should serialize");

    let response = sender.send(&payload).map_err(|error| {
        tracing::error!(
            bucket = %event.bucket_name,
            key = %event.object_key,
            error = %error,
            "webhook_unreachable"
        );
        RelayError::Transport(error)
    })?;

    if response.status != WEBHOOK_SUCCESS_STATUS {
        tracing::error!(
            bucket = %event.bucket_name,
            key = %event.object_key,
            status = response.status,
            body = %response.body,
            "webhook_rejected"
        );
        return Err(RelayError::Delivery {
            status: response.status,
            body: response.body,
        });
    }

    tracing::info!(
        bucket = %event.bucket_name,
        key = %event.object_key,
        status = response.status,
        "message_delivered"
    );
    Ok(())
}
