use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use upload_relay_core::contract::RelayAcknowledgement;
use upload_relay_lambda::adapters::webhook::HttpWebhookSender;
use upload_relay_lambda::config::RelayConfig;
use upload_relay_lambda::handlers::relay::handle_relay_event;
use upload_relay_lambda::telemetry::{init_tracing, invocation_span};

async fn handle_request(
    event: LambdaEvent<Value>,
    client: reqwest::Client,
) -> Result<RelayAcknowledgement, Error> {
    let (payload, context) = event.into_parts();
    let config = RelayConfig::from_env()?;

    let span = invocation_span(&context.request_id, &config);
    let _entered = span.enter();

    let sender = HttpWebhookSender::new(client, config.webhook_url.clone());
    let acknowledgement = handle_relay_event(payload, &config, &sender)?;
    Ok(acknowledgement)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let client = reqwest::Client::new();
    lambda_runtime::run(service_fn(move |event| {
        handle_request(event, client.clone())
    }))
    .await
}
