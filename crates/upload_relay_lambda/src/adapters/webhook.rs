use reqwest::header::CONTENT_TYPE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// Posts one JSON payload to the configured webhook. `Err` means no
/// response was received at all.
pub trait WebhookSender {
    fn send(&self, payload: &[u8]) -> Result<WebhookResponse, String>;
}

/// Blocking bridge over an async client; must run on a multi-threaded
/// tokio runtime.
pub struct HttpWebhookSender {
    client: reqwest::Client,
    webhook_url: String,
}

impl HttpWebhookSender {
    pub fn new(client: reqwest::Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

impl WebhookSender for HttpWebhookSender {
    fn send(&self, payload: &[u8]) -> Result<WebhookResponse, String> {
        let request_body = payload.to_vec();
        let client = self.client.clone();
        let url = self.webhook_url.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let response = client
                    .post(url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(request_body)
                    .send()
                    .await
                    .map_err(|error| format!("failed to post to webhook: {error}"))?;

                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .map_err(|error| format!("failed to read webhook response: {error}"))?;
                Ok(WebhookResponse { status, body })
            })
        })
    }
}
