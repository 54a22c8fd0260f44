use tracing::Span;
use tracing_subscriber::EnvFilter;

use crate::config::RelayConfig;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// JSON lines on stdout; the Lambda log stream already stamps each line.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let installed = tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(error) = installed {
        eprintln!("tracing subscriber already installed, keeping it: {error}");
    }
}

pub fn invocation_span(request_id: &str, config: &RelayConfig) -> Span {
    tracing::info_span!(
        "relay_invocation",
        request_id,
        app_name = %config.app_name,
        account_id = config.account_id.as_deref().unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_keeps_first_subscriber() {
        init_tracing();
        init_tracing();

        let config = RelayConfig {
            webhook_url: "https://hooks.test/x".to_string(),
            app_name: "PubSub".to_string(),
            account_id: None,
            console_region: "ap-south-1".to_string(),
        };
        let span = invocation_span("req-1", &config);
        let _entered = span.enter();
        tracing::info!("inside_invocation");
    }
}
