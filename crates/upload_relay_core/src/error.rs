use thiserror::Error;

/// Failures that abort a relay invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("malformed {context}: {message}")]
    Parse {
        context: &'static str,
        message: String,
    },
    #[error("Request to slack returned an error {status}, the response is:\n{body}")]
    Delivery { status: u16, body: String },
    #[error("failed to reach webhook: {0}")]
    Transport(String),
}

impl RelayError {
    pub fn parse(context: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            context,
            message: message.into(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_error_reports_status_and_body() {
        let error = RelayError::Delivery {
            status: 500,
            body: "err".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Request to slack returned an error 500, the response is:\nerr"
        );
    }

    #[test]
    fn parse_error_names_failing_layer() {
        let error = RelayError::parse("event_time", "input contains invalid characters");
        assert!(error.is_parse());
        assert_eq!(
            error.to_string(),
            "malformed event_time: input contains invalid characters"
        );
    }
}
