//! REST service errors

use reqwest::StatusCode;
use serde_json::Value;

/// Error returned by the REST service layer
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Server-side validation failure (first message of `errors`)
    #[error("{0}")]
    Validation(String),

    /// Non-success status; `message` is ready to show to the user
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Attachment could not be read or encoded
    #[error("Attachment error: {0}")]
    Attachment(String),
}

impl ServiceError {
    /// Message for an alert; transport-level failures use `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) | Self::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Build the error for a failed write from its response body.
    ///
    /// Looks for the first entry of `errors` (Laravel validation), then
    /// `message`. A body that is not JSON yields `Erreur {code}: {reason}`.
    pub fn from_write_failure(status: StatusCode, body: &str, default: &str) -> Self {
        let json: Value = match serde_json::from_str(body) {
            Ok(json) => json,
            Err(_) => {
                return Self::Status {
                    status: status.as_u16(),
                    message: format!(
                        "Erreur {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or_default()
                    ),
                }
            }
        };

        if let Some(first) = json
            .get("errors")
            .and_then(Value::as_object)
            .and_then(|errors| errors.values().next())
        {
            let message = match first {
                Value::Array(messages) => messages.first().and_then(Value::as_str),
                other => other.as_str(),
            };
            if let Some(message) = message {
                return Self::Validation(message.to_string());
            }
        }

        let message = json
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(default);

        Self::Status {
            status: status.as_u16(),
            message: message.to_string(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}
