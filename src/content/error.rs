//! Content fetch errors

/// Error raised by the fallible (`try_*`) content fetchers
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Non-success HTTP status
    #[error("HTTP error: status {0}")]
    Status(u16),

    /// Request did not complete within its timeout
    #[error("Request timed out")]
    Timeout,

    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// GraphQL `errors` array in an otherwise successful response
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Response did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ContentError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}
