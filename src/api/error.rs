//! Transport error taxonomy.
//!
//! Every client call returns `Result<_, ApiError>` so callers can tell
//! "no results" from "request failed" and branch deliberately. Nothing here
//! retries; the CLI and bulk loops surface the cause and move on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connectivity failure - DNS, timeout, connection refused.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `body` is the response
    /// text when available (WordPress sends a JSON error description).
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// The response arrived but was not the JSON we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Status code if this is an HTTP error response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                ApiError::Status { code, body }
            }
            ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_code_and_body() {
        let err = ApiError::Status {
            code: 404,
            body: "{\"code\":\"rest_no_route\"}".to_string(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert!(err.to_string().starts_with("HTTP 404"));
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status_code(), None);
    }
}
