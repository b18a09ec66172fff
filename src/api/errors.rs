use thiserror::Error;

/// Failures of a request against the remote REST service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status code.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// An update was requested for a record that has no identifier.
    #[error("record has no identifier")]
    MissingId,

    /// A base URL or record path could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Returns whether retrying the same request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Decode(_) | ApiError::MissingId | ApiError::InvalidUrl(_) => false,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        assert!(ApiError::Network("connection refused".to_string()).is_retryable());
        assert!(
            ApiError::Status {
                status: 503,
                url: "http://localhost/clients".to_string()
            }
            .is_retryable()
        );
        assert!(
            !ApiError::Status {
                status: 404,
                url: "http://localhost/clients/1".to_string()
            }
            .is_retryable()
        );
        assert!(!ApiError::MissingId.is_retryable());
    }

    #[test]
    fn json_errors_map_to_decode() {
        let err = serde_json::from_str::<Vec<u8>>("{").expect_err("malformed json");
        assert!(matches!(ApiError::from(err), ApiError::Decode(_)));
    }
}
