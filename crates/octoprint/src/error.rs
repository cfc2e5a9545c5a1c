use thiserror::Error;

/// Transport-level failure of a host call.
///
/// Application failures (`{"success": false}` payloads) are not errors at this
/// layer; they arrive as an `Ok(CommandResult)` and are judged by the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Host returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid host URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Auth(_) => "OctoPrint rejected the API key. Check your configuration.",
            ApiError::Network(_) => "Could not reach OctoPrint. Check your connection.",
            ApiError::Status { .. } => "OctoPrint refused the command.",
            ApiError::InvalidResponse(_) => "OctoPrint sent an unexpected response.",
            ApiError::Timeout(_) => "Request timed out. Please try again.",
            ApiError::Url(_) => "The configured OctoPrint URL is invalid.",
        }
    }

    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => ApiError::Auth(format!("{status}")),
            code => ApiError::Status { status: code, body },
        }
    }

    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout(error.to_string())
        } else {
            ApiError::Network(error)
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn auth_statuses_map_to_auth_error() {
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, String::new()),
            ApiError::Auth(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Auth(_)
        ));
    }

    #[test]
    fn other_statuses_keep_code_and_body() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "missing parameter".into());
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "missing parameter");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
