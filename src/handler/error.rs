use lambda_http::{Body, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("slack signature verification failed")]
    Unauthorized,
    #[error("failed to parse slash command: {0}")]
    InvalidPayload(String),
    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to build response: {0}")]
    Http(#[from] lambda_http::http::Error),
}

impl HandlerError {
    /// Every failure is a bare 500, so callers cannot tell which check failed.
    pub fn into_response(self) -> Response<Body> {
        tracing::error!(error = %self, "request failed");

        let mut response = Response::new(Body::Empty);
        *response.status_mut() = lambda_http::http::StatusCode::INTERNAL_SERVER_ERROR;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_is_an_empty_500() {
        let errors = [
            HandlerError::Unauthorized,
            HandlerError::InvalidPayload("bad form".to_string()),
        ];
        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), 500);
            assert!(matches!(response.body(), Body::Empty));
        }
    }
}
