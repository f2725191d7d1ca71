//! Web error handling
//!
//! Author: hephaex@gmail.com

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sna_core::SnaError;

use crate::view;

/// Application error type
///
/// Blank input never reaches here: the page handler renders it as a warning.
#[derive(Debug)]
pub enum AppError {
    Inference(String),
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Inference(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Inference(msg) | AppError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(%status, error = self.message(), "Request failed");

        (status, Html(view::error_page(self.message()))).into_response()
    }
}

impl From<SnaError> for AppError {
    fn from(err: SnaError) -> Self {
        match err {
            SnaError::Inference(msg) => AppError::Inference(format!("Inference error: {msg}")),
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = AppError::from(SnaError::Inference("timeout".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = AppError::from(SnaError::ModelMismatch("index 9".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(SnaError::Config("bad port".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Configuration error: bad port");
    }
}
