use crate::config::AppConfig;
use crate::ingest::IngestError;
use crate::sentiment::{AverageScores, SentimentError, SentimentModel};
use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub model: Arc<dyn SentimentModel>,
}

/// Usage description served at `/`
#[derive(Debug, Serialize)]
pub struct UsageResponse {
    #[serde(rename = "How to use")]
    pub how_to_use: &'static str,
}

/// Response from the read_reviews endpoint
#[derive(Debug, Serialize)]
pub struct ReadReviewsResponse {
    pub data: AverageScores,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub kind: &'static str,
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no 'file' field in upload")]
    MissingFile,

    #[error("invalid multipart body: {message}")]
    Multipart { status: StatusCode, message: String },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Sentiment(#[from] SentimentError),
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Multipart {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Multipart {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AppError::MissingFile => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "missing_file",
                "Expected a multipart upload with a 'file' field",
            ),
            AppError::Multipart { status, .. } if *status == StatusCode::PAYLOAD_TOO_LARGE => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "file_too_large",
                "Uploaded file is too large",
            ),
            AppError::Multipart { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "missing_file",
                "Expected a multipart upload with a 'file' field",
            ),
            AppError::Ingest(IngestError::UnsupportedFormat(_)) => (
                StatusCode::BAD_REQUEST,
                "bad_file_format",
                "Incorrect format of input file",
            ),
            AppError::Ingest(IngestError::Unreadable { .. }) => (
                StatusCode::BAD_REQUEST,
                "unreadable_file",
                "Could not read uploaded file",
            ),
            AppError::Ingest(IngestError::MissingColumn(_)) => (
                StatusCode::BAD_REQUEST,
                "missing_column",
                "No column 'Review' found",
            ),
            AppError::Ingest(IngestError::NoReviews(_)) => (
                StatusCode::BAD_REQUEST,
                "no_reviews",
                "No reviews found in column 'Review'",
            ),
            AppError::Sentiment(SentimentError::MissingApiKey(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "missing_api_key",
                "Sentiment service is not configured",
            ),
            AppError::Sentiment(SentimentError::Prompt(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "Internal server error",
            ),
            AppError::Sentiment(e) if e.is_model_output() => {
                (StatusCode::BAD_REQUEST, "model_output", "Reupload file")
            }
            AppError::Sentiment(_) => (
                StatusCode::BAD_GATEWAY,
                "upstream",
                "Sentiment service unavailable",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, detail) = self.parts();

        if status.is_server_error() {
            error!(kind, error = %self, "Request failed");
        } else {
            warn!(kind, error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse {
            detail: detail.to_string(),
            kind,
        }))
        .into_response()
    }
}
