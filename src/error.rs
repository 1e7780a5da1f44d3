use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

pub const MISSING_FIELDS_MESSAGE: &str = "Please enter the required information.";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL.";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("no text content could be extracted from {0}")]
    EmptyContent(String),

    #[error("could not determine the video ID for the URL {0}")]
    VideoId(String),

    #[error("no transcript found for video {video_id} in languages {languages:?}")]
    NoTranscript {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("malformed transcript metadata: {0}")]
    Transcript(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("model returned no content")]
    EmptyResponse,
}

/// Anything raised by the loader or the summarizer once validation passed.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Summarize(#[from] SummarizeError),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("{}", INVALID_URL_MESSAGE)]
    InvalidUrl,

    #[error("An error occurred: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields | AppError::InvalidUrl => StatusCode::BAD_REQUEST,
            AppError::Pipeline(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::error(self.status_code(), self.to_string()).into_response()
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::Pipeline(PipelineError::Load(err))
    }
}

impl From<SummarizeError> for AppError {
    fn from(err: SummarizeError) -> Self {
        AppError::Pipeline(PipelineError::Summarize(err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
