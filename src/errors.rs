use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode challenge data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reasons an entry is refused before it reaches the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("running time must be in MM:SS format, got {0:?}")]
    InvalidTimeFormat(String),

    #[error("running time must be at least 20:00 (20 minutes), got {seconds} seconds")]
    RunTooShort { seconds: i64 },

    #[error("date must be YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),

    #[error("weight must be positive, got {0}")]
    InvalidWeight(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("remote request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("remote returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "failed to persist challenge data");
        Self::internal(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
