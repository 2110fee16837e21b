use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures on the serving path. A missing asset is not one of these; it is
/// answered with the error page.
#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O Error: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Io(err) => {
                tracing::error!("Failed to read file: {err}");
            }
        }

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

/// Failures while turning one datagram into a stored record. The receive
/// loop logs these and drops the payload.
#[derive(Debug)]
pub enum IngestError {
    Malformed(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Malformed(msg) => write!(f, "Malformed form body: {msg}"),
            IngestError::Io(err) => write!(f, "Storage I/O Error: {err}"),
            IngestError::Json(err) => write!(f, "Storage JSON Error: {err}"),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Malformed(_) => None,
            IngestError::Io(err) => Some(err),
            IngestError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::Json(err)
    }
}
