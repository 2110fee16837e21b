pub mod assets;
pub mod ingest;
pub mod pages;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::SharedState;

pub fn page_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(pages::index).post(ingest::submit))
        .route("/message", get(pages::message).post(ingest::submit))
}

/// Every other path: `GET` serves an asset or the error page, `POST` is a
/// form submission.
pub async fn fallback(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, AppError> {
    match method {
        Method::GET | Method::HEAD => assets::serve(&state, uri.path()).await,
        Method::POST => Ok(ingest::submit(State(state), body).await),
        _ => Ok(StatusCode::METHOD_NOT_ALLOWED.into_response()),
    }
}
