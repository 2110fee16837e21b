use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::Page;
use crate::error::AppError;
use crate::state::SharedState;

pub async fn index(State(state): State<SharedState>) -> Result<Response, AppError> {
    render(&state, Page::Index, StatusCode::OK).await
}

pub async fn message(State(state): State<SharedState>) -> Result<Response, AppError> {
    render(&state, Page::Message, StatusCode::OK).await
}

/// Send a template page verbatim as `text/html`.
pub async fn render(
    state: &SharedState,
    page: Page,
    status: StatusCode,
) -> Result<Response, AppError> {
    let body = tokio::fs::read(state.config.template_path(page)).await?;
    Ok((status, [(header::CONTENT_TYPE, "text/html")], body).into_response())
}
