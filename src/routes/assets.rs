use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::Page;
use crate::error::AppError;
use crate::state::SharedState;

use super::pages;

const FALLBACK_MIME: &str = "text/plain";

/// Serve `path` from the assets directory, or the error page with 404.
///
/// The path is joined as-is onto the assets root; `..` segments are not
/// filtered here.
pub async fn serve(state: &SharedState, path: &str) -> Result<Response, AppError> {
    let relative = path.strip_prefix('/').unwrap_or(path);
    let file = state.config.assets_dir.join(relative);

    let is_file = tokio::fs::metadata(&file)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);

    if !is_file {
        tracing::debug!("No asset at {}", file.display());
        return pages::render(state, Page::Error, StatusCode::NOT_FOUND).await;
    }

    let mime = mime_guess::from_path(&file)
        .first_raw()
        .unwrap_or(FALLBACK_MIME);
    let body = tokio::fs::read(&file).await?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, mime)], body).into_response())
}
