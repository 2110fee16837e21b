use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::state::SharedState;

/// Relay the raw form body as one datagram and send the browser to the
/// confirmation page. Delivery is not confirmed.
pub async fn submit(State(state): State<SharedState>, body: Bytes) -> Response {
    match state.relay.send(&body).await {
        Ok(sent) => tracing::debug!("Relayed {sent} bytes to {}", state.relay.target()),
        Err(e) => tracing::error!("Failed to relay submission to {}: {e}", state.relay.target()),
    }

    (StatusCode::FOUND, [(header::LOCATION, "/message")]).into_response()
}
