pub mod config;
pub mod error;
pub mod state;
pub mod relay;
pub mod routes;
pub mod store;
pub mod submission;
pub mod worker;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::relay::RelayClient;
use crate::state::{AppState, SharedState};

/// Build the HTTP front end. Form posts are relayed to `config.relay_addr`.
pub fn build_app(config: Config) -> Router {
    let relay = RelayClient::new(config.relay_addr);
    let state: SharedState = Arc::new(AppState { config, relay });

    routes::page_routes()
        .fallback(routes::fallback)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}
