//! HTTP routing.

mod rates;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tasas", get(rates::get_tasas))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
