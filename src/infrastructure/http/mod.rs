//! HTTP REST API routes

mod config_routes;
mod image_routes;
mod narrative_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use config_routes::*;
pub use image_routes::*;
pub use narrative_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/narrative", post(narrative_routes::generate_narrative))
        .route("/api/image", post(image_routes::generate_image))
        .route("/api/config/check", get(config_routes::check_config))
}
