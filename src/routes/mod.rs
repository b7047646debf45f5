pub mod broadcast;
pub mod generate_image;
pub mod health;
pub mod metrics;

use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Full HTTP surface of the reference server.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-admin-key"),
        ]))
        .max_age(Duration::from_secs(86400));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .route(
            "/broadcast",
            get(broadcast::get_broadcast).post(broadcast::publish_broadcast),
        )
        .route("/generate-image", post(generate_image::generate_image))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
