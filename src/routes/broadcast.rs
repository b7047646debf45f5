use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    middleware::admin_key::AdminKeyAuth,
    models::broadcast::{PublishRequest, PublishResponse},
    services::metrics::{BROADCASTS_PUBLISHED, BROADCASTS_REJECTED},
    AppState,
};

/// GET /broadcast: public endpoint, returns the current broadcast or null.
pub async fn get_broadcast(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "message": state.store.current().await }))
}

/// POST /broadcast: replace the current broadcast. Requires `X-Admin-Key`.
pub async fn publish_broadcast(
    State(state): State<AppState>,
    _auth: AdminKeyAuth,
    Json(body): Json<PublishRequest>,
) -> Result<Json<PublishResponse>, (StatusCode, Json<Value>)> {
    if body.message.trim().is_empty() {
        BROADCASTS_REJECTED.with_label_values(&["empty"]).inc();
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Message is required" })),
        ));
    }

    let record = state.store.publish(body.message).await;
    BROADCASTS_PUBLISHED.inc();
    info!("Broadcast {} published", record.id);

    Ok(Json(PublishResponse {
        success: true,
        id: Some(record.id),
        message: Some(record.message),
        created_at: record.created_at,
    }))
}
