use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{
    models::image::{GenerateImageRequest, GenerateImageResponse, UpstreamImageResponse},
    services::metrics::IMAGE_GENERATIONS,
    AppState,
};

type ApiError = (StatusCode, Json<Value>);

/// POST /generate-image: forward the prompt to the upstream image model.
pub async fn generate_image(
    State(state): State<AppState>,
    Json(body): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    if body.prompt.trim().is_empty() {
        IMAGE_GENERATIONS.with_label_values(&["invalid"]).inc();
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Prompt is required" })),
        ));
    }

    let upstream = state.config.image_generation_api_url.as_deref().ok_or_else(|| {
        IMAGE_GENERATIONS.with_label_values(&["unconfigured"]).inc();
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Image generation is not configured" })),
        )
    })?;

    let result = call_upstream(&state, upstream, &body.prompt).await.map_err(|e| {
        warn!("Upstream image generation failed: {}", e);
        IMAGE_GENERATIONS.with_label_values(&["upstream_error"]).inc();
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "Image generation failed" })),
        )
    })?;

    IMAGE_GENERATIONS.with_label_values(&["ok"]).inc();
    info!("Image generated for prompt ({} chars)", body.prompt.chars().count());

    Ok(Json(GenerateImageResponse {
        success: true,
        image_url: Some(result.url),
        prompt: Some(body.prompt),
    }))
}

async fn call_upstream(
    state: &AppState,
    upstream: &str,
    prompt: &str,
) -> anyhow::Result<UpstreamImageResponse> {
    let response = state
        .http
        .post(upstream)
        .timeout(state.config.upstream_timeout)
        .json(&json!({ "prompt": prompt }))
        .send()
        .await?
        .error_for_status()?;
    let body: UpstreamImageResponse = response.json().await?;
    if body.url.is_empty() {
        anyhow::bail!("upstream returned no image url");
    }
    Ok(body)
}
