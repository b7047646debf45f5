use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use serde_json::{json, Value};
use subtle::ConstantTimeEq;

use crate::{services::api::ADMIN_KEY_HEADER, services::metrics::BROADCASTS_REJECTED, AppState};

/// Extractor that checks the `X-Admin-Key` header against `config.admin_key`.
pub struct AdminKeyAuth;

impl FromRequestParts<AppState> for AdminKeyAuth {
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        let matches: bool = key
            .as_bytes()
            .ct_eq(state.config.admin_key.as_bytes())
            .into();

        if key.is_empty() || !matches {
            BROADCASTS_REJECTED.with_label_values(&["unauthorized"]).inc();
            return Err((StatusCode::FORBIDDEN, Json(json!({ "error": "Unauthorized" }))));
        }

        Ok(AdminKeyAuth)
    }
}
