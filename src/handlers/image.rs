use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::api::gemini_api::GeminiApi;
use crate::error::GatewayError;
use crate::middleware::auth::SessionAuth;
use crate::router::GatewayState;
use crate::types::gemini::GenerateContentRequest;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessImageRequest {
    #[serde(default)]
    pub prompt: String,
    /// Base64-encoded image bytes, passed through to the provider as-is.
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "image/jpeg".to_string()
}

/// POST /api/process-image — authenticated proxy to the provider.
/// One outbound attempt; the provider's JSON body is relayed verbatim.
pub async fn process_image(
    State(state): State<GatewayState>,
    SessionAuth(user): SessionAuth,
    Json(req): Json<ProcessImageRequest>,
) -> Result<Json<Value>, GatewayError> {
    let envelope = GenerateContentRequest::image_edit(&req.prompt, &req.image, &req.mime_type);
    let body = GeminiApi::generate_content(&state.client, &state.config, &envelope).await?;
    info!(user = %user, mime_type = %req.mime_type, "image request proxied");
    Ok(Json(body))
}
