use serde_json::Value;
use std::time::Duration;
use tracing::error;

use crate::config::Config;
use crate::error::GatewayError;
use crate::types::gemini::GenerateContentRequest;

pub struct GeminiApi;

impl GeminiApi {
    /// Single best-effort POST to the `generateContent` endpoint. No retries:
    /// on HTTP 200 the provider's JSON body is returned verbatim, anything
    /// else becomes an `UpstreamStatus` carrying the raw response text.
    pub async fn generate_content(
        client: &reqwest::Client,
        config: &Config,
        body: &GenerateContentRequest,
    ) -> Result<Value, GatewayError> {
        let resp = client
            .post(config.gemini_api_url.clone())
            .header("x-goog-api-key", config.gemini_api_key.as_str())
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::OK {
            return Ok(resp.json::<Value>().await?);
        }

        let details = resp.text().await?;
        error!(status = %status, "Gemini rejected image request");
        Err(GatewayError::UpstreamStatus { status, details })
    }
}
