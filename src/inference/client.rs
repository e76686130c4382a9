use super::InferenceService;
use crate::models::InferenceInputs;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com";

/// Client for the Cloudflare Workers AI REST endpoint.
pub struct WorkersAiClient {
    client: Client,
    api_token: String,
    account_id: String,
    model: String,
    base_url: String,
}

/// JSON envelope returned by models that answer with base64 image data
/// instead of raw bytes.
#[derive(Debug, Deserialize)]
struct InferenceEnvelope {
    result: EnvelopeResult,
}

#[derive(Debug, Deserialize)]
struct EnvelopeResult {
    image: Option<String>,
}

impl WorkersAiClient {
    pub fn new(api_token: String, account_id: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self::new_with_client(api_token, account_id, model, client)
    }

    pub fn new_with_client(
        api_token: String,
        account_id: String,
        model: String,
        client: Client,
    ) -> Self {
        Self {
            client,
            api_token,
            account_id,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn run_url(&self) -> String {
        format!(
            "{}/client/v4/accounts/{}/ai/run/{}",
            self.base_url, self.account_id, self.model
        )
    }
}

#[async_trait]
impl InferenceService for WorkersAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        tracing::debug!("Sending image generation request to Workers AI");

        let inputs = InferenceInputs {
            prompt: prompt.to_string(),
        };

        let response = self
            .client
            .post(self.run_url())
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&inputs)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Workers AI: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Workers AI error (status {}): {}", status, error_text);
            return Err(Error::Inference(format!(
                "API error (status {}): {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        // Diffusion models answer with raw PNG bytes; some models wrap a
        // base64 image in a JSON envelope instead.
        if content_type.starts_with("application/json") {
            let envelope: InferenceEnvelope = response.json().await?;
            let b64 = envelope
                .result
                .image
                .ok_or_else(|| Error::Inference("No image data in response".to_string()))?;

            use base64::Engine as _;
            base64::engine::general_purpose::STANDARD
                .decode(b64)
                .map_err(|e| Error::Inference(format!("Failed to decode base64 image: {}", e)))
        } else {
            Ok(response.bytes().await?.to_vec())
        }
    }
}
