//! Data models and structures
//!
//! Defines the request/response bodies for the HTTP surface, the inputs
//! record sent to the inference API, and the service configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateRequest {
    /// The prompt, if present and non-empty.
    ///
    /// An empty string is treated the same as an absent or null key. Any
    /// other string passes, including `"0"`.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.is_empty())
    }
}

/// Inputs record forwarded to the text-to-image model.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceInputs {
    pub prompt: String,
}

/// The single JSON error body shape shared by every failure response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

pub const DEFAULT_IMAGE_MODEL: &str = "@cf/stabilityai/stable-diffusion-xl-base-1.0";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub account_id: String,
    pub image_model: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_token: std::env::var("CLOUDFLARE_API_TOKEN")
                .map_err(|_| crate::Error::Config("CLOUDFLARE_API_TOKEN not set".to_string()))?,
            account_id: std::env::var("CLOUDFLARE_ACCOUNT_ID")
                .map_err(|_| crate::Error::Config("CLOUDFLARE_ACCOUNT_ID not set".to_string()))?,
            image_model: std::env::var("IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }
}
