//! Inference service integration for image generation
//!
//! Provides the interface to Cloudflare Workers AI for turning text prompts
//! into images, plus a mock implementation for tests.

pub mod client;
pub mod mock;

pub use client::WorkersAiClient;
pub use mock::MockInferenceClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait InferenceService: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;
}
