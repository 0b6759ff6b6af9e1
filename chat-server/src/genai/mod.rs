//! Text generation collaborator
//!
//! The engine treats generation as a black box: prompt + sampling
//! parameters in, text or failure out. [`TextGenerator`] is the seam;
//! the production implementation is [`GeminiClient`], tests script their
//! own.

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Safety filter threshold, mirroring the Gemini API vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SafetyThreshold {
    #[serde(rename = "BLOCK_LOW_AND_ABOVE")]
    BlockLowAndAbove,
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
    #[serde(rename = "BLOCK_NONE")]
    BlockNone,
}

/// Sampling parameters for one generation call.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_k: i32,
    pub top_p: f32,
    pub max_output_tokens: i32,
    pub safety_threshold: Option<SafetyThreshold>,
}

impl GenerationOptions {
    /// Parameters for the conversational fallback.
    pub fn chat() -> Self {
        Self {
            temperature: 0.8,
            top_k: 40,
            top_p: 0.9,
            max_output_tokens: 300,
            safety_threshold: Some(SafetyThreshold::BlockMediumAndAbove),
        }
    }

    /// Parameters for menu recommendations.
    pub fn recommendations() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.9,
            max_output_tokens: 400,
            safety_threshold: None,
        }
    }
}

/// Generation failure. Callers report a generic message upward; the
/// underlying cause is for operator logs only.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generation service returned status {0}")]
    Status(u16),

    #[error("generation response contained no text")]
    Empty,
}

/// Black-box text generation: prompt + parameters → text, or failure.
/// No retries here; failure is reported upward immediately.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError>;
}
