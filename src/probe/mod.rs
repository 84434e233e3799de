//! Image generation API probing
//!
//! Sends one request per model to an OpenAI-compatible
//! `/v1/images/generations` endpoint and classifies what comes back.

pub mod client;
pub mod mock;

pub use client::HttpProbeClient;
pub use mock::MockProbeClient;

use crate::models::ImageGenerationRequest;
use crate::outcome::ProbeReport;
use async_trait::async_trait;

#[async_trait]
pub trait ProbeService: Send + Sync {
    /// Send `request` once. Failures are folded into the report, never returned.
    async fn probe(&self, request: &ImageGenerationRequest) -> ProbeReport;
}
