use super::ProbeService;
use crate::models::{ImageGenerationRequest, DEFAULT_BASE_URL};
use crate::outcome::{Outcome, ProbeReport};
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

const GENERATIONS_PATH: &str = "/v1/images/generations";

/// Probe client for an OpenAI-compatible image generation endpoint.
pub struct HttpProbeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl HttpProbeClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new_with_client(api_key, client))
    }

    /// Wrap an existing client. Its configured timeout applies to every probe.
    pub fn new_with_client(api_key: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATIONS_PATH)
    }
}

#[async_trait]
impl ProbeService for HttpProbeClient {
    async fn probe(&self, request: &ImageGenerationRequest) -> ProbeReport {
        let url = self.endpoint();
        tracing::debug!(
            "POST {} (model: {}, images: {}, aspect_ratio: {})",
            url,
            request.model,
            request.image.len(),
            request.aspect_ratio
        );

        let start = Instant::now();
        let failed = |error: reqwest::Error, status: Option<u16>| {
            let elapsed = start.elapsed();
            tracing::warn!("Probe for {} failed: {}", request.model, error);
            ProbeReport {
                model: request.model,
                status,
                elapsed,
                outcome: Outcome::from_transport_error(&error, elapsed),
            }
        };

        let response = match self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return failed(e, None),
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return failed(e, Some(status)),
        };
        let elapsed = start.elapsed();

        let outcome = Outcome::from_response(status, &body, elapsed);
        if !outcome.is_success() {
            tracing::warn!("Probe for {} returned status {}: {}", request.model, status, body);
        }

        ProbeReport {
            model: request.model,
            status: Some(status),
            elapsed,
            outcome,
        }
    }
}
