use super::ProbeService;
use crate::models::ImageGenerationRequest;
use crate::outcome::{Outcome, ProbeReport};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct MockProbeClient {
    outcomes: Arc<Mutex<Vec<Outcome>>>,
    requests: Arc<Mutex<Vec<ImageGenerationRequest>>>,
}

impl MockProbeClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_outcome(self, outcome: Outcome) -> Self {
        self.outcomes.lock().unwrap().push(outcome);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ImageGenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockProbeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeService for MockProbeClient {
    async fn probe(&self, request: &ImageGenerationRequest) -> ProbeReport {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
        let count = requests.len();

        let outcomes = self.outcomes.lock().unwrap();
        let outcome = if outcomes.is_empty() {
            Outcome::Success {
                url: format!("https://mock.local/{}.png", request.model),
            }
        } else {
            outcomes[(count - 1) % outcomes.len()].clone()
        };

        let status = match &outcome {
            Outcome::Success { .. } | Outcome::MalformedResponse { .. } => Some(200),
            Outcome::HttpError { status, .. } => Some(*status),
            Outcome::Timeout { .. } | Outcome::Exception { .. } => None,
        };
        let elapsed = match &outcome {
            Outcome::Timeout { elapsed } | Outcome::Exception { elapsed, .. } => *elapsed,
            _ => Duration::from_millis(10),
        };

        ProbeReport {
            model: request.model,
            status,
            elapsed,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageModel;

    fn request(model: ImageModel) -> ImageGenerationRequest {
        ImageGenerationRequest::new(model, "prompt", "1:1", &[])
    }

    #[tokio::test]
    async fn test_mock_default_outcome_is_success() {
        let client = MockProbeClient::new();

        let report = client.probe(&request(ImageModel::NanoBanana2)).await;
        assert_eq!(report.model, ImageModel::NanoBanana2);
        assert_eq!(report.status, Some(200));
        assert!(report.outcome.is_success());
    }

    #[tokio::test]
    async fn test_mock_cycles_outcomes_and_records_requests() {
        let client = MockProbeClient::new()
            .with_outcome(Outcome::HttpError {
                status: 503,
                body: "busy".to_string(),
            })
            .with_outcome(Outcome::Timeout {
                elapsed: Duration::from_secs(120),
            });

        let first = client.probe(&request(ImageModel::NanoBanana2)).await;
        let second = client.probe(&request(ImageModel::SoraImageVip)).await;
        let third = client.probe(&request(ImageModel::NanoBanana2)).await;

        assert_eq!(first.status, Some(503));
        assert_eq!(second.status, None);
        assert_eq!(second.elapsed, Duration::from_secs(120));
        assert_eq!(third.outcome, first.outcome);
        assert_eq!(client.get_call_count(), 3);
        assert_eq!(client.requests()[1].model, ImageModel::SoraImageVip);
    }
}
