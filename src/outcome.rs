//! Classification of a single probe call.

use crate::models::{ImageGenerationResponse, ImageModel};
use std::time::Duration;

/// Result of one probe call. Exactly one variant applies per call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { url: String },
    MalformedResponse { body: String },
    HttpError { status: u16, body: String },
    Timeout { elapsed: Duration },
    Exception { message: String, elapsed: Duration },
}

impl Outcome {
    /// Classify a response that arrived with a full body.
    ///
    /// A 200 whose body is not JSON at all is a decode failure and ends up as
    /// [`Outcome::Exception`]; valid JSON of the wrong shape is
    /// [`Outcome::MalformedResponse`].
    pub fn from_response(status: u16, body: &str, elapsed: Duration) -> Self {
        if status != 200 {
            return Outcome::HttpError {
                status,
                body: body.to_string(),
            };
        }

        let value: serde_json::Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                return Outcome::Exception {
                    message: format!("Failed to decode response body: {}", e),
                    elapsed,
                }
            }
        };

        match first_image_url(value) {
            Some(url) => Outcome::Success { url },
            None => Outcome::MalformedResponse {
                body: body.to_string(),
            },
        }
    }

    /// Classify a transport-level failure.
    pub fn from_transport_error(error: &reqwest::Error, elapsed: Duration) -> Self {
        if error.is_timeout() {
            Outcome::Timeout { elapsed }
        } else {
            Outcome::Exception {
                message: error.to_string(),
                elapsed,
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

// Every item must carry a URL; b64_json-only results don't count since the
// request asks for `response_format: url`.
fn first_image_url(value: serde_json::Value) -> Option<String> {
    let response: ImageGenerationResponse = serde_json::from_value(value).ok()?;
    let all_have_urls = response
        .data
        .iter()
        .all(|item| item.url.as_deref().is_some_and(|url| !url.is_empty()));
    if !all_have_urls {
        return None;
    }
    response.data.into_iter().next().and_then(|item| item.url)
}

/// Everything the console needs to know about one probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub model: ImageModel,
    /// HTTP status, when a response arrived at all.
    pub status: Option<u16>,
    pub elapsed: Duration,
    pub outcome: Outcome,
}
