//! Data models and structures
//!
//! Wire types for the image generation endpoint plus the probe configuration.

use crate::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.bltcy.ai";
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";
pub const RESPONSE_FORMAT_URL: &str = "url";

/// Image models exercised by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ImageModel {
    #[serde(rename = "nano-banana-2")]
    #[value(name = "nano-banana-2")]
    NanoBanana2,
    #[serde(rename = "sora_image-vip")]
    #[value(name = "sora_image-vip")]
    SoraImageVip,
}

impl ImageModel {
    pub const ALL: [ImageModel; 2] = [ImageModel::NanoBanana2, ImageModel::SoraImageVip];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::NanoBanana2 => "nano-banana-2",
            ImageModel::SoraImageVip => "sora_image-vip",
        }
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for `/v1/images/generations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model: ImageModel,
    pub response_format: String,
    pub aspect_ratio: String,
    pub image: Vec<String>,
}

impl ImageGenerationRequest {
    pub fn new(model: ImageModel, prompt: &str, aspect_ratio: &str, images: &[String]) -> Self {
        Self {
            prompt: prompt.to_string(),
            model,
            response_format: RESPONSE_FORMAT_URL.to_string(),
            aspect_ratio: aspect_ratio.to_string(),
            image: images.to_vec(),
        }
    }
}

/// Top-level image generation response.
#[derive(Debug, Deserialize)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub data: Vec<ImageData>,
}

/// One generated image item (URL or base64).
#[derive(Debug, Deserialize)]
pub struct ImageData {
    pub url: Option<String>,
    pub b64_json: Option<String>,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub models: Vec<ImageModel>,
    pub prompt: String,
    pub aspect_ratio: String,
    pub image_paths: Vec<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_timeout(None)
    }

    /// Like [`Config::from_env`], but an explicit `timeout` wins and
    /// `AI_API_TIMEOUT_SECS` is then never parsed.
    pub fn from_env_with_timeout(timeout: Option<Duration>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup_with_timeout(|key| std::env::var(key).ok(), timeout)
    }

    /// Build a config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_timeout(lookup, None)
    }

    pub fn from_lookup_with_timeout<F>(lookup: F, timeout: Option<Duration>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = match (timeout, var("AI_API_TIMEOUT_SECS")) {
            (Some(timeout), _) => timeout,
            (None, Some(raw)) => parse_timeout_secs(&raw)?,
            (None, None) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_key: var("AI_API_KEY").unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string()),
            base_url: var("AI_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
            models: ImageModel::ALL.to_vec(),
            prompt: crate::fixtures::probe_prompt().to_string(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            image_paths: Vec::new(),
        })
    }
}

pub fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid timeout '{}': expected seconds", raw)))?;
    if secs == 0 {
        return Err(Error::Config("Timeout must be at least 1 second".to_string()));
    }
    Ok(Duration::from_secs(secs))
}
