//! Sequential probe run over the configured models.

use crate::models::{Config, ImageGenerationRequest, ImageModel};
use crate::outcome::ProbeReport;
use crate::probe::{HttpProbeClient, ProbeService};
use crate::{fixtures, report, Result};
use base64::Engine as _;
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Inputs shared by every probe in a run.
#[derive(Debug, Clone)]
pub struct ProbePlan {
    pub base_url: String,
    pub api_key: String,
    pub models: Vec<ImageModel>,
    pub prompt: String,
    pub aspect_ratio: String,
    /// Base64-encoded images, without a data-URI prefix.
    pub images: Vec<String>,
}

impl ProbePlan {
    /// Resolve a config into a plan, reading and encoding any image files.
    pub fn from_config(config: &Config) -> Result<Self> {
        let images = if config.image_paths.is_empty() {
            vec![fixtures::sample_image_base64().to_string()]
        } else {
            load_images(&config.image_paths)?
        };

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            models: config.models.clone(),
            prompt: config.prompt.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
            images,
        })
    }

    pub fn request_for(&self, model: ImageModel) -> ImageGenerationRequest {
        ImageGenerationRequest::new(model, &self.prompt, &self.aspect_ratio, &self.images)
    }
}

fn load_images(paths: &[PathBuf]) -> Result<Vec<String>> {
    paths
        .iter()
        .map(|path| -> Result<String> {
            let bytes = fs::read(path)?;
            info!("Loaded image {} ({} bytes)", path.display(), bytes.len());
            Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
        })
        .collect()
}

/// Runs one probe per model and prints each result as it arrives.
pub struct App {
    probe: Box<dyn ProbeService>,
    plan: ProbePlan,
}

impl App {
    /// Build an app around any probe implementation, e.g. a mock.
    pub fn with_service(probe: Box<dyn ProbeService>, plan: ProbePlan) -> Self {
        Self { probe, plan }
    }

    /// Construct an app that talks to the real endpoint.
    pub fn new(config: &Config) -> Result<Self> {
        let plan = ProbePlan::from_config(config)?;
        let client = HttpProbeClient::new(config.api_key.clone(), config.timeout)?
            .with_base_url(config.base_url.clone());
        info!(
            "Probing {} (timeout: {}s)",
            config.base_url,
            config.timeout.as_secs()
        );
        Ok(Self::with_service(Box::new(client), plan))
    }

    pub fn plan(&self) -> &ProbePlan {
        &self.plan
    }

    /// Probe every model in order. Never fails; each outcome is reported.
    pub async fn run(&self) -> Vec<ProbeReport> {
        println!(
            "{}",
            report::render_banner(&self.plan.base_url, &self.plan.api_key, Local::now())
        );

        let mut reports = Vec::with_capacity(self.plan.models.len());
        for (i, model) in self.plan.models.iter().copied().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{}", report::render_model_header(model, &self.plan.prompt));

            info!("Probing model {}", model);
            let request = self.plan.request_for(model);
            let result = self.probe.probe(&request).await;
            print!("{}", report::render_outcome(&result));

            reports.push(result);
        }

        println!();
        print!("{}", report::render_summary(&reports));
        reports
    }
}
