use anyhow::Result;
use clap::Parser;
use image_api_probe::app::App;
use image_api_probe::models::{parse_timeout_secs, Config, ImageModel};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "image-api-probe")]
#[command(about = "Smoke-test an image generation API against one or more models")]
struct CliArgs {
    /// API base URL (overrides AI_API_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Model to probe; repeat for several. Defaults to all known models.
    #[arg(long = "model", value_enum)]
    models: Vec<ImageModel>,

    /// Request timeout in seconds (overrides AI_API_TIMEOUT_SECS).
    #[arg(long, value_parser = parse_timeout_arg)]
    timeout: Option<Duration>,

    /// Prompt to send instead of the built-in one.
    #[arg(long)]
    prompt: Option<String>,

    /// Aspect ratio sent with each request.
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// Image file to send as a reference; repeat for several.
    #[arg(long = "image", value_name = "PATH")]
    images: Vec<PathBuf>,
}

fn parse_timeout_arg(input: &str) -> std::result::Result<Duration, String> {
    parse_timeout_secs(input).map_err(|e| e.to_string())
}

impl CliArgs {
    fn apply(self, config: &mut Config) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if !self.models.is_empty() {
            config.models = self.models;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(prompt) = self.prompt {
            config.prompt = prompt;
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            config.aspect_ratio = aspect_ratio;
        }
        if !self.images.is_empty() {
            config.image_paths = self.images;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_api_probe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env_with_timeout(args.timeout) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    args.apply(&mut config);

    match App::new(&config) {
        Ok(app) => {
            let reports = app.run().await;
            let passed = reports.iter().filter(|r| r.outcome.is_success()).count();
            info!("Probe run finished: {}/{} passed", passed, reports.len());
            Ok(())
        }
        Err(e) => {
            error!("Failed to initialize probe: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    #[test]
    fn test_cli_overrides_every_field() {
        let args = CliArgs::try_parse_from([
            "image-api-probe",
            "--base-url",
            "http://localhost:8080",
            "--model",
            "sora_image-vip",
            "--model",
            "nano-banana-2",
            "--timeout",
            "30",
            "--prompt",
            "a dog astronaut",
            "--aspect-ratio",
            "16:9",
            "--image",
            "pet.jpg",
            "--image",
            "pet2.png",
        ])
        .unwrap();

        let mut config = default_config();
        args.apply(&mut config);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(
            config.models,
            vec![ImageModel::SoraImageVip, ImageModel::NanoBanana2]
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.prompt, "a dog astronaut");
        assert_eq!(config.aspect_ratio, "16:9");
        assert_eq!(
            config.image_paths,
            vec![PathBuf::from("pet.jpg"), PathBuf::from("pet2.png")]
        );
    }

    #[test]
    fn test_no_flags_keep_defaults() {
        let args = CliArgs::try_parse_from(["image-api-probe"]).unwrap();

        let mut config = default_config();
        args.apply(&mut config);

        let defaults = default_config();
        assert_eq!(config.base_url, defaults.base_url);
        assert_eq!(config.models, ImageModel::ALL.to_vec());
        assert_eq!(config.timeout, defaults.timeout);
        assert_eq!(config.prompt, defaults.prompt);
        assert_eq!(config.aspect_ratio, defaults.aspect_ratio);
        assert!(config.image_paths.is_empty());
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        assert!(CliArgs::try_parse_from(["image-api-probe", "--model", "dall-e-3"]).is_err());
    }

    #[test]
    fn test_parse_timeout_arg() {
        assert_eq!(parse_timeout_arg("45"), Ok(Duration::from_secs(45)));
        assert!(parse_timeout_arg("0").is_err());
        assert!(parse_timeout_arg("x").is_err());
        assert!(CliArgs::try_parse_from(["image-api-probe", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_cli_timeout_wins_over_bad_env_timeout() {
        let args = CliArgs::try_parse_from(["image-api-probe", "--timeout", "1"]).unwrap();

        let config = Config::from_lookup_with_timeout(
            |key| (key == "AI_API_TIMEOUT_SECS").then(|| "soon".to_string()),
            args.timeout,
        )
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
