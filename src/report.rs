//! Console rendering for probe runs.
//!
//! Everything here returns plain `String`s; [`crate::app::App`] decides where
//! they go.

use crate::models::ImageModel;
use crate::outcome::{Outcome, ProbeReport};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::time::Duration;

const RULE_WIDTH: usize = 50;
const PROMPT_PREVIEW_CHARS: usize = 80;
const URL_PREVIEW_CHARS: usize = 100;
const KEY_PREVIEW_CHARS: usize = 10;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Show the first 10 characters of the key. Keys of 10 characters or fewer
/// print `API key not set!`.
pub fn mask_api_key(api_key: &str) -> String {
    if api_key.chars().count() > KEY_PREVIEW_CHARS {
        let prefix: String = api_key.chars().take(KEY_PREVIEW_CHARS).collect();
        format!("API Key: {}...", prefix)
    } else {
        "API key not set!".to_string()
    }
}

fn secs(elapsed: Duration) -> String {
    format!("{:.2} s", elapsed.as_secs_f64())
}

pub fn render_banner(base_url: &str, api_key: &str, started_at: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI image generation API test");
    let _ = writeln!(out, "Started: {}", started_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "API Base URL: {}", base_url);
    let _ = writeln!(out, "{}", mask_api_key(api_key));
    out
}

pub fn render_model_header(model: ImageModel, prompt: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Testing model: {}", model);
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Prompt: {}", truncate_chars(prompt, PROMPT_PREVIEW_CHARS));
    let _ = writeln!(out, "Calling API...");
    out
}

pub fn render_outcome(report: &ProbeReport) -> String {
    let mut out = String::new();
    if let Some(status) = report.status {
        let _ = writeln!(out, "Status code: {}", status);
        let _ = writeln!(out, "Response time: {}", secs(report.elapsed));
    }

    let line = match &report.outcome {
        Outcome::Success { url } => format!(
            "✅ Success! Image URL: {}",
            truncate_chars(url, URL_PREVIEW_CHARS)
        ),
        Outcome::MalformedResponse { body } => format!("❌ Unexpected response: {}", body),
        Outcome::HttpError { body, .. } => format!("❌ Error: {}", body),
        Outcome::Timeout { elapsed } => format!("❌ Timed out! Waited {}", secs(*elapsed)),
        Outcome::Exception { message, elapsed } => {
            format!("❌ Exception: {} (waited {})", message, secs(*elapsed))
        }
    };
    let _ = writeln!(out, "{}", line);
    out
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Success { .. } => "PASS",
        Outcome::MalformedResponse { .. } => "FAIL (malformed response)",
        Outcome::HttpError { .. } => "FAIL (HTTP error)",
        Outcome::Timeout { .. } => "FAIL (timeout)",
        Outcome::Exception { .. } => "FAIL (exception)",
    }
}

pub fn render_summary(reports: &[ProbeReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    for report in reports {
        let _ = writeln!(
            out,
            "{}: {} in {}",
            report.model,
            outcome_label(&report.outcome),
            secs(report.elapsed)
        );
    }
    let passed = reports.iter().filter(|r| r.outcome.is_success()).count();
    let _ = writeln!(out, "{}/{} models passed", passed, reports.len());
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Testing complete");
    let _ = writeln!(out, "{}", rule());
    out
}
