//! Smoke-test probe for OpenAI-compatible image generation APIs
//!
//! Sends one `/v1/images/generations` request per model, classifies each
//! response into an [`outcome::Outcome`], and prints a human-readable report.

pub mod app;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod outcome;
pub mod probe;
pub mod report;

pub use error::{Error, Result};
