//! Built-in probe payloads used when no prompt or image is supplied.

const PROBE_PROMPT_RAW: &str = include_str!("../data/prompts/probe.txt");
const SAMPLE_IMAGE_RAW: &str = include_str!("../data/images/sample.jpg.b64");

/// Default prompt sent with every probe.
pub fn probe_prompt() -> &'static str {
    PROBE_PROMPT_RAW.trim_end()
}

/// A 1x1 JPEG, base64-encoded. Swap in a real pet photo with `--image`.
pub fn sample_image_base64() -> &'static str {
    SAMPLE_IMAGE_RAW.trim_end()
}
