//! Note-generation service configuration.

/// Default primary model.
pub const DEFAULT_MODEL: &str = "bigcode/starcoder";
/// Default model tried when the primary is gated or missing.
pub const DEFAULT_FALLBACK_MODEL: &str = "Salesforce/codegen-2-1B";
/// Inference router base URL; the model path is appended.
pub const DEFAULT_ROUTER_URL: &str = "https://router.huggingface.co/hf-inference/models";
/// Legacy inference base URL, used as a last resort.
pub const DEFAULT_LEGACY_URL: &str = "https://api-inference.huggingface.co/models";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for [`crate::NotesClient`].
#[derive(Debug, Clone)]
pub struct NotesConfig {
    /// Bearer token. `None` means the feature is not configured.
    pub api_key: Option<String>,
    pub model: String,
    /// `None` disables the fallback step.
    pub fallback_model: Option<String>,
    pub router_url: String,
    pub legacy_url: String,
    pub timeout_secs: u64,
}

impl NotesConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                                             |
    /// |---------------------|-----------------------------------------------------|
    /// | `HF_API_KEY`        | unset (generation answers "not configured")         |
    /// | `HF_MODEL`          | `bigcode/starcoder`                                 |
    /// | `HF_FALLBACK_MODEL` | `Salesforce/codegen-2-1B` (empty disables)          |
    /// | `HF_ROUTER_URL`     | `https://router.huggingface.co/hf-inference/models` |
    /// | `HF_LEGACY_URL`     | `https://api-inference.huggingface.co/models`       |
    /// | `HF_TIMEOUT_SECS`   | `60`                                                |
    ///
    /// # Panics
    ///
    /// Panics if `HF_TIMEOUT_SECS` is set but not a valid `u64`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("HF_API_KEY").ok().filter(|k| !k.is_empty());

        let model = std::env::var("HF_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let fallback_model = match std::env::var("HF_FALLBACK_MODEL") {
            Ok(m) if m.is_empty() => None,
            Ok(m) => Some(m),
            Err(_) => Some(DEFAULT_FALLBACK_MODEL.into()),
        };

        let router_url = std::env::var("HF_ROUTER_URL").unwrap_or_else(|_| DEFAULT_ROUTER_URL.into());
        let legacy_url = std::env::var("HF_LEGACY_URL").unwrap_or_else(|_| DEFAULT_LEGACY_URL.into());

        let timeout_secs: u64 = std::env::var("HF_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("HF_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            model,
            fallback_model,
            router_url,
            legacy_url,
            timeout_secs,
        }
    }
}
