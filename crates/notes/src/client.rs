//! HTTP client for the text-generation inference API.
//!
//! One call to [`NotesClient::generate`] may hit up to three endpoints:
//! the primary model on the router, the fallback model on the router, and
//! the primary model on the legacy endpoint. The later steps only run when
//! the previous one answered 403 or 404 (gated or unknown model).

use std::time::Duration;

use serde::Serialize;

use crate::config::NotesConfig;

/// Token budget for the primary and legacy calls.
const PRIMARY_MAX_TOKENS: u32 = 400;
/// Token budget for the fallback model.
const FALLBACK_MAX_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.2;

/// Hint returned to the caller when the upstream refused the model.
pub const GATED_MODEL_GUIDANCE: &str = "Model may be gated or your token lacks inference \
permissions. Ensure you accepted the model license on Hugging Face and that HF_API_KEY has \
read/inference scope. You can also set HF_FALLBACK_MODEL to a public model.";

/// Errors from the note-generation layer.
#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    /// No API key is configured on the server.
    #[error("Hugging Face API key not configured on server (HF_API_KEY)")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Failed to contact the text-generation service: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Text-generation service error ({status} {status_text})")]
    Upstream {
        status: u16,
        status_text: String,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered 2xx with a body that is not JSON.
    #[error("Text-generation service returned non-JSON")]
    InvalidResponse(String),
}

impl NotesError {
    /// Whether the upstream refused the model itself (403/404), which is
    /// what triggers the next step of the fallback chain.
    pub fn is_gated(&self) -> bool {
        matches!(self, NotesError::Upstream { status: 403 | 404, .. })
    }

    /// Operator guidance for gated-model failures.
    pub fn guidance(&self) -> Option<&'static str> {
        self.is_gated().then_some(GATED_MODEL_GUIDANCE)
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
}

/// Client for the note-generation service. Cheap to share behind an `Arc`.
pub struct NotesClient {
    client: reqwest::Client,
    config: NotesConfig,
}

impl NotesClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: NotesConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    /// Generate study notes for `code`, walking the fallback chain.
    ///
    /// A transport failure on the primary call is returned immediately.
    /// If every step fails, the primary call's error is returned.
    pub async fn generate(&self, code: &str) -> Result<String, NotesError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NotesError::NotConfigured)?;
        let prompt = build_prompt(code);

        let primary_url = model_url(&self.config.router_url, &self.config.model);
        let mut result = self
            .attempt(&primary_url, api_key, &prompt, PRIMARY_MAX_TOKENS)
            .await;

        if result.as_ref().err().is_some_and(NotesError::is_gated) {
            if let Some(fallback) = &self.config.fallback_model {
                tracing::warn!(
                    model = %self.config.model,
                    fallback_model = %fallback,
                    "Primary model call refused, attempting fallback model"
                );
                let url = model_url(&self.config.router_url, fallback);
                match self.attempt(&url, api_key, &prompt, FALLBACK_MAX_TOKENS).await {
                    Ok(response) => result = Ok(response),
                    Err(e) => {
                        tracing::error!(fallback_model = %fallback, error = %e, "Fallback model failed");
                    }
                }
            }
        }

        if result.as_ref().err().is_some_and(NotesError::is_gated) {
            let url = model_url(&self.config.legacy_url, &self.config.model);
            match self.attempt(&url, api_key, &prompt, PRIMARY_MAX_TOKENS).await {
                Ok(response) => result = Ok(response),
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Legacy inference endpoint failed");
                }
            }
        }

        let response = result?;
        let raw = response.text().await?;
        let json: serde_json::Value =
            serde_json::from_str(&raw).map_err(|_| NotesError::InvalidResponse(raw.clone()))?;

        Ok(extract_generated_text(&json))
    }

    /// POST one generation request, turning non-2xx answers into
    /// [`NotesError::Upstream`] with the body captured.
    async fn attempt(
        &self,
        url: &str,
        api_key: &str,
        prompt: &str,
        max_new_tokens: u32,
    ) -> Result<reqwest::Response, NotesError> {
        let body = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens,
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotesError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }
        Ok(response)
    }
}

/// Wrap source code in the study-notes instruction.
pub fn build_prompt(code: &str) -> String {
    format!(
        "Generate concise study notes and explanations for the following code. Focus on \
         algorithmic idea, complexity, caveats, and helpful tips. Use bullet points or short \
         paragraphs.\n\n{code}"
    )
}

fn model_url(base: &str, model: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), model)
}

/// Pull the generated text out of an inference response.
///
/// Accepts `[{"generated_text": ..}]`, `{"generated_text": ..}` and
/// `{"data": [{"generated_text": ..}]}`; anything else is returned as JSON text.
pub fn extract_generated_text(json: &serde_json::Value) -> String {
    if let Some(first) = json.as_array().and_then(|a| a.first()) {
        return first
            .get("generated_text")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| first.to_string());
    }

    json.get("generated_text")
        .or_else(|| json.pointer("/data/0/generated_text"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| json.to_string())
}
