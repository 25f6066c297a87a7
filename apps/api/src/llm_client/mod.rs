/// LLM Client — the single point of entry for all Gemini calls in the service.
///
/// ARCHITECTURAL RULE: No other module may call the Generative Language API directly.
/// All generation requests MUST go through `ProviderClient::generate`.
///
/// Retry policy is a single deterministic failover: when the primary key is out of
/// quota, the secondary key is tried exactly once. There is no backoff loop.
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

pub mod gemini;
pub mod prompts;

pub use gemini::{GeminiBackend, GEMINI_API_BASE, MODEL};

/// Returned in place of an error when the provider answers without any text.
pub const NO_OUTPUT_GENERATED: &str = "No output generated.";

/// Advisory surfaced to the caller when the secondary key served the request.
pub const FALLBACK_WARNING: &str =
    "Kuota API key utama habis, permintaan ini dilayani dengan API key cadangan.";

/// Substrings the provider uses to report an exhausted quota.
const QUOTA_SIGNALS: &[&str] = &["429", "quota", "RESOURCE_EXHAUSTED"];

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Quota exhausted: {message}")]
    QuotaExhausted { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ProviderError {
    /// Classifies a non-success provider reply.
    ///
    /// HTTP 429 is quota exhaustion outright. Otherwise the raw error body is
    /// checked for the quota substrings, since that is the only signal some
    /// upstream failures carry.
    pub fn from_status(status: u16, raw_body: &str, message: String) -> Self {
        if status == 429 || contains_quota_signal(raw_body) {
            ProviderError::QuotaExhausted { message }
        } else {
            ProviderError::Api { status, message }
        }
    }

    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            ProviderError::QuotaExhausted { .. } => true,
            ProviderError::Http(e) => contains_quota_signal(&e.to_string()),
            ProviderError::Api { .. } | ProviderError::Parse(_) => false,
        }
    }

    /// The message shown to the end user: the provider's own wording.
    pub fn client_message(&self) -> String {
        match self {
            ProviderError::QuotaExhausted { message } | ProviderError::Api { message, .. } => {
                message.clone()
            }
            ProviderError::Http(e) => e.to_string(),
            ProviderError::Parse(e) => e.to_string(),
        }
    }
}

pub fn contains_quota_signal(text: &str) -> bool {
    QUOTA_SIGNALS.iter().any(|signal| text.contains(signal))
}

/// Ordered pair of API keys. The secondary key is optional; without it a quota
/// failure on the primary key is fatal.
#[derive(Debug, Clone)]
pub struct ProviderCredentialSet {
    primary: String,
    secondary: Option<String>,
}

impl ProviderCredentialSet {
    pub fn new(primary: String, secondary: Option<String>) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    pub text: String,
    pub used_fallback: bool,
}

/// Wire-level generation call. `GeminiBackend` is the production implementation;
/// tests swap in a scripted backend.
///
/// Returns the first candidate's first text part, or `None` when the provider
/// replied successfully but without text.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &str,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<Option<String>, ProviderError>;
}

/// The single provider client used by every generation endpoint.
#[derive(Clone)]
pub struct ProviderClient {
    backend: Arc<dyn GenerationBackend>,
}

impl ProviderClient {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub fn gemini(api_base: &str) -> Self {
        Self::new(Arc::new(GeminiBackend::new(api_base)))
    }

    /// Calls the provider with the primary key, failing over once to the
    /// secondary key when the primary is out of quota.
    pub async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        credentials: &ProviderCredentialSet,
    ) -> Result<ProviderResult, ProviderError> {
        let primary = self
            .backend
            .generate_content(credentials.primary(), prompt, system_instruction)
            .await;

        match primary {
            Ok(text) => Ok(ProviderResult {
                text: text_or_sentinel(text),
                used_fallback: false,
            }),
            Err(e) if e.is_quota_exhausted() => {
                let Some(secondary) = credentials.secondary() else {
                    warn!("Primary key quota exhausted and no secondary key is configured");
                    return Err(e);
                };

                warn!("Primary key quota exhausted ({e}), retrying once with secondary key");
                let text = self
                    .backend
                    .generate_content(secondary, prompt, system_instruction)
                    .await?;

                debug!("Secondary key call succeeded");
                Ok(ProviderResult {
                    text: text_or_sentinel(text),
                    used_fallback: true,
                })
            }
            Err(e) => Err(e),
        }
    }
}

fn text_or_sentinel(text: Option<String>) -> String {
    text.filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| NO_OUTPUT_GENERATED.to_string())
}


#[cfg(test)]
mod tests {
    use super::testing::{Reply, ScriptedBackend};
    use super::*;

    fn creds() -> ProviderCredentialSet {
        ProviderCredentialSet::new("primary".to_string(), Some("secondary".to_string()))
    }

    #[test]
    fn test_quota_classification_by_status() {
        let err = ProviderError::from_status(429, "", "Too Many Requests".to_string());
        assert!(err.is_quota_exhausted());
    }

    #[test]
    fn test_quota_classification_by_substring() {
        for body in [
            "RESOURCE_EXHAUSTED: try again later",
            "You exceeded your current quota",
            "upstream returned 429",
        ] {
            let err = ProviderError::from_status(400, body, body.to_string());
            assert!(err.is_quota_exhausted(), "{body} should be quota");
        }
    }

    #[test]
    fn test_quota_substring_is_case_sensitive() {
        let err = ProviderError::from_status(500, "resource_exhausted", "x".to_string());
        assert!(!err.is_quota_exhausted());
    }

    #[test]
    fn test_server_error_is_not_quota() {
        let err = ProviderError::from_status(500, "500 Internal", "500 Internal".to_string());
        assert!(!err.is_quota_exhausted());
        assert_eq!(err.client_message(), "500 Internal");
    }

    #[tokio::test]
    async fn test_primary_success_does_not_touch_secondary() {
        let backend = Arc::new(ScriptedBackend::default().with("primary", Reply::Text("halo")));
        let client = ProviderClient::new(backend.clone());

        let result = client.generate("p", "s", &creds()).await.unwrap();

        assert_eq!(result.text, "halo");
        assert!(!result.used_fallback);
        assert_eq!(backend.calls(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_resource_exhausted_fails_over_exactly_once() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .with(
                    "primary",
                    Reply::Fail {
                        status: 400,
                        body: "RESOURCE_EXHAUSTED",
                    },
                )
                .with("secondary", Reply::Text("dari cadangan")),
        );
        let client = ProviderClient::new(backend.clone());

        let result = client.generate("p", "s", &creds()).await.unwrap();

        assert_eq!(result.text, "dari cadangan");
        assert!(result.used_fallback);
        assert_eq!(backend.calls(), vec!["primary", "secondary"]);
    }

    #[tokio::test]
    async fn test_non_quota_error_skips_secondary() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .with(
                    "primary",
                    Reply::Fail {
                        status: 500,
                        body: "500 Internal",
                    },
                )
                .with("secondary", Reply::Text("unused")),
        );
        let client = ProviderClient::new(backend.clone());

        let err = client.generate("p", "s", &creds()).await.unwrap_err();

        assert!(matches!(err, ProviderError::Api { status: 500, .. }));
        assert_eq!(backend.calls(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_secondary_failure_is_propagated_without_further_retries() {
        let backend = Arc::new(
            ScriptedBackend::default()
                .with(
                    "primary",
                    Reply::Fail {
                        status: 429,
                        body: "quota",
                    },
                )
                .with(
                    "secondary",
                    Reply::Fail {
                        status: 429,
                        body: "quota",
                    },
                ),
        );
        let client = ProviderClient::new(backend.clone());

        let err = client.generate("p", "s", &creds()).await.unwrap_err();

        assert!(err.is_quota_exhausted());
        assert_eq!(backend.calls(), vec!["primary", "secondary"]);
    }

    #[tokio::test]
    async fn test_quota_without_secondary_key_is_fatal() {
        let backend = Arc::new(ScriptedBackend::default().with(
            "primary",
            Reply::Fail {
                status: 429,
                body: "quota",
            },
        ));
        let client = ProviderClient::new(backend.clone());
        let creds = ProviderCredentialSet::new("primary".to_string(), None);

        let err = client.generate("p", "s", &creds).await.unwrap_err();

        assert!(err.is_quota_exhausted());
        assert_eq!(backend.calls(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_empty_output_becomes_sentinel() {
        let backend = Arc::new(ScriptedBackend::default().with("primary", Reply::Empty));
        let client = ProviderClient::new(backend);

        let result = client.generate("p", "s", &creds()).await.unwrap();

        assert_eq!(result.text, NO_OUTPUT_GENERATED);
        assert!(!result.used_fallback);
    }
}
