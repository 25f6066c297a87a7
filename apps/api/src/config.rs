use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::{ProviderCredentialSet, GEMINI_API_BASE};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// Backup key tried once when the primary key runs out of quota.
    pub gemini_api_key_secondary: Option<String>,
    pub gemini_api_base: String,
    /// Ordered template roots. Empty means "use the built-in defaults".
    pub instruction_dirs: Vec<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_key_secondary: optional_env("GEMINI_API_KEY_SECONDARY"),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| GEMINI_API_BASE.to_string()),
            instruction_dirs: optional_env("INSTRUCTION_DIRS")
                .map(|raw| parse_dir_list(&raw))
                .unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn credentials(&self) -> ProviderCredentialSet {
        ProviderCredentialSet::new(
            self.gemini_api_key.clone(),
            self.gemini_api_key_secondary.clone(),
        )
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Blank values count as unset so an empty `GEMINI_API_KEY_SECONDARY=` in .env
/// does not enable a fallback to an empty key.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_dir_list(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
