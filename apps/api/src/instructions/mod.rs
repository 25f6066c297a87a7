//! Instruction Resolver — maps a content goal (or an explicit file name) to an
//! instruction template and composes the system instruction sent to the provider.
//!
//! Lookup is basename-only: caller-supplied directory segments are dropped before
//! any path is built, so a template can never be read from outside a root.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::content::models::ContentGoal;
use crate::llm_client::prompts::BASE_SCHEMA_INSTRUCTION;

#[derive(Debug, Error)]
pub enum InstructionError {
    #[error("File instruksi tidak ditemukan")]
    NotFound { file_name: String },
}

/// What the caller asked for: an explicit template file, or a goal to map.
#[derive(Debug, Clone, Copy)]
pub enum InstructionSelector<'a> {
    File(&'a str),
    Goal(ContentGoal),
}

impl<'a> InstructionSelector<'a> {
    /// An explicit, non-blank file name wins over the goal.
    pub fn from_request(file: Option<&'a str>, goal: ContentGoal) -> Self {
        match file.map(str::trim).filter(|f| !f.is_empty()) {
            Some(file) => InstructionSelector::File(file),
            None => InstructionSelector::Goal(goal),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructionTemplate {
    pub file_name: String,
    pub text: String,
}

/// Base schema followed by the template text.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemInstruction(String);

impl SystemInstruction {
    pub fn compose(template: &InstructionTemplate) -> Self {
        let text = template.text.trim();
        if text.is_empty() {
            Self(BASE_SCHEMA_INSTRUCTION.to_string())
        } else {
            Self(format!("{BASE_SCHEMA_INSTRUCTION}\n\n{text}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct InstructionResolver {
    roots: Vec<PathBuf>,
}

impl InstructionResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Working-directory assets first, then the templates bundled with the crate.
    pub fn default_roots() -> Vec<PathBuf> {
        vec![
            PathBuf::from("assets/instructions"),
            Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/instructions"),
        ]
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub async fn resolve(
        &self,
        selector: InstructionSelector<'_>,
    ) -> Result<InstructionTemplate, InstructionError> {
        let file_name = match selector {
            InstructionSelector::File(requested) => {
                sanitize_file_name(requested).ok_or_else(|| InstructionError::NotFound {
                    file_name: requested.to_string(),
                })?
            }
            InstructionSelector::Goal(goal) => goal.template_file().to_string(),
        };

        for root in &self.roots {
            let candidate = root.join(&file_name);
            match tokio::fs::read_to_string(&candidate).await {
                Ok(text) => {
                    debug!("Loaded instruction template {}", candidate.display());
                    return Ok(InstructionTemplate { file_name, text });
                }
                Err(e) => debug!("Template not at {}: {e}", candidate.display()),
            }
        }

        Err(InstructionError::NotFound { file_name })
    }
}

/// Reduces a requested name to its final path component.
/// Backslashes count as separators so Windows-style traversal is stripped too.
pub fn sanitize_file_name(requested: &str) -> Option<String> {
    let normalized = requested.trim().replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
