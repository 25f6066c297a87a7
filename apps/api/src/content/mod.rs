// AI content generation: prompt building, provider call, resilient output parsing.
// All provider calls go through llm_client; no direct HTTP calls here.

use thiserror::Error;

pub mod caption_parser;
pub mod defaults;
pub mod extraction;
pub mod handlers;
pub mod idea_parser;
pub mod models;
pub mod pipeline;
pub mod prompts;

/// Why strict parsing of model output failed. Always recovered locally by the
/// parsers and never returned to a caller.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object in output")]
    NoJson,

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("unexpected shape: {0}")]
    Shape(#[from] serde_json::Error),
}
