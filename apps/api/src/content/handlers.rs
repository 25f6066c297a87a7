//! Axum route handlers for the content generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::content::models::{
    CaptionLength, ContentGoal, ContentRequest, ParsedCaption, ParsedIdea, Product, Tone,
};
use crate::errors::AppError;
use crate::instructions::InstructionSelector;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, alias = "systemInstructionFile")]
    pub instructions_file: Option<String>,
    #[serde(default)]
    pub content_goal: Option<ContentGoal>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdeasRequest {
    #[serde(flatten)]
    pub request: ContentRequest,
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Debug, Serialize)]
pub struct IdeasResponse {
    pub ideas: Vec<ParsedIdea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CaptionRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub tone: Option<Tone>,
    #[serde(default)]
    pub length: Option<CaptionLength>,
    #[serde(default)]
    pub cta: Option<String>,
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Debug, Serialize)]
pub struct CaptionResponse {
    #[serde(flatten)]
    pub caption: ParsedCaption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Sends a caller-written prompt with an instruction template and returns the
/// model's raw text.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let prompt = request.prompt.unwrap_or_default();
    let selector = InstructionSelector::from_request(
        request.instructions_file.as_deref(),
        request.content_goal.unwrap_or_default(),
    );

    let raw = state.pipeline().generate_raw(&prompt, selector).await?;

    Ok(Json(GenerateResponse {
        output: raw.output,
        warning: raw.warning,
    }))
}

/// POST /api/v1/ideas
///
/// Returns 1–4 content ideas. Bad model output never fails the request.
pub async fn handle_ideas(
    State(state): State<AppState>,
    Json(body): Json<IdeasRequest>,
) -> Result<Json<IdeasResponse>, AppError> {
    let outcome = state
        .pipeline()
        .generate_ideas(&body.request, body.product.as_ref())
        .await?;

    Ok(Json(IdeasResponse {
        ideas: outcome.ideas,
        warning: outcome.warning,
    }))
}

/// POST /api/v1/captions
///
/// Returns one caption with hashtags and CTA surfaced separately.
pub async fn handle_caption(
    State(state): State<AppState>,
    Json(body): Json<CaptionRequest>,
) -> Result<Json<CaptionResponse>, AppError> {
    let request = ContentRequest {
        goal: ContentGoal::Caption,
        topic: body.topic,
        tone: body.tone,
        length: body.length,
        cta: body.cta,
        ..Default::default()
    };

    let outcome = state
        .pipeline()
        .generate_caption(&request, body.product.as_ref())
        .await?;

    Ok(Json(CaptionResponse {
        caption: outcome.caption,
        warning: outcome.warning,
    }))
}
