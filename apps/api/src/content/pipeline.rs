//! Content pipeline — orchestrates one generation request end to end.
//!
//! Flow: resolve instruction → build prompt → provider call (one failover at most)
//!       → parse → extraction.
//!
//! Failures before the provider call are fatal. On the structured entry points
//! (ideas, caption) everything at or after the provider call degrades to
//! heuristic or catalog output instead.

use tracing::{debug, info, warn};

use crate::content::caption_parser::parse_caption;
use crate::content::defaults::{default_caption, default_ideas};
use crate::content::idea_parser::parse_ideas;
use crate::content::models::{ContentGoal, ContentRequest, ParsedCaption, ParsedIdea, Product};
use crate::content::prompts::build_prompt;
use crate::errors::AppError;
use crate::instructions::{InstructionResolver, InstructionSelector, SystemInstruction};
use crate::llm_client::{
    ProviderClient, ProviderCredentialSet, ProviderResult, FALLBACK_WARNING, NO_OUTPUT_GENERATED,
};

pub const IDEAS_DEGRADED_WARNING: &str =
    "AI sedang tidak tersedia, menampilkan contoh ide konten sebagai gantinya.";
pub const CAPTION_DEGRADED_WARNING: &str =
    "AI sedang tidak tersedia, menampilkan contoh caption sebagai gantinya.";

/// Everything a generation run needs. Borrowed from `AppState` per request.
#[derive(Clone, Copy)]
pub struct Pipeline<'a> {
    pub provider: &'a ProviderClient,
    pub resolver: &'a InstructionResolver,
    pub credentials: &'a ProviderCredentialSet,
}

#[derive(Debug, Clone)]
pub struct RawGeneration {
    pub output: String,
    pub warning: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IdeasOutcome {
    pub ideas: Vec<ParsedIdea>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CaptionOutcome {
    pub caption: ParsedCaption,
    pub warning: Option<String>,
}

impl<'a> Pipeline<'a> {
    /// Prompt + instruction file in, raw model text out. Provider errors are fatal here.
    pub async fn generate_raw(
        &self,
        prompt: &str,
        selector: InstructionSelector<'_>,
    ) -> Result<RawGeneration, AppError> {
        if prompt.trim().is_empty() {
            return Err(AppError::EmptyPrompt);
        }

        let system = self.system_instruction(selector).await?;
        let result = self
            .provider
            .generate(prompt, system.as_str(), self.credentials)
            .await?;

        Ok(RawGeneration {
            warning: fallback_warning(&result),
            output: result.text,
        })
    }

    /// A caption goal is treated like an unknown goal and mapped to the default.
    pub async fn generate_ideas(
        &self,
        request: &ContentRequest,
        product: Option<&Product>,
    ) -> Result<IdeasOutcome, AppError> {
        let normalized;
        let request = if request.goal == ContentGoal::Caption {
            debug!("Caption goal on the ideas path, using the default goal");
            normalized = ContentRequest {
                goal: ContentGoal::default(),
                ..request.clone()
            };
            &normalized
        } else {
            request
        };

        let system = self
            .system_instruction(InstructionSelector::Goal(request.goal))
            .await?;
        let prompt = build_prompt(request, product);

        info!(
            "Generating ideas: goal={}, platform={:?}",
            request.goal.id(),
            request.platform()
        );

        match self
            .provider
            .generate(prompt.as_str(), system.as_str(), self.credentials)
            .await
        {
            Ok(result) => Ok(IdeasOutcome {
                ideas: parse_ideas(model_text(&result), request),
                warning: fallback_warning(&result),
            }),
            Err(e) => {
                warn!("Idea generation failed, serving default ideas: {e}");
                Ok(IdeasOutcome {
                    ideas: default_ideas(request),
                    warning: Some(IDEAS_DEGRADED_WARNING.to_string()),
                })
            }
        }
    }

    /// The request's goal is ignored: captions always use the caption template and prompt.
    pub async fn generate_caption(
        &self,
        request: &ContentRequest,
        product: Option<&Product>,
    ) -> Result<CaptionOutcome, AppError> {
        let request = ContentRequest {
            goal: ContentGoal::Caption,
            ..request.clone()
        };
        let system = self
            .system_instruction(InstructionSelector::Goal(ContentGoal::Caption))
            .await?;
        let prompt = build_prompt(&request, product);

        info!("Generating caption: topic={:?}", request.topic());

        match self
            .provider
            .generate(prompt.as_str(), system.as_str(), self.credentials)
            .await
        {
            Ok(result) => {
                let caption = match model_text(&result) {
                    "" => default_caption(&request),
                    text => parse_caption(text, &request),
                };
                Ok(CaptionOutcome {
                    caption,
                    warning: fallback_warning(&result),
                })
            }
            Err(e) => {
                warn!("Caption generation failed, serving template caption: {e}");
                Ok(CaptionOutcome {
                    caption: default_caption(&request),
                    warning: Some(CAPTION_DEGRADED_WARNING.to_string()),
                })
            }
        }
    }

    async fn system_instruction(
        &self,
        selector: InstructionSelector<'_>,
    ) -> Result<SystemInstruction, AppError> {
        let template = self.resolver.resolve(selector).await?;
        Ok(SystemInstruction::compose(&template))
    }
}

/// The no-output sentinel is for raw callers; parsers treat it as empty output.
fn model_text(result: &ProviderResult) -> &str {
    if result.text == NO_OUTPUT_GENERATED {
        ""
    } else {
        &result.text
    }
}

fn fallback_warning(result: &ProviderResult) -> Option<String> {
    result.used_fallback.then(|| FALLBACK_WARNING.to_string())
}
