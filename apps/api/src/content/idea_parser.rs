//! Idea parser — turns raw model output into 1–4 `ParsedIdea`s.
//!
//! Strategy: strict JSON first (`{"ide_konten": [...]}`), then line heuristics,
//! then the fallback catalog. Never fails.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::content::defaults::{default_ideas, DEFAULT_PLATFORM};
use crate::content::models::{ContentRequest, ParsedIdea};
use crate::content::ParseError;

pub const MAX_IDEAS: usize = 4;
pub const SYNTHETIC_TITLE: &str = "AI Generated Content";
const SYNTHETIC_DESCRIPTION_CHARS: usize = 200;
const SYNTHETIC_CONFIDENCE: f64 = 0.75;

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid regex"));
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[•\-*]").expect("valid regex"));
static IDEA_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:ide|idea)\b").expect("valid regex"));
/// Markdown horizontal rules such as `---` or `***`.
static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\-*_=•]+$").expect("valid regex"));
/// Markdown heading/emphasis, then numbering or a bullet.
static TITLE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[#*\s]*(?:\d+\.\s*|[•\-*]\s*)?").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct IdeaEnvelope {
    ide_konten: Vec<RawIdea>,
}

#[derive(Debug, Deserialize)]
struct RawIdea {
    #[serde(default)]
    hook: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    visual: Option<String>,
    #[serde(default)]
    cta: Option<String>,
}

pub fn parse_ideas(raw: &str, request: &ContentRequest) -> Vec<ParsedIdea> {
    let platform = request.platform().unwrap_or(DEFAULT_PLATFORM);

    let mut ideas = match parse_strict(raw, platform) {
        Ok(ideas) => ideas,
        Err(reason) => {
            debug!("Strict idea parse failed ({reason}), falling back to line heuristics");
            parse_lines(raw, platform)
        }
    };
    ideas.truncate(MAX_IDEAS);

    if ideas.is_empty() {
        warn!("No ideas recovered from model output, serving default idea set");
        let mut defaults = default_ideas(request);
        defaults.truncate(MAX_IDEAS);
        return defaults;
    }

    ideas
}

fn parse_strict(raw: &str, platform: &str) -> Result<Vec<ParsedIdea>, ParseError> {
    let mut last_error = ParseError::NoJson;

    for candidate in json_candidates(raw) {
        match serde_json::from_str::<IdeaEnvelope>(candidate) {
            Ok(envelope) => {
                let mut rng = rand::thread_rng();
                return Ok(envelope
                    .ide_konten
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| idea_from_raw(i, item, platform, rng.gen_range(0.85..0.95)))
                    .collect());
            }
            Err(e) => last_error = ParseError::Shape(e),
        }
    }

    Err(last_error)
}

fn idea_from_raw(index: usize, item: RawIdea, platform: &str, confidence: f64) -> ParsedIdea {
    let present = |field: &Option<String>| {
        field
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let format = present(&item.format);
    let mut description_parts: Vec<String> = Vec::new();
    description_parts.extend(format.clone());
    description_parts.extend(present(&item.visual));
    description_parts.extend(present(&item.cta).map(|cta| format!("CTA: {cta}")));

    ParsedIdea {
        title: present(&item.hook).unwrap_or_else(|| format!("Ide Konten {}", index + 1)),
        description: description_parts.join("\n\n"),
        platform: platform.to_string(),
        format: format.unwrap_or_else(|| "Social Media Post".to_string()),
        confidence,
    }
}

/// Greedy span from the first `{` to the last `}`, then the first balanced
/// object if it differs. When the model echoes an example object before its real
/// answer, the first balanced object is the example: a known limitation.
fn json_candidates(raw: &str) -> Vec<&str> {
    let mut candidates = Vec::new();

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            candidates.push(&raw[start..=end]);
        }
    }
    if let Some(balanced) = first_balanced_object(raw) {
        if !candidates.contains(&balanced) {
            candidates.push(balanced);
        }
    }

    candidates
}

fn first_balanced_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

fn is_idea_start(line: &str) -> bool {
    NUMBERED_RE.is_match(line) || BULLET_RE.is_match(line) || IDEA_WORD_RE.is_match(line)
}

fn clean_title(line: &str) -> String {
    TITLE_PREFIX_RE
        .replace(line, "")
        .trim()
        .trim_matches('*')
        .trim()
        .to_string()
}

fn parse_lines(raw: &str, platform: &str) -> Vec<ParsedIdea> {
    let mut rng = rand::thread_rng();
    let mut ideas: Vec<ParsedIdea> = Vec::new();
    let mut current: Option<ParsedIdea> = None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if RULE_RE.is_match(line) {
            continue;
        }
        if is_idea_start(line) {
            let title = clean_title(line);
            if title.is_empty() {
                continue;
            }
            ideas.extend(current.take());
            current = Some(ParsedIdea {
                title,
                description: String::new(),
                platform: platform.to_string(),
                format: "Social Media Content".to_string(),
                confidence: rng.gen_range(0.80..0.95),
            });
        } else if let Some(idea) = current.as_mut() {
            if !idea.description.is_empty() {
                idea.description.push('\n');
            }
            idea.description.push_str(line);
        }
    }
    ideas.extend(current);

    if ideas.is_empty() && !raw.trim().is_empty() {
        ideas.push(ParsedIdea {
            title: SYNTHETIC_TITLE.to_string(),
            description: truncate_chars(raw.trim(), SYNTHETIC_DESCRIPTION_CHARS),
            platform: platform.to_string(),
            format: "AI Content".to_string(),
            confidence: SYNTHETIC_CONFIDENCE,
        });
    }

    ideas
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
