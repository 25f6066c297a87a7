//! Extraction helpers — hashtag, call-to-action and topic inference over free text.
//!
//! Used both as heuristics inside the parsers and as fallback generators when the
//! model's output yields nothing usable.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use regex::Regex;

pub const MAX_HASHTAGS: usize = 8;

static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").expect("valid regex"));
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:json)?\n?").expect("valid regex"));
static EXTRA_SPACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));

/// Tried in order; the first pattern with any match decides.
static CTA_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:hubungi|dm|chat|pesan|order|kunjungi|follow|share|tag|comment|like|save)[^.!?]*[.!?]",
        r"💬[^.!?\n]+",
        r"📞[^.!?\n]+",
        r"🛒[^.!?\n]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// (keywords, hashtags) per topic category, checked in order.
const TOPIC_HASHTAG_GROUPS: &[(&[&str], &[&str])] = &[
    (
        &["makanan", "makan", "kuliner"],
        &["#kuliner", "#makananhalal", "#foodie", "#jajan"],
    ),
    (
        &["fashion", "baju", "style"],
        &["#fashion", "#ootd", "#style", "#bajumurah"],
    ),
    (
        &["promo", "diskon", "sale"],
        &["#promo", "#diskon", "#sale", "#murahmeriah"],
    ),
];

const GENERIC_HASHTAGS: &[&str] = &["#produklokal", "#kualitasterjamin", "#trusted", "#recommended"];

pub const DEFAULT_CTAS: &[&str] = &[
    "💬 DM untuk info lebih lanjut!",
    "📞 Hubungi kami: 081234567890",
    "🛒 Pesan sekarang sebelum kehabisan!",
    "💌 Chat WA untuk fast respon!",
    "🏪 Kunjungi toko kami atau order online!",
];

/// Up to eight `#word` tokens in first-seen order, duplicates dropped.
/// `None` when the text has no hashtags at all.
pub fn extract_hashtags(text: &str) -> Option<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    for m in HASHTAG_RE.find_iter(text) {
        if tags.len() == MAX_HASHTAGS {
            break;
        }
        if !tags.iter().any(|t| t == m.as_str()) {
            tags.push(m.as_str().to_string());
        }
    }
    (!tags.is_empty()).then_some(tags)
}

/// Removes inline hashtags and tidies the whitespace they leave behind.
pub fn strip_hashtags(text: &str) -> String {
    let without_tags = HASHTAG_RE.replace_all(text, "");
    without_tags
        .lines()
        .map(|line| EXTRA_SPACES_RE.replace_all(line, " ").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// CTAs usually close a caption, so the last match of the first matching
/// pattern wins.
pub fn extract_cta(text: &str) -> Option<String> {
    CTA_PATTERNS.iter().find_map(|pattern| {
        pattern
            .find_iter(text)
            .last()
            .map(|m| m.as_str().trim().to_string())
            .filter(|cta| !cta.is_empty())
    })
}

/// Hashtags for the first category whose keyword appears in the topic.
pub fn topic_hashtags(topic: &str) -> Vec<String> {
    let topic = topic.to_lowercase();
    TOPIC_HASHTAG_GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| topic.contains(k)))
        .map(|(_, tags)| *tags)
        .unwrap_or(GENERIC_HASHTAGS)
        .iter()
        .map(|t| t.to_string())
        .collect()
}

pub fn default_cta() -> String {
    DEFAULT_CTAS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_CTAS[0])
        .to_string()
}

/// Drops every Markdown code-fence delimiter, wherever it appears.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE_RE.replace_all(text, "").trim().to_string()
}
