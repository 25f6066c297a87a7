//! Caption parser — JSON `{caption | text}` first, raw text otherwise.
//! Hashtags and the CTA are resolved separately and never left inline.

use serde_json::Value;
use tracing::debug;

use crate::content::defaults::default_caption;
use crate::content::extraction::{
    default_cta, extract_cta, extract_hashtags, strip_code_fences, strip_hashtags, topic_hashtags,
};
use crate::content::models::{ContentRequest, ParsedCaption};
use crate::content::ParseError;

pub fn parse_caption(raw: &str, request: &ContentRequest) -> ParsedCaption {
    let cleaned = strip_code_fences(raw);

    let (caption_text, json_cta) = match caption_from_json(&cleaned) {
        Ok(found) => found,
        Err(reason) => {
            debug!("Caption output is not JSON ({reason}), using raw text");
            (cleaned, None)
        }
    };

    let hashtags = extract_hashtags(&caption_text)
        .unwrap_or_else(|| topic_hashtags(request.topic().unwrap_or_default()));

    let cta = request
        .cta()
        .map(str::to_string)
        .or(json_cta)
        .or_else(|| extract_cta(&caption_text))
        .unwrap_or_else(default_cta);

    let caption = match strip_hashtags(&caption_text) {
        stripped if stripped.is_empty() => {
            debug!("Caption empty after cleanup, using template caption");
            default_caption(request).caption
        }
        stripped => stripped,
    };

    ParsedCaption {
        caption,
        hashtags,
        cta,
    }
}

/// Caption text plus the model's own `cta` field when it sent one.
fn caption_from_json(cleaned: &str) -> Result<(String, Option<String>), ParseError> {
    let value: Value = serde_json::from_str(cleaned).map_err(ParseError::Shape)?;

    let text = match &value {
        Value::String(s) => s.as_str(),
        _ => value
            .get("caption")
            .and_then(Value::as_str)
            .or_else(|| value.get("text").and_then(Value::as_str))
            .ok_or(ParseError::MissingField("caption"))?,
    };

    let cta = value
        .get("cta")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Ok((text.to_string(), cta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::extraction::DEFAULT_CTAS;
    use crate::content::models::ContentGoal;

    fn request(topic: &str, cta: Option<&str>) -> ContentRequest {
        ContentRequest {
            goal: ContentGoal::Caption,
            topic: Some(topic.to_string()),
            cta: cta.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_text_hashtags_are_moved_out() {
        let parsed = parse_caption("Keripik pedas baru! #umkm #jualan", &request("keripik", None));

        assert_eq!(parsed.caption, "Keripik pedas baru!");
        assert_eq!(parsed.hashtags, vec!["#umkm", "#jualan"]);
    }

    #[test]
    fn test_fenced_json_caption_field() {
        let raw = "```json\n{\"caption\": \"Kopi baru rilis. DM kami untuk order! #kopi\"}\n```";
        let parsed = parse_caption(raw, &request("kopi", None));

        assert_eq!(parsed.caption, "Kopi baru rilis. DM kami untuk order!");
        assert_eq!(parsed.hashtags, vec!["#kopi"]);
        assert_eq!(parsed.cta, "DM kami untuk order!");
    }

    #[test]
    fn test_json_cta_field_beats_extraction() {
        let raw = r#"{"caption": "Pesan sekarang!", "cta": "Klik link di bio"}"#;
        let parsed = parse_caption(raw, &request("kue", None));
        assert_eq!(parsed.cta, "Klik link di bio");
    }

    #[test]
    fn test_json_text_field_is_accepted() {
        let parsed = parse_caption(r#"{"text": "Halo semua"}"#, &request("apa saja", None));
        assert_eq!(parsed.caption, "Halo semua");
    }

    #[test]
    fn test_no_hashtags_uses_topic_hashtags() {
        let parsed = parse_caption("Promo spesial minggu ini", &request("diskon lebaran", None));
        assert_eq!(parsed.hashtags, vec!["#promo", "#diskon", "#sale", "#murahmeriah"]);
    }

    #[test]
    fn test_user_cta_wins_over_extracted() {
        let parsed = parse_caption(
            "Pesan sekarang juga!",
            &request("kue", Some("Kunjungi toko kami di Jl. Melati")),
        );
        assert_eq!(parsed.cta, "Kunjungi toko kami di Jl. Melati");
    }

    #[test]
    fn test_default_cta_when_nothing_found() {
        let parsed = parse_caption("Selamat pagi", &request("kue", None));
        assert!(DEFAULT_CTAS.contains(&parsed.cta.as_str()));
    }

    #[test]
    fn test_empty_caption_uses_template() {
        let parsed = parse_caption(r##"{"caption": "#umkm #kue"}"##, &request("kue", None));
        assert!(!parsed.caption.is_empty());
        assert!(!parsed.caption.contains('#'));
        assert_eq!(parsed.hashtags, vec!["#umkm", "#kue"]);
    }

    #[test]
    fn test_json_without_caption_fields_keeps_raw_text() {
        let parsed = parse_caption(r#"{"judul": "x"}"#, &request("makanan", None));
        assert_eq!(parsed.caption, r#"{"judul": "x"}"#);
        assert_eq!(parsed.hashtags[0], "#kuliner");
    }

    #[test]
    fn test_json_array_output_keeps_model_text() {
        let raw = r#"["Kopi susu gula aren segar, order sekarang!"]"#;
        let parsed = parse_caption(raw, &request("kopi", None));

        assert_eq!(parsed.caption, raw);
        assert_eq!(parsed.cta, "order sekarang!");
    }
}
