//! Prompt Builder — deterministic prompt assembly from a `ContentRequest`.
//!
//! Pure: no I/O, no randomness. The same request and product always produce the
//! same bytes. Unset fields are spelled out as "generate this yourself"
//! instructions so the model always receives a complete brief.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::content::models::{ContentGoal, ContentRequest, Product};

/// Ideas prompt template.
/// Replace: {business_type}, {goal}, {platform}, {topic}, {product_block}
pub const IDEAS_PROMPT_TEMPLATE: &str = "Generate ide konten untuk UMKM dengan detail:

Jenis Usaha: {business_type}
Tujuan Konten: {goal}
Platform: {platform}
Topik: {topic}{product_block}

Berikan 3-4 ide konten yang kreatif, praktis, dan mudah dieksekusi untuk UMKM.";

/// Caption prompt template.
/// Replace: {topic}, {tone}, {length}, {cta}, {product_block}
pub const CAPTION_PROMPT_TEMPLATE: &str = "Generate caption media sosial untuk UMKM dengan detail:

Tema/Topik: {topic}
Tone: {tone}
Panjang Caption: {length}
CTA: {cta}{product_block}

Berikan caption yang menarik dan siap pakai untuk media sosial.";

const PRODUCT_BLOCK_TEMPLATE: &str = "

Detail Produk:
- Nama Produk: {name}
- Kategori: {category}
- Deskripsi: {description}
- Harga: {price}";

const AUTO_BUSINESS_TYPE: &str = "(tentukan sendiri jenis usaha UMKM yang paling relevan)";
const AUTO_PLATFORM: &str = "(pilih platform media sosial yang paling cocok)";
const AUTO_TOPIC: &str = "(bebas, pilih topik yang paling relevan)";
const AUTO_TONE: &str = "(sesuaikan otomatis dengan topik)";
const AUTO_LENGTH: &str = "(sesuaikan otomatis, maksimal 150 kata)";
const AUTO_CTA: &str = "buatkan CTA otomatis yang relevan";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid regex"));

/// Final natural-language request sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caption goal gets the caption prompt; every other goal asks for ideas.
pub fn build_prompt(request: &ContentRequest, product: Option<&Product>) -> Prompt {
    match request.goal {
        ContentGoal::Caption => build_caption_prompt(request, product),
        _ => build_ideas_prompt(request, product),
    }
}

pub fn build_ideas_prompt(request: &ContentRequest, product: Option<&Product>) -> Prompt {
    let product_block = product.map(render_product_block).unwrap_or_default();
    Prompt(fill_template(
        IDEAS_PROMPT_TEMPLATE,
        &[
            ("business_type", request.business_type().unwrap_or(AUTO_BUSINESS_TYPE)),
            ("goal", request.goal.label()),
            ("platform", request.platform().unwrap_or(AUTO_PLATFORM)),
            ("topic", request.topic().unwrap_or(AUTO_TOPIC)),
            ("product_block", &product_block),
        ],
    ))
}

pub fn build_caption_prompt(request: &ContentRequest, product: Option<&Product>) -> Prompt {
    let length = request
        .length
        .map(|l| format!("{} kata", l.word_count()))
        .unwrap_or_else(|| AUTO_LENGTH.to_string());
    let product_block = product.map(render_product_block).unwrap_or_default();

    Prompt(fill_template(
        CAPTION_PROMPT_TEMPLATE,
        &[
            ("topic", request.topic().unwrap_or(AUTO_TOPIC)),
            ("tone", request.tone.map(|t| t.descriptor()).unwrap_or(AUTO_TONE)),
            ("length", &length),
            ("cta", request.cta().unwrap_or(AUTO_CTA)),
            ("product_block", &product_block),
        ],
    ))
}

fn render_product_block(product: &Product) -> String {
    let price = format_rupiah(product.price);
    fill_template(
        PRODUCT_BLOCK_TEMPLATE,
        &[
            ("name", product.name.trim()),
            ("category", product.category.trim()),
            ("description", product.description.trim()),
            ("price", &price),
        ],
    )
}

/// Single-pass placeholder substitution. Values are inserted verbatim and never
/// re-scanned, so user text containing `{topic}` stays as typed.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Formats an amount as Indonesian Rupiah, e.g. `Rp 1.250.000`.
/// Negative or non-finite amounts render as `Rp 0`.
pub fn format_rupiah(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return "Rp 0".to_string();
    }

    let digits = (amount.round() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::{CaptionLength, Tone};

    fn ideas_request() -> ContentRequest {
        ContentRequest {
            goal: ContentGoal::Jualan,
            business_type: Some("makanan".to_string()),
            platform: Some("TikTok".to_string()),
            ..Default::default()
        }
    }

    fn kopi() -> Product {
        Product {
            name: "Kopi Susu Gula Aren".to_string(),
            category: "Minuman".to_string(),
            description: "Kopi susu segar".to_string(),
            price: 18000.0,
        }
    }

    #[test]
    fn test_same_request_same_prompt() {
        let request = ideas_request();
        let product = kopi();
        assert_eq!(
            build_prompt(&request, Some(&product)),
            build_prompt(&request, Some(&product))
        );
    }

    #[test]
    fn test_ideas_prompt_renders_fields_verbatim() {
        let prompt = build_prompt(&ideas_request(), None);
        assert!(prompt.as_str().contains("Jenis Usaha: makanan"));
        assert!(prompt.as_str().contains("Platform: TikTok"));
        assert!(prompt.as_str().contains("Tujuan Konten: Jualan / promosi produk"));
        assert!(prompt.as_str().contains("Berikan 3-4 ide konten"));
        assert!(!prompt.as_str().contains("Detail Produk"));
    }

    #[test]
    fn test_unset_fields_become_auto_instructions() {
        let prompt = build_prompt(&ContentRequest::default(), None);
        assert!(prompt.as_str().contains(AUTO_BUSINESS_TYPE));
        assert!(prompt.as_str().contains(AUTO_PLATFORM));
        assert!(prompt.as_str().contains(AUTO_TOPIC));
        assert!(!prompt.as_str().contains('{'));
    }

    #[test]
    fn test_caption_prompt_maps_tone_and_length() {
        let request = ContentRequest {
            goal: ContentGoal::Caption,
            topic: Some("Promo kopi".to_string()),
            tone: Some(Tone::Enthusiastic),
            length: Some(CaptionLength::Short),
            ..Default::default()
        };
        let prompt = build_prompt(&request, None);
        assert!(prompt.as_str().contains("Tone: Antusias & Energik"));
        assert!(prompt.as_str().contains("Panjang Caption: 75 kata"));
        assert!(prompt.as_str().contains(&format!("CTA: {AUTO_CTA}")));
    }

    #[test]
    fn test_caption_prompt_uses_user_cta() {
        let request = ContentRequest {
            goal: ContentGoal::Caption,
            cta: Some("Order via WA 0812".to_string()),
            ..Default::default()
        };
        let prompt = build_prompt(&request, None);
        assert!(prompt.as_str().contains("CTA: Order via WA 0812"));
        assert!(prompt.as_str().contains(AUTO_TONE));
        assert!(prompt.as_str().contains(AUTO_LENGTH));
    }

    #[test]
    fn test_product_block_is_appended() {
        let request = ContentRequest {
            goal: ContentGoal::Caption,
            ..Default::default()
        };
        let prompt = build_prompt(&request, Some(&kopi()));
        assert!(prompt.as_str().contains("- Nama Produk: Kopi Susu Gula Aren"));
        assert!(prompt.as_str().contains("- Harga: Rp 18.000"));
        assert!(prompt
            .as_str()
            .ends_with("Berikan caption yang menarik dan siap pakai untuk media sosial."));
    }

    #[test]
    fn test_user_text_with_braces_is_not_rescanned() {
        let request = ContentRequest {
            business_type: Some("{platform}".to_string()),
            platform: Some("Instagram".to_string()),
            ..Default::default()
        };
        let prompt = build_prompt(&request, None);
        assert!(prompt.as_str().contains("Jenis Usaha: {platform}"));
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(500.0), "Rp 500");
        assert_eq!(format_rupiah(25000.0), "Rp 25.000");
        assert_eq!(format_rupiah(1250000.0), "Rp 1.250.000");
        assert_eq!(format_rupiah(-3.0), "Rp 0");
        assert_eq!(format_rupiah(f64::NAN), "Rp 0");
    }
}
