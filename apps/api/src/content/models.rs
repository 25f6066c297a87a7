use serde::{Deserialize, Serialize};

/// Marketing intent behind a generation request. Drives template selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ContentGoal {
    #[default]
    Jualan,
    BrandAwareness,
    Edukasi,
    Testimoni,
    BehindScene,
    Caption,
}

impl ContentGoal {
    pub const ALL: [ContentGoal; 6] = [
        ContentGoal::Jualan,
        ContentGoal::BrandAwareness,
        ContentGoal::Edukasi,
        ContentGoal::Testimoni,
        ContentGoal::BehindScene,
        ContentGoal::Caption,
    ];

    /// Unknown ids fall back to the default goal.
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "jualan" => ContentGoal::Jualan,
            "brand_awareness" => ContentGoal::BrandAwareness,
            "edukasi" => ContentGoal::Edukasi,
            "testimoni" => ContentGoal::Testimoni,
            "behind_scene" => ContentGoal::BehindScene,
            "caption" => ContentGoal::Caption,
            _ => ContentGoal::default(),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ContentGoal::Jualan => "jualan",
            ContentGoal::BrandAwareness => "brand_awareness",
            ContentGoal::Edukasi => "edukasi",
            ContentGoal::Testimoni => "testimoni",
            ContentGoal::BehindScene => "behind_scene",
            ContentGoal::Caption => "caption",
        }
    }

    /// Human-readable label used inside prompts.
    pub fn label(self) -> &'static str {
        match self {
            ContentGoal::Jualan => "Jualan / promosi produk",
            ContentGoal::BrandAwareness => "Brand awareness",
            ContentGoal::Edukasi => "Edukasi",
            ContentGoal::Testimoni => "Testimoni pelanggan",
            ContentGoal::BehindScene => "Behind the scene",
            ContentGoal::Caption => "Caption media sosial",
        }
    }

    pub fn template_file(self) -> &'static str {
        match self {
            ContentGoal::Jualan => "promosi-jualan-harian.md",
            ContentGoal::BrandAwareness => "brand-awareness.md",
            ContentGoal::Edukasi => "edukasi.md",
            ContentGoal::Testimoni => "review.md",
            ContentGoal::BehindScene => "bts.md",
            ContentGoal::Caption => "caption.md",
        }
    }
}

impl From<String> for ContentGoal {
    fn from(id: String) -> Self {
        ContentGoal::from_id(&id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Tone {
    #[default]
    Friendly,
    Professional,
    Enthusiastic,
    Casual,
}

impl Tone {
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "friendly" => Tone::Friendly,
            "professional" => Tone::Professional,
            "enthusiastic" => Tone::Enthusiastic,
            "casual" => Tone::Casual,
            _ => Tone::default(),
        }
    }

    pub fn descriptor(self) -> &'static str {
        match self {
            Tone::Friendly => "Ramah & Santai",
            Tone::Professional => "Profesional",
            Tone::Enthusiastic => "Antusias & Energik",
            Tone::Casual => "Kasual & Menghibur",
        }
    }
}

impl From<String> for Tone {
    fn from(id: String) -> Self {
        Tone::from_id(&id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CaptionLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl CaptionLength {
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "short" => CaptionLength::Short,
            "medium" => CaptionLength::Medium,
            "long" => CaptionLength::Long,
            _ => CaptionLength::default(),
        }
    }

    pub fn word_count(self) -> u32 {
        match self {
            CaptionLength::Short => 75,
            CaptionLength::Medium => 150,
            CaptionLength::Long => 250,
        }
    }
}

impl From<String> for CaptionLength {
    fn from(id: String) -> Self {
        CaptionLength::from_id(&id)
    }
}

/// One user action's worth of generation input. Built once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    #[serde(default, alias = "contentGoal")]
    pub goal: ContentGoal,
    pub business_type: Option<String>,
    pub platform: Option<String>,
    pub topic: Option<String>,
    pub tone: Option<Tone>,
    pub length: Option<CaptionLength>,
    pub cta: Option<String>,
}

impl ContentRequest {
    pub fn business_type(&self) -> Option<&str> {
        non_blank(&self.business_type)
    }

    pub fn platform(&self) -> Option<&str> {
        non_blank(&self.platform)
    }

    pub fn topic(&self) -> Option<&str> {
        non_blank(&self.topic)
    }

    pub fn cta(&self) -> Option<&str> {
        non_blank(&self.cta)
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Catalog product passed in by the caller as prompt context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIdea {
    pub title: String,
    pub description: String,
    pub platform: String,
    pub format: String,
    /// 0.0 – 1.0
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCaption {
    pub caption: String,
    /// 1 – 8 tags, each including the leading `#`.
    pub hashtags: Vec<String>,
    pub cta: String,
}
