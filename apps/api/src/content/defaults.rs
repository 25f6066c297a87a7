//! Fallback catalog — curated ideas and captions served when the model's output
//! (or the model itself) gives us nothing usable.

use crate::content::extraction::{default_cta, topic_hashtags, MAX_HASHTAGS};
use crate::content::models::{
    CaptionLength, ContentGoal, ContentRequest, ParsedCaption, ParsedIdea, Tone,
};

pub const DEFAULT_PLATFORM: &str = "Media Sosial";

const BASE_HASHTAGS: &[&str] = &["#umkm", "#usahalokalis", "#supportlokal", "#umkmindonesia"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum BusinessCategory {
    Food,
    Fashion,
    Other,
}

fn business_category(business_type: Option<&str>) -> BusinessCategory {
    let business = business_type.unwrap_or_default().to_lowercase();
    if ["makan", "kuliner", "minum"].iter().any(|k| business.contains(k)) {
        BusinessCategory::Food
    } else if ["fashion", "baju", "pakaian"].iter().any(|k| business.contains(k)) {
        BusinessCategory::Fashion
    } else {
        BusinessCategory::Other
    }
}

fn idea(title: &str, description: &str, platform: &str, format: &str, confidence: f64) -> ParsedIdea {
    ParsedIdea {
        title: title.to_string(),
        description: description.to_string(),
        platform: platform.to_string(),
        format: format.to_string(),
        confidence,
    }
}

/// Idea set chosen by business category and goal; generic ideas otherwise.
pub fn default_ideas(request: &ContentRequest) -> Vec<ParsedIdea> {
    let platform = request.platform().unwrap_or(DEFAULT_PLATFORM);
    let on = |name: &str| platform.eq_ignore_ascii_case(name);

    match (business_category(request.business_type()), request.goal) {
        (BusinessCategory::Food, ContentGoal::Jualan) => vec![
            idea(
                "Behind The Scene Masak",
                "Tunjukkan proses pembuatan makanan dari awal sampai jadi. Bikin video 15-30 detik dengan ASMR suara masakan.",
                platform,
                if on("TikTok") { "Video Pendek" } else { "Reels" },
                0.89,
            ),
            idea(
                "Review Pelanggan Real Time",
                "Posting foto makanan yang lagi dimakan pelanggan + caption testimoninya. Authentic dan build trust.",
                platform,
                if on("Instagram") { "Feed Post" } else { "Story" },
                0.85,
            ),
            idea(
                "Menu Harian + Harga",
                "Bikin carousel atau slide menu hari ini lengkap dengan harga. Tambah 'Pesan sekarang sebelum kehabisan'.",
                platform,
                "Carousel",
                0.92,
            ),
        ],
        (BusinessCategory::Food, ContentGoal::BrandAwareness) => vec![
            idea(
                "Cerita Awal Usaha",
                "Share story kenapa mulai usaha makanan ini. Personal touch yang bikin orang relate dan ingat brand.",
                platform,
                "Story Series",
                0.87,
            ),
            idea(
                "Tips Masak Simple",
                "Kasih tips masak sederhana yang relate dengan produk. Positioning sebagai ahli di bidang kuliner.",
                platform,
                "Educational Post",
                0.83,
            ),
            idea(
                "Bahan Berkualitas",
                "Showcase bahan-bahan segar yang dipakai. Highlight commitment terhadap kualitas dan kesehatan.",
                platform,
                "Video/Photo",
                0.88,
            ),
        ],
        (BusinessCategory::Fashion, ContentGoal::Jualan) => vec![
            idea(
                "OOTD dengan Produk",
                "Bikin OOTD pakai produk yang dijual. Show different styling untuk satu item. Relatable dan inspiring.",
                platform,
                "Reels/Video",
                0.91,
            ),
            idea(
                "Before After Styling",
                "Tunjukkan transformasi outfit dari basic ke stylish pakai produk. Highlight versatility produk.",
                platform,
                "Transition Video",
                0.86,
            ),
            idea(
                "Flash Sale Countdown",
                "Bikin urgency dengan countdown timer untuk flash sale. Tampilkan best seller items dengan discount.",
                platform,
                "Story/Post",
                0.89,
            ),
        ],
        _ => {
            let business = request.business_type().unwrap_or("usaha");
            vec![
                idea(
                    "Konten Engaging Harian",
                    &format!(
                        "Buat konten {} yang sesuai dengan {} Anda. Fokus pada value dan engagement pelanggan.",
                        request.goal.label().to_lowercase(),
                        business
                    ),
                    platform,
                    "Multi Format",
                    0.75,
                ),
                idea(
                    "User Generated Content",
                    "Ajak pelanggan untuk share experience mereka. Repost dengan credit untuk build community.",
                    platform,
                    "UGC",
                    0.82,
                ),
                idea(
                    "Educational Content",
                    "Share knowledge atau tips yang relate dengan industri Anda. Build authority dan trust.",
                    platform,
                    "Educational",
                    0.79,
                ),
            ]
        }
    }
}

struct ToneStyle {
    intro: &'static str,
    emoji: [&'static str; 3],
}

fn tone_style(tone: Tone) -> ToneStyle {
    match tone {
        Tone::Friendly => ToneStyle {
            intro: "Halo teman-teman! 👋",
            emoji: ["😊", "✨", "🎉"],
        },
        Tone::Professional => ToneStyle {
            intro: "Selamat pagi,",
            emoji: ["📋", "💼", "🏆"],
        },
        Tone::Enthusiastic => ToneStyle {
            intro: "Wohoo! 🎉",
            emoji: ["🔥", "💪", "⚡"],
        },
        Tone::Casual => ToneStyle {
            intro: "Hey guys!",
            emoji: ["😄", "🤙", "🎈"],
        },
    }
}

/// Template caption built from tone and length, with base + topic hashtags.
pub fn default_caption(request: &ContentRequest) -> ParsedCaption {
    let topic = request.topic().unwrap_or("produk kami");
    let style = tone_style(request.tone.unwrap_or_default());
    let [first, second, _] = style.emoji;

    let caption = match request.length.unwrap_or_default() {
        CaptionLength::Short => format!(
            "{intro}\n\n{topic} nih! Gimana menurut kalian? {first}\n\nYuk share pengalaman kalian di komen! 👇",
            intro = style.intro,
        ),
        CaptionLength::Medium => format!(
            "{intro}\n\nHari ini mau sharing tentang {topic}. Sebagai pelaku UMKM, aku selalu berusaha memberikan yang terbaik untuk kalian semua.\n\n{topic} ini special banget karena dibuat dengan penuh perhatian dan kualitas terjaga. Kalian pasti suka deh! {second}\n\nAda yang penasaran? Drop pertanyaan di komen ya! 💬",
            intro = style.intro,
        ),
        CaptionLength::Long => format!(
            "{intro}\n\nMau cerita nih tentang {topic}. Jadi, journey UMKM ini gak pernah mudah, tapi setiap hari selalu ada pembelajaran baru.\n\n{topic} yang aku tawarkan ini hasil dari riset dan trial error yang panjang. Aku pengen banget kalian merasakan kualitas terbaik dari usaha kecil seperti aku ini.\n\nKenapa harus pilih produk UMKM? Karena di setiap pembelian kalian, ada cerita, ada perjuangan, dan ada mimpi yang kalian dukung. {all}\n\nTerima kasih buat yang udah support dari awal. Kalian luar biasa! 🙏\n\nYang belum coba, buruan sebelum kehabisan ya! ⏰",
            intro = style.intro,
            all = style.emoji.concat(),
        ),
    };

    let hashtags = BASE_HASHTAGS
        .iter()
        .map(|t| t.to_string())
        .chain(topic_hashtags(topic))
        .take(MAX_HASHTAGS)
        .collect();

    ParsedCaption {
        caption,
        hashtags,
        cta: request
            .cta()
            .map(str::to_string)
            .unwrap_or_else(default_cta),
    }
}
