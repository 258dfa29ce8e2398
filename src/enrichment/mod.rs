//! Remote enrichment: weather, mood analysis, and illustration.
//!
//! [`EnrichmentBackend`] is the fallible seam to the AI service; [`gemini`]
//! provides the production implementation. [`Enricher`] wraps each of the three
//! operations in its own fallback so a failing call degrades that one value and
//! never blocks the others.

pub mod gemini;
pub mod prompts;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::memory::types::{Enrichment, GeoPosition};

/// Weather text used when the lookup fails.
pub const WEATHER_UNAVAILABLE: &str = "Dados climáticos indisponíveis";
/// Image reference used when generation fails.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://picsum.photos/800/600?blur=2";

pub const FALLBACK_MOOD: &str = "Reflexivo";
pub const FALLBACK_COLOR: &str = "#64748b";
pub const FALLBACK_MUSIC: &str = "Ambiente";
pub const FALLBACK_TAGS: [&str; 3] = ["memória", "momento", "reflexão"];
pub const FALLBACK_SUMMARY: &str = "Um momento congelado no tempo.";

const MAX_TAGS: usize = 5;
const FALLBACK_WEATHER_CHARS: usize = 20;

#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("response contained no text")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Structured analysis requested from the model. Also the source of the JSON
/// schema sent with the request, so every field here is required.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    /// One word describing the emotion.
    pub mood: String,
    /// Hex colour code representing the feeling.
    pub color_hex: String,
    /// Music genre or specific description matching the moment.
    pub music_vibe: String,
    /// Three to five keywords.
    pub tags: Vec<String>,
    /// One beautiful, poetic sentence summarizing the memory.
    pub poetic_summary: String,
    /// Short weather string extracted from the context, e.g. "24°C, Ensolarado".
    pub weather_parsed: String,
}

/// An image returned by the backend, still base64 encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64_data: String,
}

impl GeneratedImage {
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// The three remote operations behind the creation pipeline.
#[async_trait]
pub trait EnrichmentBackend: Send + Sync {
    /// Current weather near `position`, as free text.
    async fn fetch_weather(&self, position: GeoPosition) -> Result<String, EnrichmentError>;

    /// Mood, colour, music, tags, and summary for a memory.
    async fn analyze(
        &self,
        text: &str,
        weather: &str,
        captured_at: &str,
    ) -> Result<AnalysisPayload, EnrichmentError>;

    /// One illustration, or `None` when the service produced no image.
    async fn generate_image(
        &self,
        text: &str,
        mood: &str,
        weather: &str,
    ) -> Result<Option<GeneratedImage>, EnrichmentError>;
}

/// Result of the analysis step after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub enrichment: Enrichment,
    pub weather_parsed: String,
}

impl Analysis {
    /// Deterministic substitute used when the analysis call fails.
    pub fn fallback(weather: &str) -> Self {
        Self {
            enrichment: Enrichment {
                mood: FALLBACK_MOOD.into(),
                color_hex: FALLBACK_COLOR.into(),
                music_vibe: FALLBACK_MUSIC.into(),
                tags: fallback_tags(),
                poetic_summary: FALLBACK_SUMMARY.into(),
            },
            weather_parsed: fallback_weather_parsed(weather),
        }
    }

    /// Fill blank fields and clamp tags so a successful but sloppy answer still
    /// yields a complete record.
    pub fn from_payload(payload: AnalysisPayload, weather: &str) -> Self {
        let tags = normalize_tags(payload.tags);
        Self {
            enrichment: Enrichment {
                mood: or_default(payload.mood, FALLBACK_MOOD),
                color_hex: if is_hex_color(payload.color_hex.trim()) {
                    payload.color_hex.trim().to_string()
                } else {
                    FALLBACK_COLOR.into()
                },
                music_vibe: or_default(payload.music_vibe, FALLBACK_MUSIC),
                tags: if tags.is_empty() { fallback_tags() } else { tags },
                poetic_summary: or_default(payload.poetic_summary, FALLBACK_SUMMARY),
            },
            weather_parsed: match payload.weather_parsed.trim() {
                "" => fallback_weather_parsed(weather),
                parsed => parsed.to_string(),
            },
        }
    }
}

/// Wraps a backend so every operation returns a value instead of an error.
pub struct Enricher<B> {
    backend: B,
}

impl<B: EnrichmentBackend> Enricher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn weather(&self, position: GeoPosition) -> String {
        match self.backend.fetch_weather(position).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!("weather lookup returned no text");
                WEATHER_UNAVAILABLE.into()
            }
            Err(e) => {
                tracing::error!(error = %e, "weather lookup failed");
                WEATHER_UNAVAILABLE.into()
            }
        }
    }

    pub async fn analyze(&self, text: &str, weather: &str, captured_at: &str) -> Analysis {
        match self.backend.analyze(text, weather, captured_at).await {
            Ok(payload) => Analysis::from_payload(payload, weather),
            Err(e) => {
                tracing::error!(error = %e, "memory analysis failed, using fallback");
                Analysis::fallback(weather)
            }
        }
    }

    /// Data URI of the generated image, `None` if the service returned no
    /// image, or the placeholder URL if the call failed.
    pub async fn illustrate(&self, text: &str, mood: &str, weather: &str) -> Option<String> {
        match self.backend.generate_image(text, mood, weather).await {
            Ok(Some(image)) => Some(image.to_data_uri()),
            Ok(None) => {
                tracing::warn!("image generation returned no image");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "image generation failed, using placeholder");
                Some(PLACEHOLDER_IMAGE_URL.into())
            }
        }
    }
}

fn fallback_tags() -> Vec<String> {
    FALLBACK_TAGS.iter().map(|t| t.to_string()).collect()
}

fn fallback_weather_parsed(weather: &str) -> String {
    let short: String = weather.trim().chars().take(FALLBACK_WEATHER_CHARS).collect();
    if short.is_empty() {
        "N/A".into()
    } else {
        short
    }
}

fn or_default(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.into()
    } else {
        trimmed.to_string()
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(MAX_TAGS);
    for tag in tags {
        let tag = tag.trim().trim_start_matches('#').trim();
        if tag.is_empty() || out.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        out.push(tag.to_string());
        if out.len() == MAX_TAGS {
            break;
        }
    }
    out
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
