//! Core journal type definitions.
//!
//! Defines [`MemoryRecord`] (one persisted journal entry) and the pieces it is
//! assembled from: [`Location`], [`Weather`], and [`Enrichment`]. Serialized
//! field names are camelCase so stored blobs keep the layout the journal has
//! always used.

use serde::{Deserialize, Serialize};

/// Device coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

/// Where a memory was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    /// Display label, e.g. `"-23.551, -46.633"`.
    pub text: String,
}

/// Weather at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Free-text description from the weather lookup, or a fixed fallback.
    pub description: String,
    /// Short temperature/condition string, e.g. `"24°C, Ensolarado"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<String>,
}

/// AI-derived metadata attached to a memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    /// One word describing the emotion.
    pub mood: String,
    /// Representative colour as `#rrggbb` (or `#rgb`).
    pub color_hex: String,
    /// Music genre or vibe matching the moment.
    pub music_vibe: String,
    /// Topical keywords, at most five.
    pub tags: Vec<String>,
    /// One poetic sentence summarizing the memory.
    pub poetic_summary: String,
}

/// A journal entry, exactly as persisted in the storage blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// UUID v7 (time-sortable), immutable.
    pub id: String,
    /// The user's text, never empty.
    pub content: String,
    /// Capture instant in milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub created_at_epoch_millis: i64,
    /// e.g. `"19 de outubro de 2026"`.
    #[serde(rename = "dateFormatted")]
    pub display_date: String,
    /// e.g. `"Segunda-feira"`.
    #[serde(rename = "dayOfWeek")]
    pub display_weekday: String,
    /// e.g. `"14:05"`.
    #[serde(rename = "time")]
    pub display_time: String,
    /// Absent when geolocation failed or was unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub weather: Weather,
    pub enrichment: Enrichment,
    /// Data URI or remote URL of the illustration.
    #[serde(
        rename = "generatedImageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_image_url: Option<String>,
}
