#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;

use memoria::db;
use memoria::enrichment::{AnalysisPayload, EnrichmentBackend, EnrichmentError, GeneratedImage};
use memoria::memory::journal::Journal;
use memoria::memory::storage::MemoryStorage;
use memoria::memory::types::{Enrichment, GeoPosition, MemoryRecord, Weather};

pub const STORAGE_KEY: &str = "memoria_app_data";

/// Open a fresh journal on an in-memory database.
pub fn test_journal() -> Journal {
    let conn = db::open_memory_database().unwrap();
    Journal::open(MemoryStorage::new(conn, STORAGE_KEY))
}

/// A complete record with the given id and content.
pub fn test_record(id: &str, content: &str) -> MemoryRecord {
    MemoryRecord {
        id: id.to_string(),
        content: content.to_string(),
        created_at_epoch_millis: 1_792_000_000_000,
        display_date: "19 de outubro de 2026".into(),
        display_weekday: "Segunda-feira".into(),
        display_time: "18:30".into(),
        location: None,
        weather: Weather {
            description: "Clima desconhecido".into(),
            temp: Some("N/A".into()),
        },
        enrichment: Enrichment {
            mood: "Sereno".into(),
            color_hex: "#f59e0b".into(),
            music_vibe: "Bossa nova".into(),
            tags: vec!["praia".into(), "tarde".into(), "amigos".into()],
            poetic_summary: "O sol demorou a partir.".into(),
        },
        generated_image_url: None,
    }
}

/// A well-formed analysis answer.
pub fn sunset_analysis() -> AnalysisPayload {
    AnalysisPayload {
        mood: "Nostálgico".into(),
        color_hex: "#f97316".into(),
        music_vibe: "Lo-fi ao entardecer".into(),
        tags: vec!["pôr do sol".into(), "telhado".into(), "amigos".into()],
        poetic_summary: "O céu ardeu em laranja e ficamos.".into(),
        weather_parsed: "24°C, céu limpo".into(),
    }
}

/// Which remote calls the stub was asked to make, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Weather,
    Analyze { weather: String },
    Image { mood: String, weather: String },
}

/// Scripted [`EnrichmentBackend`]. Every operation succeeds unless its
/// `fail_*` flag is set.
pub struct StubBackend {
    pub weather: String,
    pub analysis: AnalysisPayload,
    pub image: Option<GeneratedImage>,
    pub fail_weather: bool,
    pub fail_analysis: bool,
    pub fail_image: bool,
    calls: Mutex<Vec<Call>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            weather: "24°C, céu limpo, vento fraco".into(),
            analysis: sunset_analysis(),
            image: Some(GeneratedImage {
                mime_type: "image/png".into(),
                base64_data: "iVBORw0KGgo=".into(),
            }),
            fail_weather: false,
            fail_analysis: false,
            fail_image: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn failure() -> EnrichmentError {
    EnrichmentError::Api {
        status: 503,
        body: "service unavailable".into(),
    }
}

#[async_trait]
impl EnrichmentBackend for StubBackend {
    async fn fetch_weather(&self, _position: GeoPosition) -> Result<String, EnrichmentError> {
        self.record(Call::Weather);
        if self.fail_weather {
            return Err(failure());
        }
        Ok(self.weather.clone())
    }

    async fn analyze(
        &self,
        _text: &str,
        weather: &str,
        _captured_at: &str,
    ) -> Result<AnalysisPayload, EnrichmentError> {
        self.record(Call::Analyze {
            weather: weather.to_string(),
        });
        if self.fail_analysis {
            return Err(failure());
        }
        Ok(self.analysis.clone())
    }

    async fn generate_image(
        &self,
        _text: &str,
        mood: &str,
        weather: &str,
    ) -> Result<Option<GeneratedImage>, EnrichmentError> {
        self.record(Call::Image {
            mood: mood.to_string(),
            weather: weather.to_string(),
        });
        if self.fail_image {
            return Err(failure());
        }
        Ok(self.image.clone())
    }
}
