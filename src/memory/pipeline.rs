//! Creation pipeline: raw text in, complete [`MemoryRecord`] out.
//!
//! The steps run strictly in order, each feeding the next:
//!
//! 1. capture the instant and derive the pt-BR display strings
//! 2. weather lookup (skipped without coordinates)
//! 3. analysis of text + weather + instant
//! 4. image generation from text + mood + parsed weather
//! 5. assembly of the record
//!
//! Remote failures never abort the pipeline; [`Enricher`] substitutes fallback
//! values per step. A record only exists once step 5 completes.

use chrono::{DateTime, FixedOffset, Local};

use crate::enrichment::{EnrichmentBackend, Enricher};
use crate::geo::LocationSnapshot;
use crate::memory::journal::{Journal, JournalError};
use crate::memory::locale::DisplayStamp;
use crate::memory::types::{MemoryRecord, Weather};

/// Weather text used when no coordinates are available; no request is made.
pub const WEATHER_UNKNOWN: &str = "Clima desconhecido";
/// Inline message shown when a creation attempt fails.
pub const CREATION_FAILED_MESSAGE: &str = "Erro ao criar memória. Tente novamente.";

/// Progress reported to the UI while a memory is being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPhase {
    SensingAtmosphere,
    AnalyzingMoment,
    PaintingMemory,
}

impl CreationPhase {
    pub fn message(&self) -> &'static str {
        match self {
            Self::SensingAtmosphere => "Sentindo a atmosfera...",
            Self::AnalyzingMoment => "Analisando seu momento...",
            Self::PaintingMemory => "Pintando sua memória...",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("memory text must not be empty")]
    EmptyContent,
    #[error(transparent)]
    Save(#[from] JournalError),
}

pub struct CreationPipeline<B> {
    enricher: Enricher<B>,
}

impl<B: EnrichmentBackend> CreationPipeline<B> {
    pub fn new(backend: B) -> Self {
        Self {
            enricher: Enricher::new(backend),
        }
    }

    pub fn enricher(&self) -> &Enricher<B> {
        &self.enricher
    }

    /// Build a record for `text` captured now.
    pub async fn create(
        &self,
        text: &str,
        location: &LocationSnapshot,
        on_phase: impl FnMut(CreationPhase),
    ) -> Result<MemoryRecord, CreationError> {
        self.create_at(text, location, Local::now().fixed_offset(), on_phase)
            .await
    }

    /// Build a record for `text` captured at `now`.
    pub async fn create_at(
        &self,
        text: &str,
        location: &LocationSnapshot,
        now: DateTime<FixedOffset>,
        mut on_phase: impl FnMut(CreationPhase),
    ) -> Result<MemoryRecord, CreationError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(CreationError::EmptyContent);
        }

        let stamp = DisplayStamp::from_datetime(&now);

        on_phase(CreationPhase::SensingAtmosphere);
        let weather = match location.position {
            Some(position) => self.enricher.weather(position).await,
            None => {
                tracing::warn!("no location at submit time, skipping weather lookup");
                WEATHER_UNKNOWN.to_string()
            }
        };

        on_phase(CreationPhase::AnalyzingMoment);
        let analysis = self
            .enricher
            .analyze(content, &weather, &now.to_rfc3339())
            .await;

        on_phase(CreationPhase::PaintingMemory);
        let image = self
            .enricher
            .illustrate(content, &analysis.enrichment.mood, &analysis.weather_parsed)
            .await;

        let record = MemoryRecord {
            id: uuid::Uuid::now_v7().to_string(),
            content: content.to_string(),
            created_at_epoch_millis: now.timestamp_millis(),
            display_date: stamp.date,
            display_weekday: stamp.weekday,
            display_time: stamp.time,
            location: location.to_location(),
            weather: Weather {
                description: weather,
                temp: Some(analysis.weather_parsed),
            },
            enrichment: analysis.enrichment,
            generated_image_url: image,
        };

        tracing::info!(id = %record.id, mood = %record.enrichment.mood, "memory assembled");
        Ok(record)
    }

    /// Run the pipeline and hand the record to the journal. Nothing is kept if
    /// any step fails.
    pub async fn create_and_save(
        &self,
        journal: &mut Journal,
        text: &str,
        location: &LocationSnapshot,
        on_phase: impl FnMut(CreationPhase),
    ) -> Result<MemoryRecord, CreationError> {
        let record = self.create(text, location, on_phase).await?;
        journal.save_memory(record.clone())?;
        Ok(record)
    }
}
