pub mod export;
pub mod list;
pub mod new;
pub mod reset;
pub mod show;

use anyhow::Result;

use crate::config::MemoriaConfig;
use crate::enrichment::gemini::GeminiClient;
use crate::geo;
use crate::memory::journal::Journal;
use crate::memory::pipeline::CreationPipeline;
use crate::memory::storage::MemoryStorage;
use crate::ui;

/// Open the configured database and load the journal from it.
pub fn open_journal(config: &MemoriaConfig) -> Result<Journal> {
    let db_path = config.resolved_db_path();
    let conn = crate::db::open_database(&db_path)?;
    Ok(Journal::open(MemoryStorage::new(conn, &config.storage.key)))
}

/// Creation pipeline backed by the Gemini REST API.
pub fn gemini_pipeline(config: &MemoriaConfig) -> Result<CreationPipeline<GeminiClient>> {
    Ok(CreationPipeline::new(GeminiClient::new(&config.gemini)?))
}

/// Start the interactive journal.
pub async fn app(config: &MemoriaConfig) -> Result<()> {
    let mut journal = open_journal(config)?;
    let pipeline = gemini_pipeline(config)?;

    let provider = geo::provider_from_config(&config.location)?;
    let location = ui::app::acquire_location(provider.as_deref()).await;

    ui::app::run(&mut journal, &pipeline, &location).await
}
