//! CLI `new` command: create one memory without the interactive screens.

use anyhow::Result;

use crate::config::MemoriaConfig;
use crate::geo;
use crate::ui::render;

/// Run the creation pipeline for `text`, persist the record, and print it.
pub async fn new(config: &MemoriaConfig, text: &str) -> Result<()> {
    let mut journal = super::open_journal(config)?;
    let pipeline = super::gemini_pipeline(config)?;

    let provider = geo::provider_from_config(&config.location)?;
    let location = geo::locate(provider.as_deref()).await;
    eprintln!("{}", location.label);

    journal.start_new()?;
    let record = pipeline
        .create_and_save(&mut journal, text, &location, |phase| {
            eprintln!("{}", phase.message())
        })
        .await?;

    println!("Memory: {}", record.id);
    println!("{}", render::render_detail(&record));
    Ok(())
}
