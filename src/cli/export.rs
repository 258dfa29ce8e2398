use anyhow::Result;

use crate::config::MemoriaConfig;

/// Export the stored journal as pretty JSON to stdout.
pub fn export(config: &MemoriaConfig) -> Result<()> {
    let journal = super::open_journal(config)?;

    let json = serde_json::to_string_pretty(journal.memories())?;
    println!("{json}");

    eprintln!("Exported {} memories.", journal.memories().len());

    Ok(())
}
