//! CLI `reset` command: clear the stored journal after user confirmation.

use anyhow::{bail, Result};
use std::io::Write;

use crate::config::MemoriaConfig;

/// Delete the stored journal after user confirmation.
pub fn reset(config: &MemoriaConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    println!("WARNING: This will permanently delete ALL memories.");
    println!("Database: {}", db_path.display());
    print!("\nType YES to confirm: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim() != "YES" {
        bail!("reset cancelled");
    }

    let journal = super::open_journal(config)?;
    let count = journal.memories().len();
    journal.storage().clear()?;

    println!("{count} memories deleted. Journal reset complete.");
    Ok(())
}
