use anyhow::Result;
use console::Style;

use crate::config::MemoriaConfig;
use crate::ui::render;

/// Print the timeline, one card per memory with its id.
pub fn list(config: &MemoriaConfig) -> Result<()> {
    let journal = super::open_journal(config)?;
    let memories = journal.memories();

    let dim = Style::new().dim();
    eprintln!(
        "{}",
        dim.apply_to(format!(
            "{} ({} bytes)",
            config.resolved_db_path().display(),
            journal.storage().raw_len()?
        ))
    );
    eprintln!();

    if memories.is_empty() {
        print!("{}", render::render_timeline(memories));
        return Ok(());
    }

    print!("{}", render::render_timeline_header(memories.len()));
    for record in memories {
        println!("{}", render::render_card(record));
        println!("{}", dim.apply_to(format!("id: {}", record.id)));
        println!();
    }
    Ok(())
}
