//! Interactive terminal journal: list, create, and view screens driven by a
//! single [`Journal`].

use anyhow::Result;
use chrono::Local;
use console::{Style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::enrichment::EnrichmentBackend;
use crate::geo::{self, GeoProvider, LocationSnapshot};
use crate::memory::journal::{Journal, Screen};
use crate::memory::locale::format_time;
use crate::memory::pipeline::{CreationPipeline, CREATION_FAILED_MESSAGE};
use crate::ui::render;

/// Resolve the session location once, with a spinner while waiting.
pub async fn acquire_location(provider: Option<&dyn GeoProvider>) -> LocationSnapshot {
    let spinner = spinner(geo::LOCATING_LABEL);
    let snapshot = geo::locate(provider).await;
    spinner.finish_and_clear();
    snapshot
}

/// Run the journal until the user quits from the list screen.
pub async fn run<B: EnrichmentBackend>(
    journal: &mut Journal,
    pipeline: &CreationPipeline<B>,
    location: &LocationSnapshot,
) -> Result<()> {
    let term = Term::stdout();
    let theme = ColorfulTheme::default();

    loop {
        term.clear_screen()?;
        match journal.screen() {
            Screen::List => {
                if !list_screen(journal, &theme)? {
                    break;
                }
            }
            Screen::Create => create_screen(journal, pipeline, location, &theme).await?,
            Screen::View => view_screen(journal, &theme)?,
        }
    }

    Ok(())
}

/// Returns `false` when the user chose to quit.
fn list_screen(journal: &mut Journal, theme: &ColorfulTheme) -> Result<bool> {
    println!("{}", render::render_timeline(journal.memories()));

    let mut items = vec!["+ Nova Memória".to_string()];
    items.extend(journal.memories().iter().map(render::card_title));
    items.push("Sair".to_string());

    let choice = Select::with_theme(theme)
        .with_prompt("Memória")
        .items(&items)
        .default(0)
        .interact_opt()?;

    match choice {
        Some(0) => journal.start_new()?,
        Some(i) if i < items.len() - 1 => {
            let id = journal.memories()[i - 1].id.clone();
            journal.select(&id)?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

async fn create_screen<B: EnrichmentBackend>(
    journal: &mut Journal,
    pipeline: &CreationPipeline<B>,
    location: &LocationSnapshot,
    theme: &ColorfulTheme,
) -> Result<()> {
    println!(
        "{}",
        render::render_form_header(&location.label, &format_time(&Local::now()))
    );

    let text: String = Input::with_theme(theme)
        .with_prompt(render::FORM_PLACEHOLDER)
        .allow_empty(true)
        .interact_text()?;

    if text.trim().is_empty()
        || !Confirm::with_theme(theme)
            .with_prompt("Salvar Memória?")
            .default(true)
            .interact()?
    {
        journal.cancel()?;
        return Ok(());
    }

    let progress = spinner("");
    let result = pipeline
        .create_and_save(journal, &text, location, |phase| {
            progress.set_message(phase.message())
        })
        .await;
    progress.finish_and_clear();

    if let Err(e) = result {
        tracing::error!(error = %e, "memory creation failed");
        eprintln!("{}", Style::new().red().apply_to(CREATION_FAILED_MESSAGE));
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    Ok(())
}

fn view_screen(journal: &mut Journal, theme: &ColorfulTheme) -> Result<()> {
    if let Some(record) = journal.selected() {
        println!("{}\n", render::render_detail(record));
    }

    Select::with_theme(theme)
        .items(&["← Voltar ao Diário"])
        .default(0)
        .interact_opt()?;
    journal.back()?;
    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
