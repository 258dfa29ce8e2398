use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use memoria::{cli, config};

#[derive(Parser)]
#[command(name = "memoria", version, about = "A memory journal that remembers the weather, the mood, and the light")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive journal (default)
    App,
    /// Capture a new memory without the interactive screens
    New {
        /// What is happening right now
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print the timeline, newest first
    List,
    /// Print one memory in full
    Show {
        id: String,
        /// Write the generated image to this file
        #[arg(long)]
        save_image: Option<PathBuf>,
    },
    /// Export all memories as JSON to stdout
    Export,
    /// Delete every stored memory
    Reset,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::MemoriaConfig::load()?;

    // Log to stderr so stdout stays clean for the journal screens.
    let filter = EnvFilter::try_new(&config.app.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Command::App) {
        Command::App => cli::app(&config).await?,
        Command::New { text } => cli::new::new(&config, &text.join(" ")).await?,
        Command::List => cli::list::list(&config)?,
        Command::Show { id, save_image } => {
            cli::show::show(&config, &id, save_image.as_deref())?
        }
        Command::Export => cli::export::export(&config)?,
        Command::Reset => cli::reset::reset(&config)?,
    }

    Ok(())
}
