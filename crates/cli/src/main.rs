use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use soap_core::constants::{
    ENV_DATASET_DIR, ENV_DATASET_SPLIT, ENV_LED_PREDICTIONS, ENV_NOTE_COLUMN,
    ENV_OPENAI_PREDICTIONS,
};
use soap_core::{note_label, section_label, CoreConfig, NoteStore, ParsedNote, Section};
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soap")]
#[command(about = "SOAP note comparator tooling")]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Data source overrides. Unset flags fall back to the environment, then to defaults.
#[derive(Args)]
struct SourceArgs {
    /// LED predictions file (JSON array)
    #[arg(long, global = true)]
    led: Option<String>,
    /// OpenAI predictions file (JSON array)
    #[arg(long, global = true)]
    openai: Option<String>,
    /// Ground-truth dataset directory
    #[arg(long, global = true)]
    dataset: Option<String>,
    /// Dataset split
    #[arg(long, global = true)]
    split: Option<String>,
    /// Dataset column holding the reference note
    #[arg(long, global = true)]
    column: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable notes
    List,
    /// Parse a single note and print its sections as JSON
    Parse {
        /// File holding the note text (reads stdin when omitted)
        path: Option<PathBuf>,
    },
    /// Write every comparison as JSON Lines
    Export {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show section codes and labels
    Sections,
}

impl SourceArgs {
    fn flag(&self, key: &str) -> Option<String> {
        match key {
            ENV_LED_PREDICTIONS => self.led.clone(),
            ENV_OPENAI_PREDICTIONS => self.openai.clone(),
            ENV_DATASET_DIR => self.dataset.clone(),
            ENV_DATASET_SPLIT => self.split.clone(),
            ENV_NOTE_COLUMN => self.column.clone(),
            _ => None,
        }
    }

    fn resolve(&self) -> anyhow::Result<CoreConfig> {
        let config = CoreConfig::from_env_lookup(|key| {
            self.flag(key).or_else(|| std::env::var(key).ok())
        })?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("soap_core=warn".parse()?)
                .add_directive("soap=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => {
            let store = NoteStore::load(&cli.sources.resolve()?)?;
            if store.is_empty() {
                println!("No notes found.");
            } else {
                for index in 0..store.len() {
                    println!("{}", note_label(index));
                }
            }
        }
        Some(Commands::Parse { path }) => {
            let text = match path {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
            };
            let parsed = ParsedNote::parse(&text);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Some(Commands::Export { output }) => {
            let store = NoteStore::load(&cli.sources.resolve()?)?;
            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(
                    std::fs::File::create(path)
                        .with_context(|| format!("failed to create {}", path.display()))?,
                ),
                None => Box::new(std::io::stdout().lock()),
            };
            let mut writer = BufWriter::new(writer);
            for comparison in store.comparisons() {
                serde_json::to_writer(&mut writer, &comparison)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
            match output {
                Some(path) => tracing::info!(
                    count = store.len(),
                    path = %path.display(),
                    "exported comparisons"
                ),
                None => tracing::info!(count = store.len(), "exported comparisons to stdout"),
            }
        }
        Some(Commands::Sections) => {
            for section in Section::ALL {
                println!("{}  {}", section.marker(), section_label(section));
            }
        }
        None => {
            println!("Use 'soap --help' for commands");
        }
    }

    Ok(())
}
