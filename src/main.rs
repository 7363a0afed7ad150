use clap::Parser;
use soap_core::{CoreConfig, NoteStore, Section, COMPARATOR_TITLE};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Three-way SOAP note comparator: LED vs OpenAI vs ground truth.
#[derive(Parser)]
#[command(name = "soap-compare")]
#[command(about = "Compare LED and OpenAI SOAP note predictions against the ground truth")]
struct Args {
    /// Note index to display
    #[arg(long, short, default_value_t = 0)]
    note: usize,
    /// Restrict output to these sections (S, O, A, P or full names); repeatable
    #[arg(long, short)]
    section: Vec<Section>,
    /// Print the comparison as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Main entry point for the comparator.
///
/// Resolves data locations once, loads every note source into memory, then renders the
/// comparison for the selected note.
///
/// # Environment Variables
/// - `SOAP_LED_PREDICTIONS`: LED predictions file (default: "led_predicitons_test_epoch_2.json")
/// - `SOAP_OPENAI_PREDICTIONS`: OpenAI predictions file (default: "openai_predictions.json")
/// - `SOAP_DATASET_DIR`: ground-truth dataset directory (default: "combined_normalized_data")
/// - `SOAP_DATASET_SPLIT`: dataset split (default: "test")
/// - `SOAP_NOTE_COLUMN`: dataset column holding the note (default: "soap_note")
///
/// # Returns
/// * `Ok(())` - If the comparison was rendered
/// * `Err(anyhow::Error)` - If loading fails or the note index is out of range
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("soap_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = CoreConfig::from_env_lookup(|key| std::env::var(key).ok())?;

    let store = NoteStore::load(&config)?;
    tracing::info!("++ {} notes available for comparison", store.len());

    if args.note >= store.len() {
        anyhow::bail!(
            "note index {} is out of range ({} notes available)",
            args.note,
            store.len()
        );
    }

    let comparison = store.compare(args.note);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("{}", COMPARATOR_TITLE);
        println!();
        print!("{}", comparison.render_text(&args.section));
    }

    Ok(())
}
