#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    CommandStrategy, ExtractInput, ExtractStrategy, InfoInput, InfoStrategy, InitStrategy,
    VersionStrategy,
};

#[derive(Parser)]
#[command(name = "titr")]
#[command(about = "Extract dosage-change directives from clinical recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract directives from a recommendation
    Extract {
        /// Recommendation text (read from stdin when omitted)
        #[arg(short = 't', long, conflicts_with = "tokens")]
        text: Option<String>,

        /// Pre-annotated token stream as a JSON array
        #[arg(long)]
        tokens: Option<PathBuf>,

        /// Pretty-print the JSON result
        #[arg(short, long)]
        pretty: bool,
    },
    /// Show effective configuration and registered patterns
    Info {
        /// Show only this pattern, position by position (e.g. CARB_RATIO_CHANGE)
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            text,
            tokens,
            pretty,
        } => ExtractStrategy.execute(ExtractInput {
            text,
            tokens,
            pretty,
        }),
        Commands::Info { pattern } => InfoStrategy.execute(InfoInput { pattern }),
        Commands::Init => InitStrategy.execute(()),
        Commands::Version => VersionStrategy.execute(()),
    }
}
