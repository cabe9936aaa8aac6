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

mod command;

use std::path::PathBuf;

use arka_config::Config;
use arka_core::BlockType;
use clap::{Parser, Subcommand};
use command::{
    CaptureInput, CaptureStrategy, CommandStrategy, CompletionInput, CompletionStrategy,
    ExtractInput, ExtractStrategy, InfoStrategy, InitStrategy, SummaryInput, SummaryStrategy,
    VersionStrategy,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "arka")]
#[command(about = "Extract typed memory blocks from project conversations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract memory blocks from text and print them as JSON
    Extract {
        /// Text to analyze
        #[arg(short = 'm', long, conflicts_with = "file")]
        message: Option<String>,

        /// File to analyze; stdin when neither --message nor --file is given
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Agent recorded on every block
        #[arg(short = 'a', long)]
        agent: Option<String>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Compute the context completion percentage of a block collection
    Completion {
        /// JSON array of blocks; stdin when neither --file nor --types is given
        #[arg(short = 'f', long, conflicts_with = "types")]
        file: Option<PathBuf>,

        /// Comma-separated block types, e.g. vision,decision,decision
        #[arg(short = 't', long, value_delimiter = ',')]
        types: Vec<BlockType>,
    },
    /// Capture messages into an in-memory project and print each report
    Capture {
        /// Message to capture; repeat for several
        #[arg(short = 'm', long = "message", required = true)]
        messages: Vec<String>,

        /// Agent recorded on every block
        #[arg(short = 'a', long)]
        agent: Option<String>,

        /// Project id; a fresh one when neither this nor the config names one
        #[arg(short = 'p', long)]
        project: Option<Uuid>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Capture messages and print the project memory summary
    Summary {
        /// Message to capture; repeat for several
        #[arg(short = 'm', long = "message", required = true)]
        messages: Vec<String>,

        /// Agent recorded on every block
        #[arg(short = 'a', long)]
        agent: Option<String>,

        /// Project id; a fresh one when neither this nor the config names one
        #[arg(short = 'p', long)]
        project: Option<Uuid>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and pattern catalog
    Info,
    /// Show version
    Version,
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// The project named on the command line, else the configured one, else a new id.
fn project_id_or_default(project: Option<Uuid>, config: &Config) -> Uuid {
    let project_id = project
        .or(config.capture.default_project_id)
        .unwrap_or_else(Uuid::now_v7);
    info!("Using project {project_id}");
    project_id
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default()?;
    init_tracing(&config)?;

    match cli.command {
        Commands::Extract {
            message,
            file,
            agent,
            compact,
        } => {
            let input = ExtractInput {
                message,
                file,
                agent_source: agent.or(config.extraction.default_agent_source),
                compact,
            };
            ExtractStrategy::default().execute(input).await?;
        }
        Commands::Completion { file, types } => {
            CompletionStrategy
                .execute(CompletionInput { types, file })
                .await?;
        }
        Commands::Capture {
            messages,
            agent,
            project,
            compact,
        } => {
            let project_id = project_id_or_default(project, &config);
            let input = CaptureInput {
                messages,
                agent_source: agent.or(config.extraction.default_agent_source),
                project_id,
                max_content_bytes: config.capture.max_content_bytes,
                compact,
            };
            CaptureStrategy.execute(input).await?;
        }
        Commands::Summary {
            messages,
            agent,
            project,
            compact,
        } => {
            let project_id = project_id_or_default(project, &config);
            let input = SummaryInput {
                messages,
                agent_source: agent.or(config.extraction.default_agent_source),
                project_id,
                max_content_bytes: config.capture.max_content_bytes,
                compact,
            };
            SummaryStrategy.execute(input).await?;
        }
        Commands::Init => {
            InitStrategy.execute(()).await?;
        }
        Commands::Info => {
            InfoStrategy.execute(()).await?;
        }
        Commands::Version => {
            VersionStrategy.execute(()).await?;
        }
    }

    Ok(())
}
