use clap::{Parser, Subcommand, builder::styling};
use customer_tier_loader::{
    cli,
    source::{LocalObjectStore, S3ObjectStore},
};
use eyre::Result;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Customer Tier Loader: classify customers by tenure and load them into the warehouse
#[derive(Parser)]
#[command(name = "tierload", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// YAML configuration file, used instead of environment variables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read the source object from {DIR}/{bucket}/{key} instead of S3
    #[arg(short, long, global = true)]
    source_dir: Option<PathBuf>,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, transform and replace the destination table
    Run,

    /// Show the first rows of the transformed batch without loading it
    Preview {
        /// Number of rows to show
        #[arg(short, long, default_value_t = 5)]
        rows: usize,
    },

    /// Write the transformed batch to an NDJSON file instead of the warehouse
    Export {
        /// The NDJSON file to write
        #[arg(default_value = "final_data.ndjson")]
        output: PathBuf,
    },

    /// Test the connection to the destination warehouse
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    if Path::new(&args.env).exists() {
        dotenvy::from_filename(&args.env)?;
    }

    let log_level = match args.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let config_file = args.config.as_deref();
    let source_dir = args.source_dir.as_deref();

    match args.command {
        Commands::Run => {
            let config = cli::load_pipeline_config(config_file)?;
            let count = match source_dir {
                Some(dir) => cli::run_pipeline(&config, LocalObjectStore::new(dir)).await?,
                None => cli::run_pipeline(&config, S3ObjectStore::from_env().await).await?,
            };
            log::info!(
                "✓ Loaded {} record(s) into {}",
                count.green(),
                "final_data".cyan()
            );
        }
        Commands::Preview { rows } => {
            let source = cli::load_source_config(config_file)?;
            let batch = match source_dir {
                Some(dir) => cli::preview_batch(&source, LocalObjectStore::new(dir)).await?,
                None => cli::preview_batch(&source, S3ObjectStore::from_env().await).await?,
            };
            log::info!(
                "Viewing {} of {} row(s) to be loaded",
                rows.min(batch.len()),
                batch.len()
            );
            for record in batch.iter().take(rows) {
                log::info!("{}", record.bright_black());
            }
        }
        Commands::Export { output } => {
            let source = cli::load_source_config(config_file)?;
            let count = match source_dir {
                Some(dir) => {
                    cli::export_batch(&source, LocalObjectStore::new(dir), &output).await?
                }
                None => {
                    cli::export_batch(&source, S3ObjectStore::from_env().await, &output).await?
                }
            };
            log::info!(
                "✓ Exported {} record(s) to {}",
                count.green(),
                output.display().bright_black()
            );
        }
        Commands::Check => {
            let config = cli::load_pipeline_config(config_file)?;
            log::info!(
                "Testing connection to {}",
                config.connection_params().bright_black()
            );
            cli::check_connection(&config).await?;
            log::info!("✓ Connection OK");
        }
    }

    Ok(())
}
