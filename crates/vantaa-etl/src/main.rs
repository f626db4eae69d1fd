//! Vantaa open job postings ETL

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use vantaa_common::logging::{init_logging, LogConfig, LogLevel};
use vantaa_etl::config::EtlConfig;
use vantaa_etl::{load, pipeline};

#[derive(Parser, Debug)]
#[command(name = "vantaa-etl")]
#[command(author, version, about = "Vantaa open job postings ETL")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, transform and load the current job postings
    Run {
        /// Destination database connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        /// Enable coordinate and URL validation
        #[arg(long)]
        strict: bool,
    },

    /// Create the destination schema
    InitDb {
        /// Destination database connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },

    /// Delete a local environment file (scratch databases, lockfiles)
    Reset {
        /// File to remove; missing files are ignored
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the verbose flag
    let log_config = if std::env::var_os("LOG_LEVEL").is_some() {
        LogConfig::from_env()?
    } else {
        LogConfig::builder().level(log_level).build()
    };

    init_logging(&log_config)?;

    match cli.command {
        Command::Run {
            database_url,
            strict,
        } => {
            let mut config = EtlConfig::from_env();
            if strict {
                config.validate_coordinates = true;
                config.validate_urls = true;
            }

            let stats = pipeline::run_etl(config, &database_url).await?;
            info!("Loaded {} job postings", stats.records_loaded);
        },
        Command::InitDb { database_url } => {
            load::initialize_database(&database_url).await?;
            info!("Destination schema ready");
        },
        Command::Reset { path } => {
            vantaa_common::fs::reset_environment(&path);
            info!("Environment reset");
        },
    }

    Ok(())
}
