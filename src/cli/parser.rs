use crate::config::StorageBackend;
use crate::source::SourceKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for radar-ingest
#[derive(Parser)]
#[command(
    name = "radar-ingest",
    version = env!("CARGO_PKG_VERSION"),
    about = "Discover places, normalize them and upsert stores with their inventory",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the env-style credentials file (default: .env.local)
    #[arg(global = true, long = "env-file")]
    pub env_file: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Discover candidates and upsert them
    Run {
        /// Candidate source strategy
        #[arg(long, value_enum)]
        source: Option<SourceKind>,

        /// Storage backend
        #[arg(long, value_enum)]
        backend: Option<StorageBackend>,

        /// Search query (api source)
        #[arg(long, short)]
        query: Option<String>,

        /// Snapshot JSON file (snapshot source)
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        /// Maximum number of candidates committed in this run
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// List stored places with their inventory
    List {
        #[arg(long = "unresolved", help = "Show only places stored without a location")]
        unresolved: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show or check the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check that the configured backend and source have credentials")]
        check: bool,
    },

    /// Database maintenance
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },
}
