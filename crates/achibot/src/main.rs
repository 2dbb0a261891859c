//! Match harness bot (achibot)

use achibot::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "achibot")]
#[command(about = "Simulated clients for achikaps matchmaking", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "achibot.json")]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect the clients, matchmake and idle until Ctrl-C (default)
    Run,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print freshly generated device IDs
    DeviceId {
        /// How many to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Show the effective configuration
    Info,

    /// Show version information
    Version,
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run);

    match command {
        Commands::Init { force } => cli::init::run(&cli.config, force),
        Commands::DeviceId { count } => {
            cli::device_id::run(count);
            Ok(())
        }
        Commands::Version => {
            println!("achibot version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Info => {
            let config = Config::load_or_default(&cli.config)?;
            cli::info::run(&config)
        }
        Commands::Run => {
            let config = Config::load_or_default(&cli.config)?;
            init_tracing(&config.logging.level);
            cli::run::run(config).await
        }
    }
}
