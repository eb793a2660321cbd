//! Command-line interface for rlog-generator
//!
//! # Usage Examples
//!
//! ```bash
//! # Emit every enabled pattern at its configured rate
//! rlog-generator generate --config patterns.yaml
//!
//! # Emit 100 lines of the `auth` pattern to its output, then exit
//! rlog-generator generate --config patterns.yaml --pattern auth --count 100
//!
//! # List provider functions, core namespace first
//! rlog-generator list-functions
//! ```
//!
//! Log output goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=rlog_engine=debug`).

use clap::{Parser, Subcommand};
use rlog_generator::{run_generate, run_list_functions, GenerateArgs, ListFunctionsArgs};

#[derive(Parser)]
#[command(name = "rlog-generator")]
#[command(about = "Generate fake log lines from configurable patterns")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render and emit log lines for the configured patterns
    Generate(GenerateArgs),

    /// List provider modules and their functions
    ListFunctions(ListFunctionsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing on stderr so generated lines on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args).await,
        Commands::ListFunctions(args) => run_list_functions(args),
    }
}
