//! AIGN CLI binary.
//!
//! Runs one step of the writing workflow per invocation. Narrative memory
//! survives between invocations through `--snapshot`.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, print_config, run_step, show_memory};

    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    aign_core::init_tracing(log_level)?;

    let config = cli.load_config()?;

    match &cli.command {
        Commands::Memory => show_memory(&config, cli.snapshot.as_deref())?,
        Commands::Config => print_config(&config)?,
        step => run_step(step, &config, cli.snapshot.as_deref()).await?,
    }

    Ok(())
}
