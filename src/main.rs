mod api;
mod cli;
mod model;
mod orchestrator;
mod parse;
mod text_summary;
mod tracker;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_one_shot = args.is_one_shot();

    match cli::run(args).await {
        Ok(()) => {
            // Explicitly exit with code 0 on success for one-shot modes.
            if is_one_shot {
                std::process::exit(0);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}
