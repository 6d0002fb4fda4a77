use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod design;
mod parsing;
mod pipeline;
mod remote;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("amplidesign=debug,info")
    } else {
        EnvFilter::new("amplidesign=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    cli::design::run(&cli)
}
