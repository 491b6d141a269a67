use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use webfit::{BatchProcessor, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let config = cli.to_config();
    let processor = BatchProcessor::new(config).context("Invalid configuration")?;

    let stats = processor.run().context("Batch conversion failed")?;

    if !stats.errors.is_empty() {
        log::warn!("{} file(s) could not be converted", stats.errors.len());
    }

    Ok(())
}
