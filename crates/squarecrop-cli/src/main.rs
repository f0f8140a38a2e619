use crate::config::Config;
use anyhow::Context;
use std::path::Path;

mod config;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    )
    .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => Config::default(),
    };

    run(&config)
}

fn run(config: &Config) -> anyhow::Result<()> {
    let size = squarecrop_core::target_size(config.size)?;

    log::info!(
        "Cropping {} to {}x{} square",
        config.source.display(),
        size,
        size
    );

    squarecrop_core::crop_and_resize_to_file(
        &config.source,
        &config.destination,
        size,
        &config.options,
    )
    .with_context(|| format!("Failed to process {}", config.source.display()))?;

    log::info!("Saved {}", config.destination.display());
    Ok(())
}
