mod assemble;
mod config;
mod error;
mod font;
mod pipeline;
mod render;
mod vector;

use anyhow::Context;
use config::Config;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config = Config::default();
    let outputs = pipeline::run(&config).with_context(|| {
        format!(
            "failed to generate logo assets in {}",
            config.asset_dir.display()
        )
    })?;

    info!("Done, {} file(s) regenerated", outputs.written.len());
    Ok(())
}
