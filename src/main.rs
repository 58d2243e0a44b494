use std::path::PathBuf;

use clap::Parser;

use crate::config::BuildMode;

mod build;
mod commands;
mod config;

/// Build the site: render every published markdown page to HTML.
#[derive(Parser)]
#[command(version, about)]
struct BuildArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
    config_file: Option<PathBuf>,

    /// Build mode for this run (development or production), overriding
    /// QUIRE_MODE and the config file
    #[arg(short, long)]
    mode: Option<BuildMode>,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = BuildArgs::parse();
    commands::build::run(&args)?;

    Ok(())
}
