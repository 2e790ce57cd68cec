//! Configuration file command.

use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::Path;
use syntak_config::{ConfigError, SynthConfig, user_config_file};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,

    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(
    args: ConfigArgs,
    explicit: Option<&Path>,
    loaded: Result<SynthConfig, ConfigError>,
) -> anyhow::Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(user_config_file);

    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => {
            let config = loaded.context("failed to load configuration")?;
            print!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            let state = if path.is_file() { "" } else { " (not created)" };
            println!("{}{}", path.display(), state);
        }

        ConfigCommand::Init { force } => init(&path, force)?,
    }

    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }
    SynthConfig::default().save(path)?;
    tracing::info!(path = %path.display(), "default config written");
    println!("Wrote {}", path.display());
    Ok(())
}
