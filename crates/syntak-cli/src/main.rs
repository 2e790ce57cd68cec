//! Syntak CLI - play, visualize, and render the syntak synthesizer.

mod ascii_scope;
mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use syntak_config::SynthConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

#[derive(Parser)]
#[command(name = "syntak")]
#[command(author, version, about = "Syntak monophonic synthesizer", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config file if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the synthesizer on an audio device or raw PCM stream
    Play(commands::play::PlayArgs),

    /// Print an ASCII oscilloscope of one snapshot
    Scope(commands::scope::ScopeArgs),

    /// Render the audio path to a WAV file
    Render(commands::render::RenderArgs),

    /// List parameters with ranges, defaults, and units
    Params,

    /// List and inspect output devices
    Devices(commands::devices::DevicesArgs),

    /// Show or initialize the configuration file
    Config(commands::config::ConfigArgs),
}

/// Install the stderr subscriber. Until the config is read the filter is
/// `RUST_LOG` or `"info"`; the returned handle swaps in `log.filter` later.
fn init_tracing() -> reload::Handle<EnvFilter, Registry> {
    let initial = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    handle
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_handle = init_tracing();

    let config = SynthConfig::load_or_default(cli.config.as_deref());

    // RUST_LOG wins, then the config file, then "info".
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none()
        && let Ok(config) = &config
    {
        match EnvFilter::try_new(&config.log.filter) {
            Ok(filter) => {
                if let Err(err) = log_handle.reload(filter) {
                    tracing::warn!(%err, "could not apply log filter");
                }
            }
            Err(err) => {
                tracing::warn!(filter = %config.log.filter, %err, "invalid log filter, keeping info");
            }
        }
    }

    if let Commands::Config(args) = cli.command {
        // `config path` and `config init` must work with a broken file.
        return commands::config::run(args, cli.config.as_deref(), config);
    }

    let config = config.context("failed to load configuration")?;
    tracing::debug!(
        backend = ?config.audio.backend,
        block_size = config.audio.block_size,
        "configuration"
    );

    match cli.command {
        Commands::Play(args) => commands::play::run(args, &config),
        Commands::Scope(args) => commands::scope::run(args, &config),
        Commands::Render(args) => commands::render::run(args, &config),
        Commands::Params => commands::params::run(),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Config(_) => Ok(()),
    }
}
