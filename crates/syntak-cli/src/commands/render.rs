//! Offline WAV render command.

use super::common::{VoiceArgs, offline_engine};
use clap::Args;
use std::path::PathBuf;
use syntak_config::SynthConfig;
use syntak_io::{WavSpec, write_wav};
use syntak_synth::SAMPLE_RATE;

/// Longest render accepted, in seconds. The whole render is held in memory.
pub const MAX_RENDER_SECONDS: f64 = 600.0;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    voice: VoiceArgs,

    /// Duration in seconds
    #[arg(short, long, default_value = "1.0")]
    duration: f64,
}

pub fn run(args: RenderArgs, config: &SynthConfig) -> anyhow::Result<()> {
    if !args.duration.is_finite() || args.duration < 0.0 {
        anyhow::bail!("--duration must be a non-negative number of seconds");
    }
    if args.duration > MAX_RENDER_SECONDS {
        anyhow::bail!(
            "--duration must be at most {MAX_RENDER_SECONDS} seconds, got {}",
            args.duration
        );
    }

    let engine = offline_engine(config.audio.block_size);
    args.voice.apply(&engine);

    let frames = (args.duration * SAMPLE_RATE).round() as usize;
    let samples = engine.render_offline(frames);

    let spec = WavSpec::default();
    write_wav(&args.output, &samples, spec)?;

    tracing::info!(
        path = %args.output.display(),
        frames,
        wave = engine.wave_type(),
        "render complete"
    );
    println!(
        "Wrote {} ({} samples, {:.2}s, {} Hz mono 16-bit)",
        args.output.display(),
        frames,
        spec.duration_of(frames),
        spec.sample_rate
    );
    Ok(())
}
