//! One-shot ASCII oscilloscope command.

use super::common::{VoiceArgs, offline_engine};
use crate::ascii_scope;
use clap::Args;
use syntak_config::{SCOPE_SAMPLES_RANGE, SynthConfig};
use syntak_synth::{ParamId, scope};

#[derive(Args)]
pub struct ScopeArgs {
    #[command(flatten)]
    voice: VoiceArgs,

    /// Snapshot length in samples (defaults to scope.samples)
    #[arg(short, long)]
    samples: Option<usize>,

    /// Canvas width in characters
    #[arg(long, default_value = "72")]
    width: usize,

    /// Canvas height in lines
    #[arg(long, default_value = "17")]
    height: usize,
}

pub fn run(args: ScopeArgs, config: &SynthConfig) -> anyhow::Result<()> {
    let samples = args.samples.unwrap_or(config.scope.samples);
    if !SCOPE_SAMPLES_RANGE.contains(&samples) {
        anyhow::bail!(
            "--samples must be in {}..={}, got {}",
            SCOPE_SAMPLES_RANGE.start(),
            SCOPE_SAMPLES_RANGE.end(),
            samples
        );
    }

    let engine = offline_engine(config.audio.block_size);
    args.voice.apply(&engine);

    let snapshot = engine.render_snapshot(samples);
    println!("{}", ascii_scope::render(&snapshot, args.width, args.height));
    println!(
        "{} @ {} Hz, {} samples, peak {:.3}",
        engine.wave_type(),
        engine.get(ParamId::Tune),
        samples,
        scope::peak(&snapshot)
    );
    Ok(())
}
