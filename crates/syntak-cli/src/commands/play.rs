//! Live playback command.
//!
//! Human-readable output goes to stderr because `--raw -` streams PCM over
//! stdout.

use super::common::{OutputOverrides, VoiceArgs, build_output};
use crate::ascii_scope;
use clap::{Args, ValueEnum};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use syntak_config::{SampleByteOrder, SynthConfig};
use syntak_io::SynthEngine;
use syntak_synth::{ParamId, scope};

/// Byte order for `--byte-order`
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliByteOrder {
    Big,
    Little,
}

impl From<CliByteOrder> for SampleByteOrder {
    fn from(order: CliByteOrder) -> Self {
        match order {
            CliByteOrder::Big => SampleByteOrder::Big,
            CliByteOrder::Little => SampleByteOrder::Little,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    voice: VoiceArgs,

    /// Stop after this many seconds (runs until Ctrl+C otherwise)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Output device (partial name, case-insensitive)
    #[arg(long)]
    device: Option<String>,

    /// Write raw 16-bit PCM to PATH instead of a device ("-" for stdout)
    #[arg(long, value_name = "PATH")]
    raw: Option<String>,

    /// Raw PCM byte order
    #[arg(long, value_enum)]
    byte_order: Option<CliByteOrder>,

    /// Draw an ASCII oscilloscope once per second
    #[arg(long)]
    scope: bool,
}

const SCOPE_WIDTH: usize = 72;
const SCOPE_HEIGHT: usize = 13;
const DRAW_INTERVAL: Duration = Duration::from_secs(1);

pub fn run(args: PlayArgs, config: &SynthConfig) -> anyhow::Result<()> {
    if let Some(d) = args.duration
        && (!d.is_finite() || d < 0.0)
    {
        anyhow::bail!("--duration must be a non-negative number of seconds");
    }

    let overrides = OutputOverrides {
        device: args.device.clone(),
        raw: args.raw.clone(),
        byte_order: args.byte_order.map(Into::into),
    };
    let (output, format) = build_output(&config.audio, &overrides);
    let engine = SynthEngine::with_format(output, format, config.audio.block_size);
    args.voice.apply(&engine);

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    engine.start()?;
    eprintln!(
        "Playing {} @ {} Hz on {} ({} samples/block). Press Ctrl+C to stop.",
        engine.wave_type(),
        engine.get(ParamId::Tune),
        engine.backend_name(),
        engine.block_size()
    );

    let refresh = Duration::from_secs_f64(1.0 / f64::from(config.scope.refresh_hz.max(1)));
    let deadline = args.duration.map(|d| Instant::now() + Duration::from_secs_f64(d));
    let mut last_draw: Option<Instant> = None;
    let mut lost_device = false;

    while running.load(Ordering::SeqCst) {
        if deadline.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        if !engine.is_playing() {
            lost_device = true;
            break;
        }

        // The UI cadence: one snapshot per refresh tick.
        let snapshot = engine.render_snapshot(config.scope.samples);
        if args.scope && last_draw.is_none_or(|t| t.elapsed() >= DRAW_INTERVAL) {
            eprintln!(
                "{}\npeak {:.3}\n",
                ascii_scope::render(&snapshot, SCOPE_WIDTH, SCOPE_HEIGHT),
                scope::peak(&snapshot)
            );
            last_draw = Some(Instant::now());
        }

        std::thread::sleep(refresh);
    }

    engine.stop();
    if lost_device {
        anyhow::bail!("playback stopped: audio device write failed");
    }
    eprintln!("Stopped.");
    Ok(())
}
