//! Shared CLI helpers used across multiple commands.

use clap::Args;
use std::sync::Arc;
use syntak_config::{AudioConfig, Backend, SampleByteOrder};
use syntak_io::{
    AudioOutput, ByteOrder, CpalOutput, PcmFormat, RawPcmOutput, RawTarget, SynthEngine,
};
use syntak_synth::{ParamId, SAMPLE_RATE};

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{}' (expected key=value)", s))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid value for '{}': '{}' is not a number", key, value))?;
    Ok((key.trim().to_string(), value))
}

/// Voice settings shared by `play`, `scope`, and `render`.
#[derive(Args, Debug, Clone)]
pub struct VoiceArgs {
    /// Waveform: sine, square, saw (anything else is silent)
    #[arg(short, long, default_value = "sine")]
    pub wave: String,

    /// Parameter values (e.g., "tune=220", "width=0.25")
    #[arg(short, long = "param", value_parser = parse_key_val, number_of_values = 1)]
    pub params: Vec<(String, f64)>,

    /// Bypass the envelope (constant gain 1.0)
    #[arg(long)]
    pub no_envelope: bool,
}

impl VoiceArgs {
    /// Push the wave and parameters into the engine.
    pub fn apply(&self, engine: &SynthEngine) {
        engine.set_wave_type(&self.wave);
        for (name, value) in &self.params {
            if ParamId::from_name(name).is_none() {
                tracing::warn!(name = %name, "unknown parameter ignored");
            }
            engine.set_parameter(name, *value);
        }
        engine.set_test_envelope(self.no_envelope);
    }
}

/// Output overrides on top of the `[audio]` config section.
#[derive(Debug, Clone, Default)]
pub struct OutputOverrides {
    pub device: Option<String>,
    pub raw: Option<String>,
    pub byte_order: Option<SampleByteOrder>,
}

/// Build the output backend and stream format.
///
/// `--raw` forces the raw backend; otherwise `audio.backend` decides.
pub fn build_output(
    audio: &AudioConfig,
    overrides: &OutputOverrides,
) -> (Arc<dyn AudioOutput>, PcmFormat) {
    let byte_order = match overrides.byte_order.unwrap_or(audio.byte_order) {
        SampleByteOrder::Big => ByteOrder::Big,
        SampleByteOrder::Little => ByteOrder::Little,
    };
    let format = PcmFormat {
        sample_rate: SAMPLE_RATE as u32,
        byte_order,
        ..PcmFormat::default()
    };

    let raw_path = match (&overrides.raw, audio.backend) {
        (Some(path), _) => Some(path.as_str()),
        (None, Backend::Raw) => Some(audio.raw_path.as_str()),
        (None, Backend::Cpal) => None,
    };

    let output: Arc<dyn AudioOutput> = match raw_path {
        Some(path) => Arc::new(RawPcmOutput::new(RawTarget::parse(path))),
        None => match overrides.device.as_ref().or(audio.device.as_ref()) {
            Some(name) => Arc::new(CpalOutput::with_device(name.clone())),
            None => Arc::new(CpalOutput::new()),
        },
    };

    (output, format)
}

/// Engine for offline use (scope, render). Nothing is ever opened.
pub fn offline_engine(block_size: usize) -> SynthEngine {
    SynthEngine::with_format(
        Arc::new(RawPcmOutput::new(RawTarget::Stdout)),
        PcmFormat::default(),
        block_size,
    )
}
