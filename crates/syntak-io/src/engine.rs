//! Synth engine facade.
//!
//! [`SynthEngine`] is what a UI holds: it wires the shared parameter store to
//! the playback transport and to a separate snapshot renderer for the
//! oscilloscope. Every method takes `&self`, so one `Arc<SynthEngine>` can be
//! shared between a control thread and a display thread.

use crate::Result;
use crate::backend::AudioOutput;
use crate::pcm::PcmFormat;
use crate::transport::{DEFAULT_BLOCK_SIZE, Transport, TransportState};
use parking_lot::Mutex;
use std::sync::Arc;
use syntak_synth::{ParamId, ParamSnapshot, Renderer, SynthParams, WaveType};

/// Synthesizer engine: parameters, transport, and snapshot renderer.
pub struct SynthEngine {
    params: Arc<SynthParams>,
    transport: Mutex<Transport>,
    /// Visual path. Its phase is independent of what is heard.
    snapshot: Mutex<Renderer>,
    sample_rate: f64,
}

impl SynthEngine {
    /// Engine on `output` with the default format and block size.
    pub fn new(output: Arc<dyn AudioOutput>) -> Self {
        Self::with_format(output, PcmFormat::default(), DEFAULT_BLOCK_SIZE)
    }

    /// Engine with an explicit stream format and block size.
    pub fn with_format(output: Arc<dyn AudioOutput>, format: PcmFormat, block_size: usize) -> Self {
        let params = Arc::new(SynthParams::new());
        let sample_rate = f64::from(format.sample_rate);
        Self {
            transport: Mutex::new(Transport::new(
                output,
                Arc::clone(&params),
                format,
                block_size,
            )),
            params,
            snapshot: Mutex::new(Renderer::with_sample_rate(sample_rate)),
            sample_rate,
        }
    }

    /// Copy of every parameter value. Writes go through the setters below.
    pub fn snapshot(&self) -> ParamSnapshot {
        self.params.snapshot()
    }

    /// Engine sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Samples per generation block.
    pub fn block_size(&self) -> usize {
        self.transport.lock().block_size()
    }

    /// Name of the output backend.
    pub fn backend_name(&self) -> String {
        self.transport.lock().backend_name().to_string()
    }

    /// Select the waveform by name, case-insensitive. Unknown names select
    /// silence.
    pub fn set_wave_type(&self, name: &str) {
        let wave = WaveType::from_name(name);
        if wave == WaveType::Silent && !name.trim().eq_ignore_ascii_case("silent") {
            tracing::debug!(name, "unknown wave type, output is silent");
        }
        self.params.set_wave(wave);
    }

    /// Current waveform name.
    pub fn wave_type(&self) -> &'static str {
        self.params.wave().name()
    }

    /// Select the waveform.
    pub fn set_wave(&self, wave: WaveType) {
        self.params.set_wave(wave);
    }

    /// Set a parameter by name, clamped to its range. Unknown names are
    /// ignored.
    pub fn set_parameter(&self, name: &str, value: f64) {
        if self.params.set_by_name(name, value).is_none() {
            tracing::debug!(name, value, "unknown parameter ignored");
        }
    }

    /// Read a parameter by name. Unknown names read as 0.
    pub fn get_parameter(&self, name: &str) -> f64 {
        self.params.get_by_name(name)
    }

    /// Set a parameter, clamped to its range. Returns the stored value.
    pub fn set(&self, id: ParamId, value: f64) -> f64 {
        self.params.set(id, value)
    }

    /// Read a parameter.
    pub fn get(&self, id: ParamId) -> f64 {
        self.params.get(id)
    }

    /// Bypass the envelope (gain 1.0) when enabled.
    pub fn set_test_envelope(&self, enabled: bool) {
        self.params.set_test_envelope(enabled);
    }

    /// Open the device and start playback. A no-op while playing.
    pub fn start(&self) -> Result<()> {
        self.transport.lock().start()
    }

    /// Stop playback and wait for the generation thread to exit.
    pub fn stop(&self) {
        self.transport.lock().stop();
    }

    /// `true` while the generation loop is running.
    pub fn is_playing(&self) -> bool {
        self.transport.lock().is_playing()
    }

    /// Transport state.
    pub fn state(&self) -> TransportState {
        self.transport.lock().state()
    }

    /// Render `count` samples for display from the snapshot renderer.
    ///
    /// Advances only the visual phase; the audible stream is untouched.
    pub fn render_snapshot(&self, count: usize) -> Vec<f32> {
        self.snapshot.lock().render(&self.params, count)
    }

    /// Render `frames` samples of the audio path offline.
    ///
    /// Uses a fresh renderer and the transport's block size, so the envelope
    /// repeats per block exactly as it does on the live stream.
    pub fn render_offline(&self, frames: usize) -> Vec<f32> {
        let block_size = self.block_size();
        let mut renderer = Renderer::with_sample_rate(self.sample_rate);
        let mut out = vec![0.0f32; frames];
        for chunk in out.chunks_mut(block_size) {
            renderer.render_into(&self.params, chunk);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PcmSink;
    use crate::Error;

    struct NoDevice;

    impl AudioOutput for NoDevice {
        fn name(&self) -> &str {
            "none"
        }

        fn open(&self, _format: &PcmFormat) -> Result<Box<dyn PcmSink>> {
            Err(Error::NoDevice)
        }
    }

    fn engine() -> SynthEngine {
        SynthEngine::with_format(Arc::new(NoDevice), PcmFormat::default(), 128)
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SynthEngine>();
    }

    #[test]
    fn test_wave_type_by_name() {
        let e = engine();
        assert_eq!(e.wave_type(), "sine");
        e.set_wave_type("SQUARE");
        assert_eq!(e.wave_type(), "square");
        e.set_wave_type("triangle");
        assert_eq!(e.wave_type(), "silent");
        e.set_wave(WaveType::Saw);
        assert_eq!(e.wave_type(), "saw");
    }

    #[test]
    fn test_parameters_by_name_and_id() {
        let e = engine();
        e.set_parameter("Tune", 880.0);
        assert_eq!(e.get_parameter("tune"), 880.0);
        assert_eq!(e.get(ParamId::Tune), 880.0);

        e.set_parameter("volume", 3.0);
        assert_eq!(e.get(ParamId::Volume), 1.0);
        assert_eq!(e.set(ParamId::Width, -1.0), 0.0);

        e.set_parameter("resonance", 0.5);
        assert_eq!(e.get_parameter("resonance"), 0.0);
    }

    #[test]
    fn test_snapshot_reflects_setters() {
        let engine = SynthEngine::new(Arc::new(NoDevice));
        engine.set(ParamId::Width, 0.25);
        engine.set_wave(WaveType::Square);
        engine.set_test_envelope(true);

        let snap = engine.snapshot();
        assert_eq!(snap.width, 0.25);
        assert_eq!(snap.wave, WaveType::Square);
        assert!(snap.test_envelope);
        assert_eq!(snap.tune, engine.get(ParamId::Tune));
    }

    #[test]
    fn test_start_without_device_stays_stopped() {
        let e = engine();
        assert!(matches!(e.start(), Err(Error::NoDevice)));
        assert!(!e.is_playing());
        assert_eq!(e.state(), TransportState::Stopped);
    }

    #[test]
    fn test_snapshot_length_and_bounds() {
        let e = engine();
        e.set_test_envelope(true);
        let trace = e.render_snapshot(300);
        assert_eq!(trace.len(), 300);
        assert!(trace.iter().all(|s| s.abs() <= 1.0 + 1e-6));
    }

    #[test]
    fn test_offline_render_repeats_envelope_per_block() {
        let e = engine();
        e.set_wave(WaveType::Square);
        e.set(ParamId::Attack, 0.5);
        let out = e.render_offline(256);
        assert_eq!(out.len(), 256);
        // Each 128-sample block restarts the attack at zero.
        assert_eq!(out[0], 0.0);
        assert_eq!(out[128], 0.0);
        assert!(out[127].abs() > 0.0);
    }
}
