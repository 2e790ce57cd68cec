//! Signal renderer: oscillator × envelope × volume.
//!
//! [`Renderer`] is the single code path behind both the audio stream and the
//! oscilloscope snapshots. It owns one phase accumulator; the engine keeps two
//! renderers (audible and visual) so the two paths never advance the same
//! phase concurrently. The visual trace is therefore not phase-locked to what
//! is heard.
//!
//! Parameters are re-read from the shared [`SynthParams`] for every sample, so
//! a knob movement lands mid-buffer.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::envelope::Adsr;
use crate::oscillator::{OscSettings, Oscillator};
use crate::params::{ParamSnapshot, SynthParams};

/// Fixed engine sample rate in Hz.
pub const SAMPLE_RATE: f64 = 44100.0;

/// Block renderer with its own phase accumulator.
///
/// Not reentrant: rendering takes `&mut self`, one caller at a time.
#[derive(Debug, Clone)]
pub struct Renderer {
    osc: Oscillator,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer at [`SAMPLE_RATE`] with phase 0.
    pub fn new() -> Self {
        Self::with_sample_rate(SAMPLE_RATE)
    }

    /// Create a renderer at an arbitrary sample rate.
    pub fn with_sample_rate(sample_rate: f64) -> Self {
        Self {
            osc: Oscillator::new(sample_rate),
        }
    }

    /// Current phase of this renderer's accumulator.
    pub fn phase(&self) -> f64 {
        self.osc.phase()
    }

    /// Reset the accumulator to phase 0.
    pub fn reset(&mut self) {
        self.osc.reset();
    }

    /// Render `count` samples into a new buffer.
    pub fn render(&mut self, params: &SynthParams, count: usize) -> Vec<f32> {
        let mut out = vec![0.0; count];
        self.render_into(params, &mut out);
        out
    }

    /// Render into `out`, treating `out.len()` as the envelope buffer length.
    pub fn render_into(&mut self, params: &SynthParams, out: &mut [f32]) {
        let len = out.len();
        for (i, sample) in out.iter_mut().enumerate() {
            let p = params.snapshot();
            *sample = self.next_sample(&p, i, len);
        }
    }

    /// Render with a fixed set of values instead of the shared store.
    pub fn render_fixed(&mut self, params: &ParamSnapshot, out: &mut [f32]) {
        let len = out.len();
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = self.next_sample(params, i, len);
        }
    }

    #[inline]
    fn next_sample(&mut self, p: &ParamSnapshot, index: usize, len: usize) -> f32 {
        let env = if p.test_envelope {
            1.0
        } else {
            Adsr::new(p.attack, p.decay, p.sustain, p.release).buffer_level(index, len)
        };
        let value = self.osc.advance(&OscSettings {
            wave: p.wave,
            tune: p.tune,
            width: p.width,
            color: p.color,
            depth: p.depth,
        });
        (p.volume * value * env) as f32
    }
}
