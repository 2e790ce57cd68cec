//! Phase-accumulator oscillator.
//!
//! The phase is an angle in radians kept in `[0, 2π)`. Each call to
//! [`Oscillator::advance`] evaluates the selected wave at the current phase and
//! then moves the phase by `2π * tune / sample_rate`. Negative `tune` runs the
//! accumulator backwards and wraps the same way.
//!
//! Waveforms are computed naively (no band-limiting); the saw is hard-clamped
//! to `[-1, 1]` after its harmonic is mixed in.

use core::f64::consts::{PI, TAU};
use libm::{cos, floor, sin, sqrt};

use crate::params::WaveType;

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_phase(phase: f64) -> f64 {
    let r = phase - TAU * floor(phase / TAU);
    // floor rounding can land exactly on 2π for tiny negative inputs
    if r >= TAU || r < 0.0 { 0.0 } else { r }
}

/// Per-sample shaping inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscSettings {
    /// Wave shape.
    pub wave: WaveType,
    /// Frequency in Hz, may be negative.
    pub tune: f64,
    /// Square duty cycle in `[0, 1]`.
    pub width: f64,
    /// Sine/cosine mix in `[0, 1]`.
    pub color: f64,
    /// Saw second-harmonic mix in `[0, 1]`.
    pub depth: f64,
}

impl Default for OscSettings {
    fn default() -> Self {
        Self {
            wave: WaveType::Sine,
            tune: 440.0,
            width: 1.0,
            color: 1.0,
            depth: 1.0,
        }
    }
}

/// Oscillator with a persistent phase accumulator.
#[derive(Debug, Clone)]
pub struct Oscillator {
    /// Current phase in radians, `[0, 2π)`.
    phase: f64,
    sample_rate: f64,
}

impl Oscillator {
    /// Create an oscillator at phase 0.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Current phase in radians.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Move the phase to an arbitrary angle (wrapped).
    pub fn set_phase(&mut self, phase: f64) {
        self.phase = wrap_phase(phase);
    }

    /// Reset phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Phase step per sample for a given frequency.
    #[inline]
    pub fn increment(&self, tune: f64) -> f64 {
        TAU * tune / self.sample_rate
    }

    /// Evaluate the wave at the current phase, then advance the phase.
    #[inline]
    pub fn advance(&mut self, settings: &OscSettings) -> f64 {
        let value = shape(settings, self.phase);
        self.phase = wrap_phase(self.phase + self.increment(settings.tune));
        value
    }
}

/// Raw waveform value at `phase` (radians, already wrapped).
#[inline]
pub fn shape(settings: &OscSettings, phase: f64) -> f64 {
    match settings.wave {
        WaveType::Sine => {
            let c = settings.color;
            let a = 1.0 - c;
            // a² + c² > 0 for any real c, the normalizer never vanishes
            (a * sin(phase) + c * cos(phase)) / sqrt(a * a + c * c)
        }
        WaveType::Square => {
            if phase < TAU * settings.width {
                1.0
            } else {
                -1.0
            }
        }
        WaveType::Saw => {
            let ramp = phase / PI - 1.0;
            let harmonic = settings.depth * 0.5 * sin(2.0 * phase);
            (ramp + harmonic).clamp(-1.0, 1.0)
        }
        WaveType::Silent => 0.0,
    }
}
