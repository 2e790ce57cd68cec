//! Parameter store for the synthesis engine.
//!
//! The nine synthesis parameters are addressed by [`ParamId`], a closed enum,
//! so the engine gets exhaustive matching everywhere. Names only appear at the
//! UI-facing boundary via [`ParamId::from_name`].
//!
//! [`SynthParams`] holds every value in its own atomic cell. The UI thread
//! writes, the generation thread reads once per sample. Each field is atomic
//! on its own; a multi-parameter update may be observed half-applied for a few
//! samples, which is fine for a control-rate signal.
//!
//! # Example
//!
//! ```rust
//! use syntak_synth::{ParamId, SynthParams};
//!
//! let params = SynthParams::new();
//! params.set(ParamId::Tune, 5000.0);
//! assert_eq!(params.get(ParamId::Tune), 1000.0);
//!
//! // Unknown names are ignored
//! params.set_by_name("cutoff", 0.3);
//! assert_eq!(params.get_by_name("cutoff"), 0.0);
//! ```

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

/// Identifier for one of the nine synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Output gain, linear.
    Volume,
    /// Oscillator frequency in Hz (signed).
    Tune,
    /// Square wave duty cycle.
    Width,
    /// Sine/cosine mix for the sine wave.
    Color,
    /// Second-harmonic amount for the saw wave.
    Depth,
    /// Envelope attack time in seconds.
    Attack,
    /// Envelope decay time in seconds.
    Decay,
    /// Envelope sustain level.
    Sustain,
    /// Envelope release time in seconds.
    Release,
}

impl ParamId {
    /// All parameters in their canonical order.
    pub const ALL: [ParamId; 9] = [
        ParamId::Volume,
        ParamId::Tune,
        ParamId::Width,
        ParamId::Color,
        ParamId::Depth,
        ParamId::Attack,
        ParamId::Decay,
        ParamId::Sustain,
        ParamId::Release,
    ];

    /// Number of parameters.
    pub const COUNT: usize = Self::ALL.len();

    /// Look up a parameter by name, ignoring ASCII case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }

    /// Canonical lowercase key.
    pub const fn name(self) -> &'static str {
        match self {
            ParamId::Volume => "volume",
            ParamId::Tune => "tune",
            ParamId::Width => "width",
            ParamId::Color => "color",
            ParamId::Depth => "depth",
            ParamId::Attack => "attack",
            ParamId::Decay => "decay",
            ParamId::Sustain => "sustain",
            ParamId::Release => "release",
        }
    }

    /// Position in [`ParamId::ALL`], also the storage slot.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Range, default, and unit of this parameter.
    pub const fn descriptor(self) -> ParamDescriptor {
        match self {
            ParamId::Volume => ParamDescriptor::new("volume", 0.0, 1.0, 1.0, ParamUnit::Linear),
            ParamId::Tune => {
                ParamDescriptor::new("tune", -1000.0, 1000.0, 440.0, ParamUnit::Hertz)
            }
            ParamId::Width => ParamDescriptor::new("width", 0.0, 1.0, 1.0, ParamUnit::DutyCycle),
            ParamId::Color => ParamDescriptor::new("color", 0.0, 1.0, 1.0, ParamUnit::Linear),
            ParamId::Depth => ParamDescriptor::new("depth", 0.0, 1.0, 1.0, ParamUnit::Linear),
            ParamId::Attack => ParamDescriptor::new("attack", 0.0, 2.0, 0.1, ParamUnit::Seconds),
            ParamId::Decay => ParamDescriptor::new("decay", 0.0, 2.0, 0.1, ParamUnit::Seconds),
            ParamId::Sustain => {
                ParamDescriptor::new("sustain", 0.0, 1.0, 1.0, ParamUnit::Linear)
            }
            ParamId::Release => {
                ParamDescriptor::new("release", 0.0, 2.0, 0.1, ParamUnit::Seconds)
            }
        }
    }
}

impl core::fmt::Display for ParamId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Display unit of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Unitless linear amount.
    Linear,
    /// Frequency in Hz.
    Hertz,
    /// Time in seconds.
    Seconds,
    /// Fraction of a period.
    DutyCycle,
}

impl ParamUnit {
    /// Short suffix for display.
    pub const fn suffix(self) -> &'static str {
        match self {
            ParamUnit::Linear => "",
            ParamUnit::Hertz => "Hz",
            ParamUnit::Seconds => "s",
            ParamUnit::DutyCycle => "duty",
        }
    }
}

/// Static metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Canonical key.
    pub name: &'static str,
    /// Minimum value (inclusive).
    pub min: f64,
    /// Maximum value (inclusive).
    pub max: f64,
    /// Initial value.
    pub default: f64,
    /// Display unit.
    pub unit: ParamUnit,
}

impl ParamDescriptor {
    const fn new(name: &'static str, min: f64, max: f64, default: f64, unit: ParamUnit) -> Self {
        Self {
            name,
            min,
            max,
            default,
            unit,
        }
    }

    /// Clamp a value into the documented range. NaN maps to the default.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Map a plain value to its position in `[0, 1]`.
    ///
    /// This is the knob-position mapping: a rotary control spanning its full
    /// travel covers `min..=max` linearly.
    pub fn normalize(&self, value: f64) -> f64 {
        (self.clamp(value) - self.min) / (self.max - self.min)
    }

    /// Map a `[0, 1]` position back to a plain value. Input is clamped first.
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let n = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        self.min + n * (self.max - self.min)
    }
}

/// Oscillator wave shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaveType {
    /// Sine/cosine blend, shaped by `color`.
    #[default]
    Sine,
    /// Variable duty-cycle square, shaped by `width`.
    Square,
    /// Ramp plus second harmonic, shaped by `depth`.
    Saw,
    /// Produced by unrecognized wave names; renders zeros.
    Silent,
}

impl WaveType {
    /// Parse a wave name (`"sine"`, `"square"`, `"saw"`), ignoring ASCII case.
    ///
    /// Anything else yields [`WaveType::Silent`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("sine") {
            WaveType::Sine
        } else if name.eq_ignore_ascii_case("square") {
            WaveType::Square
        } else if name.eq_ignore_ascii_case("saw") {
            WaveType::Saw
        } else {
            WaveType::Silent
        }
    }

    /// Lowercase name, `"silent"` for [`WaveType::Silent`].
    pub const fn name(self) -> &'static str {
        match self {
            WaveType::Sine => "sine",
            WaveType::Square => "square",
            WaveType::Saw => "saw",
            WaveType::Silent => "silent",
        }
    }

    const fn to_bits(self) -> u8 {
        match self {
            WaveType::Sine => 0,
            WaveType::Square => 1,
            WaveType::Saw => 2,
            WaveType::Silent => 3,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => WaveType::Sine,
            1 => WaveType::Square,
            2 => WaveType::Saw,
            _ => WaveType::Silent,
        }
    }
}

impl core::fmt::Display for WaveType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Plain copy of all parameter values at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Linear output gain.
    pub volume: f64,
    /// Oscillator frequency in Hz.
    pub tune: f64,
    /// Square duty cycle.
    pub width: f64,
    /// Sine/cosine mix.
    pub color: f64,
    /// Saw second-harmonic mix.
    pub depth: f64,
    /// Attack seconds.
    pub attack: f64,
    /// Decay seconds.
    pub decay: f64,
    /// Sustain level.
    pub sustain: f64,
    /// Release seconds.
    pub release: f64,
    /// Selected wave shape.
    pub wave: WaveType,
    /// When set, the envelope is forced to 1.0.
    pub test_envelope: bool,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            volume: ParamId::Volume.descriptor().default,
            tune: ParamId::Tune.descriptor().default,
            width: ParamId::Width.descriptor().default,
            color: ParamId::Color.descriptor().default,
            depth: ParamId::Depth.descriptor().default,
            attack: ParamId::Attack.descriptor().default,
            decay: ParamId::Decay.descriptor().default,
            sustain: ParamId::Sustain.descriptor().default,
            release: ParamId::Release.descriptor().default,
            wave: WaveType::default(),
            test_envelope: false,
        }
    }
}

/// Shared, lock-free parameter store.
///
/// Values are stored as `f64` bit patterns in [`AtomicU64`] cells indexed by
/// [`ParamId::index`]. Every write clamps before storing.
#[derive(Debug)]
pub struct SynthParams {
    values: [AtomicU64; ParamId::COUNT],
    wave: AtomicU8,
    test_envelope: AtomicBool,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthParams {
    /// Create a store holding every parameter's default.
    pub fn new() -> Self {
        Self {
            values: ParamId::ALL.map(|id| AtomicU64::new(id.descriptor().default.to_bits())),
            wave: AtomicU8::new(WaveType::default().to_bits()),
            test_envelope: AtomicBool::new(false),
        }
    }

    /// Clamp and store a value. Returns the stored value.
    pub fn set(&self, id: ParamId, value: f64) -> f64 {
        let clamped = id.descriptor().clamp(value);
        self.values[id.index()].store(clamped.to_bits(), Ordering::Release);
        #[cfg(feature = "tracing")]
        tracing::trace!(param = id.name(), value = clamped, "parameter set");
        clamped
    }

    /// Current value of a parameter.
    #[inline]
    pub fn get(&self, id: ParamId) -> f64 {
        f64::from_bits(self.values[id.index()].load(Ordering::Acquire))
    }

    /// Set by name. Unknown names are a no-op and return `None`.
    pub fn set_by_name(&self, name: &str, value: f64) -> Option<f64> {
        ParamId::from_name(name).map(|id| self.set(id, value))
    }

    /// Get by name. Unknown names read as `0.0`.
    pub fn get_by_name(&self, name: &str) -> f64 {
        ParamId::from_name(name).map_or(0.0, |id| self.get(id))
    }

    /// Select the wave shape.
    pub fn set_wave(&self, wave: WaveType) {
        self.wave.store(wave.to_bits(), Ordering::Release);
    }

    /// Currently selected wave shape.
    #[inline]
    pub fn wave(&self) -> WaveType {
        WaveType::from_bits(self.wave.load(Ordering::Acquire))
    }

    /// Force the envelope to 1.0 (deterministic oscillator testing).
    pub fn set_test_envelope(&self, enabled: bool) {
        self.test_envelope.store(enabled, Ordering::Release);
    }

    /// Whether the envelope override is active.
    pub fn test_envelope(&self) -> bool {
        self.test_envelope.load(Ordering::Acquire)
    }

    /// Read every field once.
    ///
    /// Fields are loaded one after another; the result is per-field atomic,
    /// not transactional across fields.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            volume: self.get(ParamId::Volume),
            tune: self.get(ParamId::Tune),
            width: self.get(ParamId::Width),
            color: self.get(ParamId::Color),
            depth: self.get(ParamId::Depth),
            attack: self.get(ParamId::Attack),
            decay: self.get(ParamId::Decay),
            sustain: self.get(ParamId::Sustain),
            release: self.get(ParamId::Release),
            wave: self.wave(),
            test_envelope: self.test_envelope(),
        }
    }
}
