//! 16-bit PCM conversion.
//!
//! The engine produces `f32` samples in `[-1, 1]`; outputs consume signed
//! 16-bit integers. Conversion is `round(s * 32767)`, clamped to
//! `-32767..=32767` so a renderer excursion past full scale saturates instead
//! of wrapping and the mapping stays symmetric around zero.

/// Sample byte order for serialized PCM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first (the default line format).
    #[default]
    Big,
    /// Least significant byte first (WAV, most sound cards).
    Little,
    /// Host order.
    Native,
}

impl ByteOrder {
    /// Parse `"big"`, `"little"`, or `"native"`, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "big" | "be" => Some(ByteOrder::Big),
            "little" | "le" => Some(ByteOrder::Little),
            "native" | "ne" => Some(ByteOrder::Native),
            _ => None,
        }
    }

    #[inline]
    fn bytes(self, sample: i16) -> [u8; 2] {
        match self {
            ByteOrder::Big => sample.to_be_bytes(),
            ByteOrder::Little => sample.to_le_bytes(),
            ByteOrder::Native => sample.to_ne_bytes(),
        }
    }
}

/// Output stream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count of the rendered signal (the engine renders mono).
    pub channels: u16,
    /// Byte order used where samples are serialized.
    pub byte_order: ByteOrder,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 1,
            byte_order: ByteOrder::Big,
        }
    }
}

impl PcmFormat {
    /// Playback time of `frames` frames.
    pub fn duration_of(&self, frames: usize) -> std::time::Duration {
        std::time::Duration::from_secs_f64(frames as f64 / f64::from(self.sample_rate))
    }
}

/// Largest 16-bit magnitude produced. `i16::MIN` is never emitted.
pub const FULL_SCALE: i16 = i16::MAX;

/// Convert one sample to 16-bit.
#[inline]
pub fn to_i16(sample: f32) -> i16 {
    let scaled = (sample * f32::from(FULL_SCALE)).round();
    if scaled.is_nan() {
        0
    } else {
        scaled.clamp(-f32::from(FULL_SCALE), f32::from(FULL_SCALE)) as i16
    }
}

/// Convert a block of samples; `out` must be at least as long as `samples`.
pub fn encode_block(samples: &[f32], out: &mut [i16]) {
    debug_assert!(out.len() >= samples.len());
    for (dst, &src) in out.iter_mut().zip(samples) {
        *dst = to_i16(src);
    }
}

/// Serialize 16-bit samples to bytes in the given order.
pub fn encode_bytes(samples: &[i16], order: ByteOrder) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        bytes.extend_from_slice(&order.bytes(s));
    }
    bytes
}

/// Convert a 16-bit sample back to `f32` in `[-1, 1]`.
///
/// `i16::MIN` from a foreign source reads as -1.0.
#[inline]
pub fn to_f32(sample: i16) -> f32 {
    (f32::from(sample) / f32::from(FULL_SCALE)).max(-1.0)
}
