//! Oscilloscope trace math.
//!
//! Maps a rendered snapshot onto a `width × height` canvas with the origin in
//! the top-left corner. The trace is auto-scaled so the loudest sample reaches
//! 45% of the canvas height above or below the centre line.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Fraction of the canvas height the peak sample is scaled to.
pub const PEAK_FILL: f32 = 0.45;

/// Pixels per unit amplitude used when the snapshot is silent.
pub const SILENT_SCALE: f32 = 50.0;

/// Largest absolute sample value, 0 for an empty slice.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}

/// Vertical pixels per unit amplitude for this snapshot.
pub fn scale_factor(samples: &[f32], height: f32) -> f32 {
    let max = peak(samples);
    if max > 0.0 {
        height * PEAK_FILL / max
    } else {
        SILENT_SCALE
    }
}

/// Canvas points `[x, y]`, one per sample.
///
/// Sample `i` lands at `x = i * width / len` and `y = height/2 - s * scale`.
pub fn trace(samples: &[f32], width: f32, height: f32) -> Vec<[f32; 2]> {
    let len = samples.len();
    if len == 0 {
        return Vec::new();
    }
    let scale = scale_factor(samples, height);
    let mid = height / 2.0;
    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| [i as f32 * width / len as f32, mid - s * scale])
        .collect()
}
