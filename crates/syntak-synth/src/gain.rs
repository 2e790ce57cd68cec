//! Volume to device gain mapping.
//!
//! Some outputs expose a hardware gain control in decibels. The linear
//! `volume` parameter maps onto it as `20 * log10(volume)`, clamped to the
//! control's range. Volumes at or below [`SILENCE_THRESHOLD`] map straight to
//! the minimum so `log10(0)` is never evaluated.

use libm::log10;

/// Volumes at or below this are treated as silence.
pub const SILENCE_THRESHOLD: f64 = 0.0001;

/// Convert linear volume to a gain in dB within `[min_db, max_db]`.
///
/// # Example
///
/// ```rust
/// use syntak_synth::gain::volume_to_db;
///
/// assert_eq!(volume_to_db(1.0, -80.0, 6.0), 0.0);
/// assert_eq!(volume_to_db(0.0, -80.0, 6.0), -80.0);
/// ```
pub fn volume_to_db(volume: f64, min_db: f64, max_db: f64) -> f64 {
    if volume.is_nan() || volume <= SILENCE_THRESHOLD {
        return min_db;
    }
    (20.0 * log10(volume)).clamp(min_db, max_db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unity_is_zero_db() {
        assert_eq!(volume_to_db(1.0, -80.0, 6.0), 0.0);
    }

    #[test]
    fn test_half_is_minus_six() {
        assert!((volume_to_db(0.5, -80.0, 6.0) + 6.0206).abs() < 1e-3);
    }

    #[test]
    fn test_silence_maps_to_minimum() {
        assert_eq!(volume_to_db(0.0, -80.0, 6.0), -80.0);
        assert_eq!(volume_to_db(0.00005, -80.0, 6.0), -80.0);
        assert_eq!(volume_to_db(-1.0, -80.0, 6.0), -80.0);
    }

    #[test]
    fn test_clamps_into_device_range() {
        // 0.001 is -60 dB, below a -40 dB floor
        assert_eq!(volume_to_db(0.001, -40.0, 0.0), -40.0);
        assert_eq!(volume_to_db(2.0, -40.0, 0.0), 0.0);
    }
}
