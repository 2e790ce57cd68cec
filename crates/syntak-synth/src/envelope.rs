//! Buffer-relative ADSR envelope.
//!
//! The envelope runs its full attack → decay → release arc across every render
//! buffer instead of tracking note age. Sample `i` of an `n`-sample buffer sits
//! at envelope time `t = (i / n) * (attack + decay + release)`:
//!
//! ```text
//!  1.0 ┤   /\
//!      │  /  \______
//!  S   ┤ /          \
//!      │/            \
//!  0.0 ┼──────────────┴── (returns to S for t >= total)
//!       A    D      R
//! ```
//!
//! A stage of zero length is skipped, so the arc starts at the first stage
//! that has time in it: `attack == 0` starts at the decay peak (1.0), and with
//! attack and decay both zero the buffer opens on the release ramp from
//! `sustain`.

/// Attack/decay/sustain/release settings, times in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    /// Ramp from 0 to 1.
    pub attack: f64,
    /// Fall from 1 to `sustain`.
    pub decay: f64,
    /// Level held after the arc.
    pub sustain: f64,
    /// Fall from `sustain` to 0.
    pub release: f64,
}

impl Adsr {
    /// Create a new envelope setting.
    pub const fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Length of the attack-decay-release arc.
    #[inline]
    pub fn total_time(&self) -> f64 {
        self.attack + self.decay + self.release
    }

    /// Envelope level at time `t_env` within the arc.
    #[inline]
    pub fn level_at(&self, t_env: f64) -> f64 {
        let attack_end = self.attack;
        let decay_end = attack_end + self.decay;
        let release_end = decay_end + self.release;

        if t_env < attack_end {
            t_env / self.attack
        } else if t_env < decay_end {
            1.0 - ((t_env - attack_end) / self.decay) * (1.0 - self.sustain)
        } else if t_env < release_end {
            self.sustain * (1.0 - (t_env - decay_end) / self.release)
        } else {
            self.sustain
        }
    }

    /// Envelope level for sample `index` of a `len`-sample buffer.
    ///
    /// `len == 0` reads as the start of the arc.
    #[inline]
    pub fn buffer_level(&self, index: usize, len: usize) -> f64 {
        let position = if len == 0 {
            0.0
        } else {
            index as f64 / len as f64
        };
        self.level_at(position * self.total_time())
    }
}

impl Default for Adsr {
    fn default() -> Self {
        Self::new(0.1, 0.1, 1.0, 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_starts_at_zero_with_attack() {
        let env = Adsr::new(0.5, 0.2, 0.6, 0.3);
        assert_eq!(env.level_at(0.0), 0.0);
        assert_eq!(env.buffer_level(0, 1024), 0.0);
    }

    #[test]
    fn test_zero_attack_starts_at_peak() {
        let env = Adsr::new(0.0, 0.2, 0.4, 0.3);
        assert!((env.level_at(0.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_reaches_sustain_at_total_time() {
        let env = Adsr::new(0.5, 0.2, 0.6, 0.3);
        assert_eq!(env.level_at(env.total_time()), 0.6);
        assert_eq!(env.level_at(env.total_time() + 1.0), 0.6);
    }

    #[test]
    fn test_stage_boundaries() {
        let env = Adsr::new(1.0, 1.0, 0.5, 1.0);
        assert!((env.level_at(0.5) - 0.5).abs() < EPS);
        // Peak at end of attack
        assert!((env.level_at(1.0) - 1.0).abs() < EPS);
        // Halfway through decay
        assert!((env.level_at(1.5) - 0.75).abs() < EPS);
        // Start of release holds sustain
        assert!((env.level_at(2.0) - 0.5).abs() < EPS);
        // Halfway through release
        assert!((env.level_at(2.5) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_all_zero_times_hold_sustain() {
        let env = Adsr::new(0.0, 0.0, 0.8, 0.0);
        for i in 0..64 {
            assert_eq!(env.buffer_level(i, 64), 0.8);
        }
    }

    #[test]
    fn test_stays_in_unit_range() {
        let env = Adsr::new(0.3, 1.7, 0.2, 0.9);
        for i in 0..4096 {
            let level = env.buffer_level(i, 4096);
            assert!((0.0..=1.0).contains(&level), "level {level} at {i}");
        }
    }

    #[test]
    fn test_empty_buffer_is_start_of_arc() {
        let env = Adsr::default();
        assert_eq!(env.buffer_level(0, 0), 0.0);
    }
}
