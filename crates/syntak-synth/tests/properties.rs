//! Property-based tests for the synthesis core.

use proptest::prelude::*;
use syntak_synth::{Adsr, ParamId, Renderer, SynthParams, WaveType, scope};

fn any_param() -> impl Strategy<Value = ParamId> {
    (0usize..ParamId::COUNT).prop_map(|i| ParamId::ALL[i])
}

fn any_wave() -> impl Strategy<Value = WaveType> {
    prop_oneof![
        Just(WaveType::Sine),
        Just(WaveType::Square),
        Just(WaveType::Saw),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every write lands inside the documented range.
    #[test]
    fn set_clamps(id in any_param(), value in -1.0e6f64..1.0e6) {
        let params = SynthParams::new();
        params.set(id, value);
        let d = id.descriptor();
        prop_assert_eq!(params.get(id), value.clamp(d.min, d.max));
    }

    /// Saw output never leaves [-1, 1] for any depth or frequency.
    #[test]
    fn saw_bounded(depth in 0.0f64..=1.0, tune in -1000.0f64..=1000.0) {
        let params = SynthParams::new();
        params.set_wave(WaveType::Saw);
        params.set_test_envelope(true);
        params.set(ParamId::Depth, depth);
        params.set(ParamId::Tune, tune);
        let block = Renderer::new().render(&params, 1024);
        prop_assert!(block.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    /// With volume <= 1 every shape stays within [-1, 1] through the envelope.
    #[test]
    fn output_bounded(
        wave in any_wave(),
        volume in 0.0f64..=1.0,
        tune in -1000.0f64..=1000.0,
        shape in 0.0f64..=1.0,
        attack in 0.0f64..=2.0,
        decay in 0.0f64..=2.0,
        sustain in 0.0f64..=1.0,
        release in 0.0f64..=2.0,
    ) {
        let params = SynthParams::new();
        params.set_wave(wave);
        for (id, v) in [
            (ParamId::Volume, volume),
            (ParamId::Tune, tune),
            (ParamId::Width, shape),
            (ParamId::Color, shape),
            (ParamId::Depth, shape),
            (ParamId::Attack, attack),
            (ParamId::Decay, decay),
            (ParamId::Sustain, sustain),
            (ParamId::Release, release),
        ] {
            params.set(id, v);
        }
        let block = Renderer::new().render(&params, 512);
        prop_assert!(scope::peak(&block) <= 1.0 + 1e-6);
    }

    /// Splitting a render into blocks does not change the waveform.
    #[test]
    fn block_split_continuity(
        wave in any_wave(),
        tune in -1000.0f64..=1000.0,
        block in 1usize..300,
        blocks in 1usize..8,
    ) {
        let params = SynthParams::new();
        params.set_wave(wave);
        params.set_test_envelope(true);
        params.set(ParamId::Tune, tune);

        let mut split = Renderer::new();
        let mut joined = Vec::with_capacity(block * blocks);
        for _ in 0..blocks {
            joined.extend(split.render(&params, block));
        }
        let single = Renderer::new().render(&params, block * blocks);
        for (a, b) in joined.iter().zip(&single) {
            prop_assert!((a - b).abs() < 1e-6);
        }
    }

    /// Envelope is always within [0, 1] and ends on sustain.
    #[test]
    fn envelope_unit_range(
        attack in 0.0f64..=2.0,
        decay in 0.0f64..=2.0,
        sustain in 0.0f64..=1.0,
        release in 0.0f64..=2.0,
        index in 0usize..4096,
    ) {
        let env = Adsr::new(attack, decay, sustain, release);
        let level = env.buffer_level(index, 4096);
        prop_assert!((0.0..=1.0).contains(&level));
        prop_assert_eq!(env.level_at(env.total_time()), sustain);
    }
}
