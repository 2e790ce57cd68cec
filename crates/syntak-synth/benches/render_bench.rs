//! Criterion benchmarks for the renderer
//!
//! Run with: cargo bench -p syntak-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use syntak_synth::{ParamId, Renderer, SynthParams, WaveType};

const BLOCK_SIZES: &[usize] = &[256, 512, 2048];

fn bench_render_waves(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render");

    let waves = [
        ("Sine", WaveType::Sine),
        ("Square", WaveType::Square),
        ("Saw", WaveType::Saw),
    ];

    for (name, wave) in &waves {
        for &block_size in BLOCK_SIZES {
            let params = SynthParams::new();
            params.set_wave(*wave);
            params.set(ParamId::Tune, 440.0);
            let mut renderer = Renderer::new();
            let mut out = vec![0.0f32; block_size];

            group.bench_with_input(
                BenchmarkId::new(*name, block_size),
                &block_size,
                |b, _| {
                    b.iter(|| {
                        renderer.render_into(&params, &mut out);
                        black_box(out[0])
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_render_waves);
criterion_main!(benches);
