//! Spectral estimator benchmarks: FFT path against the direct DFT.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lib_dsp::psd::{SpectralEstimator, SpectrumConfig};
use lib_dsp::window::WindowType;
use lib_linecode::{encode, tile_str};
use lib_types::{Scheme, Volts};

fn bench_psd(c: &mut Criterion) {
    let mut group = c.benchmark_group("psd");

    let bits = tile_str("1100001000000001", 32).unwrap();
    let samples = encode(Scheme::Manchester, &bits, Volts(5.0)).unwrap().samples;

    for pad_length in [512, 1024, 4096].iter() {
        let config = SpectrumConfig {
            pad_length: *pad_length,
            window: WindowType::Hann,
        };

        group.bench_with_input(
            BenchmarkId::new("fft", pad_length),
            &samples,
            |b, s| {
                let mut estimator = SpectralEstimator::new(config);
                b.iter(|| estimator.estimate(black_box(s)).unwrap());
            },
        );

        // Direct DFT is quadratic; skip the largest size.
        if *pad_length <= 1024 {
            group.bench_with_input(
                BenchmarkId::new("direct", pad_length),
                &samples,
                |b, s| {
                    let estimator = SpectralEstimator::new(config);
                    b.iter(|| estimator.estimate_direct(black_box(s)).unwrap());
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_psd);
criterion_main!(benches);
