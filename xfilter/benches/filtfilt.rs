use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dasp_signal::{rate, Signal};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xfilter::kernel::KernelLifecycle;
use xfilter::signal::filter::design::{ButterConfig, ButterKernel, Cutoff};
use xfilter::signal::filter::{FiltFiltConfig, FiltFiltKernel};
use xfilter::signal::traits::{FiltFilt1D, IirDesign};
use xfilter::ButterworthFilter;

///
/// 4th order Butterworth bandpass filtfilt over 10 seconds of a 25Hz sine sampled at 1666Hz,
/// repeated 100 times.
///
fn butter_filtfilt_100x(c: &mut Criterion) {
    let sample_hz = 1666.;
    let ba = ButterKernel::try_new(ButterConfig {
        order: 4,
        cutoff: Cutoff::Bandpass(10., 50.),
        fs: sample_hz,
    })
    .expect("valid butterworth config")
    .run_alloc()
    .expect("design should succeed");
    let kernel =
        FiltFiltKernel::try_new(FiltFiltConfig::new(ba.b, ba.a)).expect("valid filtfilt config");

    let seconds = 10;
    let mut signal = rate(sample_hz).const_hz(25.).sine();
    let sin_wave: Vec<f64> = (0..seconds * sample_hz as usize)
        .map(|_| signal.next())
        .collect::<Vec<_>>();
    let sin_wave = (0..100).flat_map(|_| sin_wave.clone()).collect::<Vec<_>>();

    c.bench_function("filtfilt_100x", |b| {
        b.iter(|| {
            black_box(
                kernel
                    .run_alloc(sin_wave.as_slice())
                    .expect("benchmark input should satisfy filtfilt preconditions"),
            );
        });
    });
}

///
/// 2nd order Butterworth lowpass over 64 channels of 20k uniformly random samples.
///
/// Lanes run in parallel when the `rayon` feature is enabled.
///
fn butter_lowpass_multichannel(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let x = Array2::from_shape_fn((64, 20_000), |_| rng.random_range(-1.0f64..1.0));
    let config = ButterConfig {
        order: 2,
        cutoff: Cutoff::Lowpass(100.),
        fs: 1000.,
    };

    c.bench_function("lowpass_64ch", |b| {
        b.iter(|| {
            black_box(
                x.lowpass(&config, Some(1))
                    .expect("benchmark input should satisfy lowpass preconditions"),
            );
        });
    });
}

criterion_group!(benches, butter_filtfilt_100x, butter_lowpass_multichannel);
criterion_main!(benches);
