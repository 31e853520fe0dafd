use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fsig_fft::{
    Complex64, KernelKind, SignalOptions, convolve_real, fft2d_forward, fft_forward,
    pearson_correlate,
};

fn chirp(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            (40.0 * t * t).sin() + 0.1 * (7.0 * t).cos()
        })
        .collect()
}

fn complex_chirp(n: usize) -> Vec<Complex64> {
    chirp(n).into_iter().map(|v| Complex64::new(v, 0.0)).collect()
}

fn bench_fft_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft_forward");
    for exp in [6usize, 10, 14] {
        let n = 1 << exp;
        let signal = complex_chirp(n);
        for kernel in [KernelKind::Iterative, KernelKind::Recursive] {
            let opts = SignalOptions::default().with_kernel(kernel);
            group.bench_with_input(BenchmarkId::new(kernel.name(), n), &signal, |b, signal| {
                b.iter(|| fft_forward(signal, &opts));
            });
        }
    }
    group.finish();
}

fn bench_fft2d(c: &mut Criterion) {
    let matrix = (0..64).map(|_| complex_chirp(64)).collect::<Vec<_>>();
    let opts = SignalOptions::default();
    c.bench_function("fft2d_forward_64x64", |b| {
        b.iter(|| fft2d_forward(&matrix, &opts));
    });
}

fn bench_convolve(c: &mut Criterion) {
    let h = chirp(63);
    let x = chirp(4000);
    let opts = SignalOptions::default();
    c.bench_function("convolve_real_63x4000", |b| {
        b.iter(|| convolve_real(&h, &x, &opts));
    });
}

fn bench_pearson(c: &mut Criterion) {
    let h = chirp(32);
    let x = chirp(2048);
    let opts = SignalOptions::default();
    c.bench_function("pearson_correlate_32x2048", |b| {
        b.iter(|| pearson_correlate(&h, &x, &opts));
    });
}

criterion_group!(
    benches,
    bench_fft_kernels,
    bench_fft2d,
    bench_convolve,
    bench_pearson
);
criterion_main!(benches);
