#![no_main]

use arbitrary::Arbitrary;
use fsig_fft::{SignalError, SignalOptions, convolve_real, correlate_real, pearson_correlate};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct PairInput {
    h: Vec<f64>,
    x: Vec<f64>,
}

fuzz_target!(|input: PairInput| {
    let h = input.h.into_iter().take(64).collect::<Vec<_>>();
    let x = input.x.into_iter().take(512).collect::<Vec<_>>();
    let opts = SignalOptions::default();

    if let Ok(y) = convolve_real(&h, &x, &opts) {
        assert_eq!(y.len(), h.len() + x.len() - 1);
    }
    if let Ok(y) = correlate_real(&h, &x, &opts) {
        assert_eq!(y.len(), h.len() + x.len() - 1);
    }
    match pearson_correlate(&h, &x, &opts) {
        Ok(y) => assert_eq!(y.len(), x.len() - h.len() + 1),
        Err(SignalError::InvalidLength { .. } | SignalError::DegenerateWindow { .. }) => {}
        Err(other) => panic!("unexpected error {other:?}"),
    }
});
