#![no_main]

use arbitrary::Arbitrary;
use fsig_fft::{Complex64, KernelKind, SignalError, SignalOptions, fft_forward, ifft};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FftInput {
    kernel: u8,
    inverse: bool,
    samples: Vec<(f64, f64)>,
}

fuzz_target!(|input: FftInput| {
    let kernel = KernelKind::ALL[usize::from(input.kernel) % KernelKind::ALL.len()];
    let opts = SignalOptions::default().with_kernel(kernel);
    let signal = input
        .samples
        .iter()
        .take(1024)
        .map(|&(re, im)| Complex64::new(re, im))
        .collect::<Vec<_>>();
    let result = if input.inverse {
        ifft(&signal, &opts)
    } else {
        fft_forward(&signal, &opts)
    };
    match result {
        Ok(spectrum) => assert_eq!(spectrum.len(), signal.len()),
        Err(SignalError::InvalidLength { len, .. }) => {
            assert_eq!(len, signal.len());
            assert!(!signal.len().is_power_of_two());
        }
        Err(other) => panic!("unexpected error {other:?}"),
    }
});
