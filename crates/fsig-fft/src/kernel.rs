//! Radix-2 transform kernels.
//!
//! Every kernel computes `y[k] = sum_t a[t] * omega^(k*t)` for a power-of-two
//! length `n`. The caller picks the direction through `omega`: a forward
//! transform uses `e^(+i*2*pi/n)` and the unnormalised inverse uses
//! `e^(-i*2*pi/n)`. Length validation happens before dispatch, so kernels
//! assume `input.len()` is a power of two.

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::SignalError;
use crate::helpers::{is_power_of_two, zeroed_buffer};

/// Transform direction encoded in the sign of the root's angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    /// Direction encoded by a root's angle; a real root counts as forward.
    #[must_use]
    pub fn of_root(omega: Complex64) -> Self {
        if omega.im < 0.0 {
            Self::Inverse
        } else {
            Self::Forward
        }
    }

    fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Inverse => -1.0,
        }
    }
}

/// Primitive `n`-th root of unity for `direction`.
#[must_use]
pub fn root_of_unity(n: usize, direction: Direction) -> Complex64 {
    let angle = direction.sign() * 2.0 * PI / n.max(1) as f64;
    Complex64::new(angle.cos(), angle.sin())
}

/// Kernel implementations selectable through `SignalOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    /// In-place bit-reversal butterflies.
    #[default]
    Iterative,
    /// Even/odd split with a fresh buffer per level.
    Recursive,
    /// Direct O(n^2) evaluation; a reference for the fast kernels.
    NaiveDft,
}

impl KernelKind {
    pub const ALL: [Self; 3] = [Self::Iterative, Self::Recursive, Self::NaiveDft];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Iterative => "iterative",
            Self::Recursive => "recursive",
            Self::NaiveDft => "naive_dft",
        }
    }
}

impl std::str::FromStr for KernelKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == raw)
            .ok_or_else(|| format!("unknown kernel `{raw}`"))
    }
}

pub trait TransformKernel {
    fn kind(&self) -> KernelKind;

    /// Unnormalised transform of a power-of-two length sequence.
    ///
    /// Any other length, zero included, fails with `InvalidLength`.
    fn transform(&self, input: &[Complex64], omega: Complex64)
    -> Result<Vec<Complex64>, SignalError>;
}

#[derive(Debug, Default)]
pub struct RecursiveRadix2;

impl TransformKernel for RecursiveRadix2 {
    fn kind(&self) -> KernelKind {
        KernelKind::Recursive
    }

    fn transform(
        &self,
        input: &[Complex64],
        omega: Complex64,
    ) -> Result<Vec<Complex64>, SignalError> {
        let n = ensure_power_of_two(input.len())?;
        if n == 1 {
            return Ok(input.to_vec());
        }

        let half = n / 2;
        let mut even = zeroed_buffer(half)?;
        let mut odd = zeroed_buffer(half)?;
        for (i, pair) in input.chunks_exact(2).enumerate() {
            even[i] = pair[0];
            odd[i] = pair[1];
        }

        let omega_squared = omega * omega;
        let y_even = self.transform(&even, omega_squared)?;
        let y_odd = self.transform(&odd, omega_squared)?;

        let mut output = zeroed_buffer(n)?;
        let mut twiddle = Complex64::new(1.0, 0.0);
        for i in 0..half {
            let product = twiddle * y_odd[i];
            output[i] = y_even[i] + product;
            output[i + half] = y_even[i] - product;
            twiddle *= omega;
        }
        Ok(output)
    }
}

#[derive(Debug, Default)]
pub struct IterativeRadix2;

impl TransformKernel for IterativeRadix2 {
    fn kind(&self) -> KernelKind {
        KernelKind::Iterative
    }

    fn transform(
        &self,
        input: &[Complex64],
        omega: Complex64,
    ) -> Result<Vec<Complex64>, SignalError> {
        let n = ensure_power_of_two(input.len())?;
        let mut data = zeroed_buffer(n)?;
        data.copy_from_slice(input);
        if n == 1 {
            return Ok(data);
        }

        bit_reverse_permute(&mut data);

        // stage_roots[s] is omega^(2^s): the root for blocks of length n >> s.
        let stages = n.trailing_zeros() as usize;
        let mut stage_roots = Vec::with_capacity(stages);
        let mut root = omega;
        for _ in 0..stages {
            stage_roots.push(root);
            root *= root;
        }

        let mut block = 2;
        while block <= n {
            let half = block / 2;
            let step = stage_roots[(n / block).trailing_zeros() as usize];
            for start in (0..n).step_by(block) {
                let mut twiddle = Complex64::new(1.0, 0.0);
                for k in 0..half {
                    let u = data[start + k];
                    let v = twiddle * data[start + k + half];
                    data[start + k] = u + v;
                    data[start + k + half] = u - v;
                    twiddle *= step;
                }
            }
            block *= 2;
        }
        Ok(data)
    }
}

fn ensure_power_of_two(len: usize) -> Result<usize, SignalError> {
    if is_power_of_two(len) {
        Ok(len)
    } else {
        Err(SignalError::not_power_of_two(len))
    }
}

fn bit_reverse_permute(data: &mut [Complex64]) {
    let n = data.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            data.swap(i, j);
        }
    }
}

#[derive(Debug, Default)]
pub struct NaiveDft;

impl TransformKernel for NaiveDft {
    fn kind(&self) -> KernelKind {
        KernelKind::NaiveDft
    }

    fn transform(
        &self,
        input: &[Complex64],
        omega: Complex64,
    ) -> Result<Vec<Complex64>, SignalError> {
        let n = ensure_power_of_two(input.len())?;
        let mut output = zeroed_buffer(n)?;
        // Exponents are reduced mod n, which relies on omega^n == 1.
        let mut powers = zeroed_buffer(n)?;
        let mut power = Complex64::new(1.0, 0.0);
        for slot in powers.iter_mut() {
            *slot = power;
            power *= omega;
        }
        for (k, out) in output.iter_mut().enumerate() {
            let mut acc = Complex64::new(0.0, 0.0);
            for (t, &value) in input.iter().enumerate() {
                acc += value * powers[(k * t) % n];
            }
            *out = acc;
        }
        Ok(output)
    }
}

static RECURSIVE: RecursiveRadix2 = RecursiveRadix2;
static ITERATIVE: IterativeRadix2 = IterativeRadix2;
static NAIVE: NaiveDft = NaiveDft;

#[must_use]
pub fn resolve_kernel(kind: KernelKind) -> &'static dyn TransformKernel {
    match kind {
        KernelKind::Iterative => &ITERATIVE,
        KernelKind::Recursive => &RECURSIVE,
        KernelKind::NaiveDft => &NAIVE,
    }
}
