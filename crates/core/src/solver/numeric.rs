//! Vector kernels used by the conjugate gradient iteration
//!
//! All vectors are flat slices of equal length. Elementwise kernels run on the
//! rayon pool; reductions are parallel too, so the last bits of a dot product
//! may differ between runs on different thread counts. Length mismatches panic.

use rayon::prelude::*;

/// `Σ aᵢ bᵢ`
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "dot length mismatch");
    a.par_iter().zip(b.par_iter()).map(|(x, y)| x * y).sum()
}

/// `maxᵢ |xᵢ|`, zero for an empty vector and NaN if any entry is NaN
#[must_use]
pub fn norm_inf(x: &[f64]) -> f64 {
    x.par_iter()
        .map(|v| v.abs())
        .reduce(|| 0.0, |a, b| if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) })
}

/// `out = a + c·b`
pub fn combine(a: &[f64], b: &[f64], c: f64, out: &mut [f64]) {
    assert!(
        a.len() == b.len() && b.len() == out.len(),
        "combine length mismatch: a {}, b {}, out {}",
        a.len(),
        b.len(),
        out.len()
    );
    out.par_iter_mut()
        .zip(a.par_iter().zip(b.par_iter()))
        .for_each(|(o, (&ai, &bi))| *o = ai + c * bi);
}

/// `x += c·y`
pub fn add_scaled(x: &mut [f64], c: f64, y: &[f64]) {
    assert_eq!(x.len(), y.len(), "vector length mismatch");
    x.par_iter_mut()
        .zip(y.par_iter())
        .for_each(|(xi, &yi)| *xi += c * yi);
}

/// `x = y + c·x`
pub fn scale_and_add(x: &mut [f64], c: f64, y: &[f64]) {
    assert_eq!(x.len(), y.len(), "vector length mismatch");
    x.par_iter_mut()
        .zip(y.par_iter())
        .for_each(|(xi, &yi)| *xi = yi + c * *xi);
}

/// Clamp `value` into `[lo, hi]`, checking the lower bound first
#[must_use]
pub fn clip<T: PartialOrd>(value: T, lo: T, hi: T) -> T {
    let value = if value < lo { lo } else { value };
    if value > hi {
        hi
    } else {
        value
    }
}
