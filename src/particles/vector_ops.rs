//! Elementwise operations on equal-length `f64` slices.
//!
//! Blocks of four values go through `wide::f64x4`, the remainder is processed in scalar.
//! Every operation performs exactly one IEEE operation per element and step, so the results
//! are bit-identical to a plain scalar loop (no fused multiply-add).
use wide::f64x4;

const LANES: usize = 4;

#[inline(always)]
fn load(s: &[f64], i: usize) -> f64x4 {
    f64x4::new([s[i], s[i + 1], s[i + 2], s[i + 3]])
}

#[inline(always)]
fn store(v: f64x4, d: &mut [f64], i: usize) {
    d[i..i + LANES].copy_from_slice(&v.to_array());
}

/// `dst = src`
#[inline]
pub fn copy(src: &[f64], dst: &mut [f64]) {
    dst.copy_from_slice(src);
}

/// `y += alpha * x`
#[inline]
pub fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    debug_assert_eq!(x.len(), y.len());
    let n = y.len();
    let a = f64x4::splat(alpha);
    let mut i = 0;
    while i + LANES <= n {
        store(load(y, i) + a * load(x, i), y, i);
        i += LANES;
    }
    for j in i..n {
        y[j] += alpha * x[j];
    }
}

/// `out = a * b`
#[inline]
pub fn mul(a: &[f64], b: &[f64], out: &mut [f64]) {
    debug_assert!(a.len() == out.len() && b.len() == out.len());
    let n = out.len();
    let mut i = 0;
    while i + LANES <= n {
        store(load(a, i) * load(b, i), out, i);
        i += LANES;
    }
    for j in i..n {
        out[j] = a[j] * b[j];
    }
}

/// `out += a * b`
#[inline]
pub fn add_product(a: &[f64], b: &[f64], out: &mut [f64]) {
    debug_assert!(a.len() == out.len() && b.len() == out.len());
    let n = out.len();
    let mut i = 0;
    while i + LANES <= n {
        store(load(out, i) + load(a, i) * load(b, i), out, i);
        i += LANES;
    }
    for j in i..n {
        out[j] += a[j] * b[j];
    }
}

/// `out = v * sqrt(v)`, i.e. `v^1.5` for non-negative `v`.
#[inline]
pub fn pow_three_halves(v: &[f64], out: &mut [f64]) {
    debug_assert_eq!(v.len(), out.len());
    let n = out.len();
    let mut i = 0;
    while i + LANES <= n {
        let x = load(v, i);
        store(x * x.sqrt(), out, i);
        i += LANES;
    }
    for j in i..n {
        out[j] = v[j] * v[j].sqrt();
    }
}

/// `out = alpha * num / den`
#[inline]
pub fn scaled_div(alpha: f64, num: &[f64], den: &[f64], out: &mut [f64]) {
    debug_assert!(num.len() == out.len() && den.len() == out.len());
    let n = out.len();
    let a = f64x4::splat(alpha);
    let mut i = 0;
    while i + LANES <= n {
        store(a * load(num, i) / load(den, i), out, i);
        i += LANES;
    }
    for j in i..n {
        out[j] = alpha * num[j] / den[j];
    }
}

/// Sequential left-to-right sum.
#[inline]
pub fn sum(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |acc, &x| acc + x)
}
