use super::BaFormatFilter;
use alloc::vec::Vec;
use ndarray::{array, Array1};
use num_traits::{Float, NumAssign};
use xfilter_core::num_rs::{convolve, ConvolveMode};
use xfilter_core::{Error, Result};

/// Digital filter from an analog transfer function via the bilinear transform.
///
/// `b` and `a` hold analog polynomial coefficients in `s`, highest power first. The substitution
/// `s = 2 fs (1 - z^-1) / (1 + z^-1)` is carried out by polynomial multiplication: with
/// `M = max(len(b), len(a)) - 1`, the coefficient of `s^i` contributes
/// `c_i (2 fs)^i (1 - z^-1)^i (1 + z^-1)^(M - i)`. Both results have `M + 1` coefficients and
/// are scaled so that `a[0] == 1`.
///
/// # Errors
/// Empty coefficients, a non-positive `fs`, or a transformed denominator with a zero leading
/// coefficient.
///
/// ```
/// use approx::assert_relative_eq;
/// use xfilter::signal::filter::design::bilinear;
///
/// // H(s) = 1 / (s + 1) sampled at fs = 0.5
/// let ba = bilinear(&[1.0f64], &[1.0, 1.0], 0.5).unwrap();
/// assert_relative_eq!(ba.b[0], 0.5);
/// assert_relative_eq!(ba.b[1], 0.5);
/// assert_relative_eq!(ba.a[0], 1.0);
/// assert_relative_eq!(ba.a[1], 0.0);
/// ```
pub fn bilinear<F>(b: &[F], a: &[F], fs: F) -> Result<BaFormatFilter<F>>
where
    F: Float + NumAssign,
{
    if b.is_empty() || a.is_empty() {
        return Err(Error::InvalidArg {
            arg: if b.is_empty() { "b" } else { "a" }.into(),
            reason: "analog coefficients must be non-empty.".into(),
        });
    }
    if !fs.is_finite() || fs <= F::zero() {
        return Err(Error::InvalidArg {
            arg: "fs".into(),
            reason: "sample rate must be a positive finite number.".into(),
        });
    }

    let m = b.len().max(a.len()) - 1;
    let fs2 = fs + fs;
    let bz = transform_poly(b, m, fs2)?;
    let az = transform_poly(a, m, fs2)?;

    let a0 = az[0];
    if a0 == F::zero() {
        return Err(Error::InvalidArg {
            arg: "a".into(),
            reason: "transformed denominator has a zero leading coefficient.".into(),
        });
    }
    Ok(BaFormatFilter {
        b: bz.iter().map(|c| *c / a0).collect(),
        a: az.iter().map(|c| *c / a0).collect(),
    })
}

/// Sum of `c_i (2 fs)^i (1 - z^-1)^i (1 + z^-1)^(m - i)` over the coefficients of `s^i`.
fn transform_poly<F>(coeffs: &[F], m: usize, fs2: F) -> Result<Vec<F>>
where
    F: Float + NumAssign,
{
    let mut out = Array1::from_elem(m + 1, F::zero());
    let mut scale = F::one();
    for (i, c) in coeffs.iter().rev().enumerate() {
        let term = binomial_product::<F>(i, m - i)?;
        let weight = *c * scale;
        out.iter_mut().zip(term.iter()).for_each(|(o, t)| *o += weight * *t);
        scale *= fs2;
    }
    Ok(out.to_vec())
}

/// Coefficients of `(1 - x)^minus (1 + x)^plus`, lowest power first.
fn binomial_product<F>(minus: usize, plus: usize) -> Result<Array1<F>>
where
    F: Float + NumAssign,
{
    let (one, neg) = (F::one(), -F::one());
    core::iter::repeat(array![one, neg])
        .take(minus)
        .chain(core::iter::repeat(array![one, one]).take(plus))
        .try_fold(array![one], |acc, f| {
            convolve(acc.view(), f.view(), ConvolveMode::Full)
        })
}
