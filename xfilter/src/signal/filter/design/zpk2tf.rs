use super::{BaFormatFilter, ZpkFormatFilter};
use nalgebra::Complex;
use ndarray::{array, Array1};
use num_traits::{Float, NumAssign};
use xfilter_core::num_rs::{convolve, ConvolveMode};
use xfilter_core::Result;

/// Expand zeros, poles and gain into numerator and denominator polynomials.
///
/// Roots are multiplied out by repeated convolution with `[1, -r]`; complex roots are expected in
/// conjugate pairs, so only the real parts of the products are kept.
///
/// ```
/// use nalgebra::Complex;
/// use xfilter::signal::filter::design::{zpk2tf, ZpkFormatFilter};
///
/// let zpk = ZpkFormatFilter {
///     z: vec![Complex::new(-1.0f64, 0.0)],
///     p: vec![Complex::new(0.0, 0.5), Complex::new(0.0, -0.5)],
///     k: 2.0,
/// };
/// let ba = zpk2tf(&zpk).unwrap();
/// assert_eq!(ba.b, vec![2.0, 2.0]);
/// assert_eq!(ba.a, vec![1.0, 0.0, 0.25]);
/// ```
pub fn zpk2tf<F>(zpk: &ZpkFormatFilter<F>) -> Result<BaFormatFilter<F>>
where
    F: Float + NumAssign,
{
    let gain = Complex::new(zpk.k, F::zero());
    let b = poly(&zpk.z)?.iter().map(|c| (*c * gain).re).collect();
    let a = poly(&zpk.p)?.iter().map(|c| c.re).collect();
    Ok(BaFormatFilter { b, a })
}

/// Monic polynomial with the given roots, highest power first.
pub(crate) fn poly<F>(roots: &[Complex<F>]) -> Result<Array1<Complex<F>>>
where
    F: Float + NumAssign,
{
    let one = Complex::new(F::one(), F::zero());
    roots.iter().try_fold(array![one], |acc, r| {
        convolve(acc.view(), array![one, -*r].view(), ConvolveMode::Full)
    })
}
