use super::{lit, ZpkFormatFilter};
use alloc::vec::Vec;
use nalgebra::Complex;
use num_traits::{Float, FloatConst};
use xfilter_core::{Error, Result};

/// Analog Butterworth lowpass prototype.
///
/// Returns `order` poles spread evenly over the left half of the unit circle, no finite zeros and
/// unit gain, so the prototype has a -3 dB corner at 1 rad/s. For odd orders the middle pole is
/// exactly `-1`.
///
/// # Errors
/// [`Error::InvalidOrder`] when `order < 1`.
///
/// ```
/// use xfilter::signal::filter::design::buttap;
///
/// let proto = buttap::<f64>(3).unwrap();
/// assert!(proto.z.is_empty());
/// assert_eq!(proto.p[1].re, -1.0);
/// assert!(proto.p.iter().all(|p| p.re < 0.0));
/// ```
pub fn buttap<F>(order: usize) -> Result<ZpkFormatFilter<F>>
where
    F: Float + FloatConst,
{
    if order < 1 {
        return Err(Error::InvalidOrder { order });
    }
    let n = order as isize;
    let denom = lit::<F>(2.0 * order as f64);
    let p = (0..n)
        .map(|k| {
            let m = lit::<F>((2 * k + 1 - n) as f64);
            let theta = F::PI() * m / denom;
            -Complex::new(theta.cos(), theta.sin())
        })
        .collect::<Vec<_>>();
    Ok(ZpkFormatFilter {
        z: Vec::new(),
        p,
        k: F::one(),
    })
}
