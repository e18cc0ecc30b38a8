//! Digital Butterworth IIR design.
//!
//! The design path mirrors the classic analog-prototype pipeline:
//! [`buttap`] builds the normalized lowpass prototype, [`band_transform`] moves it onto the
//! requested band, [`zpk2tf`] expands the roots into polynomials, and [`bilinear`] maps the
//! analog transfer function onto the unit circle. [`butter_ba`] composes the whole path, and
//! [`lowpass_coeffs`], [`highpass_coeffs`] and [`bandpass_coeffs`] are the stable entry points.

use crate::kernel::ConfigError;
use alloc::vec::Vec;
use log::debug;
use nalgebra::Complex;
use num_traits::{Float, FloatConst, NumAssign, NumCast};
use xfilter_core::{Error, Result};

mod band;
mod bilinear;
mod buttap;
mod cache;
mod kernels;
mod relative_degree;
mod zpk2tf;

pub use band::*;
pub use bilinear::*;
pub use buttap::*;
pub use cache::*;
pub use kernels::*;
pub use zpk2tf::*;

pub(crate) use relative_degree::relative_degree;

const OUT_OF_BAND: &str =
    "cutoff frequencies must lie strictly between 0 and the Nyquist frequency";

/// Pass band of a Butterworth design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterBandType {
    /// Pass frequencies below the cutoff.
    Lowpass,
    /// Pass frequencies above the cutoff.
    Highpass,
    /// Pass frequencies between the two cutoffs.
    Bandpass,
}

impl FilterBandType {
    /// Lower-case band name, as used in response descriptions.
    pub fn name(&self) -> &'static str {
        match self {
            FilterBandType::Lowpass => "lowpass",
            FilterBandType::Highpass => "highpass",
            FilterBandType::Bandpass => "bandpass",
        }
    }
}

/// Cutoff specification, in the units of the sample rate unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff<F> {
    /// Single lowpass corner.
    Lowpass(F),
    /// Single highpass corner.
    Highpass(F),
    /// `(low, high)` band edges.
    Bandpass(F, F),
}

impl<F> Cutoff<F>
where
    F: Float,
{
    /// Default cutoff for a band at a sample rate of `1.0`: `0.25` for lowpass and highpass,
    /// `(0.125, 0.375)` for bandpass.
    pub fn default_for(band: FilterBandType) -> Self {
        match band {
            FilterBandType::Lowpass => Cutoff::Lowpass(lit(0.25)),
            FilterBandType::Highpass => Cutoff::Highpass(lit(0.25)),
            FilterBandType::Bandpass => Cutoff::Bandpass(lit(0.125), lit(0.375)),
        }
    }

    /// Band this cutoff selects.
    pub fn band(&self) -> FilterBandType {
        match self {
            Cutoff::Lowpass(_) => FilterBandType::Lowpass,
            Cutoff::Highpass(_) => FilterBandType::Highpass,
            Cutoff::Bandpass(..) => FilterBandType::Bandpass,
        }
    }

    /// Divide every edge by the Nyquist frequency `fs / 2`.
    ///
    /// # Errors
    /// `fs` is not a positive finite number.
    pub fn normalize(self, fs: F) -> Result<Self> {
        check_sample_rate(fs).map_err(Error::from)?;
        let nyq = fs / lit(2.0);
        Ok(self.map(|w| w / nyq))
    }

    /// Check that a normalized cutoff lies in `(0, 1)` and, for a band, that `low < high`.
    ///
    /// # Errors
    /// [`Error::InvalidCutoff`] describing the first violated condition.
    pub fn validate_normalized(&self) -> Result<()> {
        self.check_normalized().map_err(Error::from)
    }

    pub(crate) fn check_normalized(&self) -> core::result::Result<(), ConfigError> {
        let edges = match *self {
            Cutoff::Lowpass(w) | Cutoff::Highpass(w) => [w, w],
            Cutoff::Bandpass(lo, hi) => [lo, hi],
        };
        for w in edges {
            if !w.is_finite() {
                return Err(ConfigError::InvalidCutoff {
                    reason: "cutoff frequencies must be finite",
                });
            }
            if w <= F::zero() || w >= F::one() {
                return Err(ConfigError::InvalidCutoff { reason: OUT_OF_BAND });
            }
        }
        if let Cutoff::Bandpass(lo, hi) = self {
            if lo >= hi {
                return Err(ConfigError::InvalidCutoff {
                    reason: "the low band edge must be below the high band edge",
                });
            }
        }
        Ok(())
    }

    fn map(self, f: impl Fn(F) -> F) -> Self {
        match self {
            Cutoff::Lowpass(w) => Cutoff::Lowpass(f(w)),
            Cutoff::Highpass(w) => Cutoff::Highpass(f(w)),
            Cutoff::Bandpass(lo, hi) => Cutoff::Bandpass(f(lo), f(hi)),
        }
    }
}

/// Transfer function as numerator `b` and denominator `a`, highest power first.
#[derive(Debug, Clone, PartialEq)]
pub struct BaFormatFilter<F> {
    /// Numerator coefficients.
    pub b: Vec<F>,
    /// Denominator coefficients.
    pub a: Vec<F>,
}

/// Transfer function as zeros, poles and system gain.
#[derive(Debug, Clone, PartialEq)]
pub struct ZpkFormatFilter<F> {
    /// Zeros.
    pub z: Vec<Complex<F>>,
    /// Poles.
    pub p: Vec<Complex<F>>,
    /// System gain.
    pub k: F,
}

/// Design a digital Butterworth filter and return its `(b, a)` coefficients.
///
/// `cutoff` is given in the units of `fs` and normalized by the Nyquist frequency before the
/// band transform. The result has `a[0] == 1`, `order + 1` coefficients for lowpass and
/// highpass designs and `2 * order + 1` for bandpass designs.
///
/// # Errors
/// [`Error::InvalidOrder`] when `order < 1`, [`Error::InvalidCutoff`] when a normalized edge
/// falls outside `(0, 1)` or the band edges are unordered, and [`Error::InvalidArg`] for a
/// non-positive sample rate.
///
/// ```
/// use approx::assert_relative_eq;
/// use xfilter::signal::filter::design::{butter_ba, Cutoff};
///
/// let ba = butter_ba::<f64>(3, Cutoff::Lowpass(0.2), 2.0).unwrap();
/// assert_eq!(ba.a.len(), 4);
/// assert_relative_eq!(ba.a[1], -1.7600418803431692, max_relative = 1e-10);
/// ```
pub fn butter_ba<F>(order: usize, cutoff: Cutoff<F>, fs: F) -> Result<BaFormatFilter<F>>
where
    F: Float + FloatConst + NumAssign,
{
    let prototype = buttap::<F>(order)?;
    let normalized = cutoff.normalize(fs)?;
    let analog = band_transform(prototype, normalized)?;
    let tf = zpk2tf(&analog)?;
    let ba = bilinear(&tf.b, &tf.a, lit(2.0))?;
    debug!(
        "butterworth {} design: order={}, len(b)={}, len(a)={}",
        cutoff.band().name(),
        order,
        ba.b.len(),
        ba.a.len()
    );
    Ok(ba)
}

/// Lowpass Butterworth coefficients for a cutoff in the units of `fs`.
///
/// ```
/// use approx::assert_relative_eq;
/// use xfilter::signal::filter::design::lowpass_coeffs;
///
/// let ba = lowpass_coeffs(0.25f64, 2, 1.0).unwrap();
/// assert_relative_eq!(ba.b[1], 0.5857864376269049, max_relative = 1e-10);
/// assert_relative_eq!(ba.a[2], 0.17157287525380988, max_relative = 1e-10);
/// ```
pub fn lowpass_coeffs<F>(cutoff: F, order: usize, fs: F) -> Result<BaFormatFilter<F>>
where
    F: Float + FloatConst + NumAssign,
{
    butter_ba(order, Cutoff::Lowpass(cutoff), fs)
}

/// Highpass Butterworth coefficients for a cutoff in the units of `fs`.
pub fn highpass_coeffs<F>(cutoff: F, order: usize, fs: F) -> Result<BaFormatFilter<F>>
where
    F: Float + FloatConst + NumAssign,
{
    butter_ba(order, Cutoff::Highpass(cutoff), fs)
}

/// Bandpass Butterworth coefficients for `(low, high)` band edges in the units of `fs`.
pub fn bandpass_coeffs<F>(cutoff: (F, F), order: usize, fs: F) -> Result<BaFormatFilter<F>>
where
    F: Float + FloatConst + NumAssign,
{
    butter_ba(order, Cutoff::Bandpass(cutoff.0, cutoff.1), fs)
}

pub(crate) fn check_sample_rate<F: Float>(fs: F) -> core::result::Result<(), ConfigError> {
    if !fs.is_finite() || fs <= F::zero() {
        return Err(ConfigError::InvalidArgument {
            arg: "fs",
            reason: "sample rate must be a positive finite number",
        });
    }
    Ok(())
}

/// Convert an `f64` literal into `F`; out-of-range values become NaN.
#[inline]
pub(crate) fn lit<F: Float>(x: f64) -> F {
    <F as NumCast>::from(x).unwrap_or_else(F::nan)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_coeffs(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        actual
            .iter()
            .zip(expected)
            .for_each(|(a, e)| assert_relative_eq!(a, e, epsilon = 1e-12, max_relative = 1e-10));
    }

    #[test]
    fn third_order_lowpass_matches_reference() {
        let ba = butter_ba::<f64>(3, Cutoff::Lowpass(0.2), 2.0).unwrap();
        assert_coeffs(
            &ba.b,
            &[
                0.018098933007514438,
                0.054296799022543314,
                0.054296799022543314,
                0.018098933007514438,
            ],
        );
        assert_coeffs(
            &ba.a,
            &[
                1.0,
                -1.7600418803431692,
                1.1828932620378312,
                -0.27805991763454657,
            ],
        );
    }

    #[test]
    fn second_order_lowpass_and_highpass() {
        let lp = lowpass_coeffs(0.25f64, 2, 1.0).unwrap();
        assert_coeffs(
            &lp.b,
            &[0.2928932188134524, 0.5857864376269049, 0.2928932188134524],
        );
        assert_coeffs(&lp.a, &[1.0, 0.0, 0.17157287525380988]);

        let hp = highpass_coeffs(0.25f64, 2, 1.0).unwrap();
        assert_coeffs(
            &hp.b,
            &[0.29289321881345254, -0.5857864376269051, 0.29289321881345254],
        );
        assert_coeffs(&hp.a, &[1.0, 0.0, 0.17157287525380988]);
    }

    #[test]
    fn fourth_order_highpass_matches_reference() {
        let ba = butter_ba::<f64>(4, Cutoff::Highpass(0.3), 2.0).unwrap();
        assert_coeffs(
            &ba.b,
            &[
                0.2754132880723043,
                -1.1016531522892172,
                1.6524797284338257,
                -1.1016531522892172,
                0.2754132880723043,
            ],
        );
        assert_coeffs(
            &ba.a,
            &[
                1.0,
                -1.5703988512281715,
                1.2756133249832793,
                -0.48440336833508546,
                0.07619706461033234,
            ],
        );
    }

    #[test]
    fn bandpass_doubles_the_coefficient_count() {
        let ba = bandpass_coeffs((0.125f64, 0.375), 2, 1.0).unwrap();
        assert_coeffs(
            &ba.b,
            &[
                0.2928932188134524,
                0.0,
                -0.5857864376269049,
                0.0,
                0.2928932188134524,
            ],
        );
        assert_coeffs(&ba.a, &[1.0, 0.0, 0.0, 0.0, 0.17157287525380996]);
    }

    #[test]
    fn coefficient_lengths_follow_the_order() {
        for order in 1..=8 {
            for cutoff in [0.05f64, 0.2, 0.45] {
                let lp = lowpass_coeffs(cutoff, order, 1.0).unwrap();
                let hp = highpass_coeffs(cutoff, order, 1.0).unwrap();
                for ba in [&lp, &hp] {
                    assert_eq!(ba.b.len(), order + 1);
                    assert_eq!(ba.a.len(), order + 1);
                    assert_eq!(ba.a[0], 1.0);
                }
            }
            let bp = bandpass_coeffs((0.1f64, 0.3), order, 1.0).unwrap();
            assert_eq!(bp.b.len(), 2 * order + 1);
            assert_eq!(bp.a.len(), 2 * order + 1);
            assert_eq!(bp.a[0], 1.0);
        }
    }

    #[test]
    fn sample_rate_scales_the_cutoff() {
        let unit = lowpass_coeffs(0.1f64, 3, 1.0).unwrap();
        let scaled = lowpass_coeffs(4_410.0f64, 3, 44_100.0).unwrap();
        assert_coeffs(&scaled.b, &unit.b);
        assert_coeffs(&scaled.a, &unit.a);
    }

    #[test]
    fn single_precision_design() {
        let ba = lowpass_coeffs(0.25f32, 2, 1.0).unwrap();
        assert_relative_eq!(ba.b[1], 0.585_786_4, max_relative = 1e-5);
        assert_relative_eq!(ba.a[2], 0.171_572_87, max_relative = 1e-4);
    }

    #[test]
    fn invalid_order_is_rejected() {
        assert_eq!(
            lowpass_coeffs(0.25f64, 0, 1.0),
            Err(Error::InvalidOrder { order: 0 })
        );
    }

    #[test]
    fn invalid_cutoffs_are_rejected() {
        for cutoff in [0.0f64, -0.1, 0.5, 0.7, f64::NAN] {
            assert!(matches!(
                lowpass_coeffs(cutoff, 2, 1.0),
                Err(Error::InvalidCutoff { .. })
            ));
            assert!(matches!(
                highpass_coeffs(cutoff, 2, 1.0),
                Err(Error::InvalidCutoff { .. })
            ));
        }
        for band in [(0.3f64, 0.1), (0.2, 0.2), (0.0, 0.2), (0.1, 0.5)] {
            assert!(matches!(
                bandpass_coeffs(band, 2, 1.0),
                Err(Error::InvalidCutoff { .. })
            ));
        }
    }

    #[test]
    fn invalid_sample_rate_is_rejected() {
        for fs in [0.0f64, -1.0, f64::INFINITY] {
            assert!(matches!(
                lowpass_coeffs(0.25, 2, fs),
                Err(Error::InvalidArg { .. })
            ));
        }
    }

    #[test]
    fn default_cutoffs() {
        assert_eq!(
            Cutoff::<f64>::default_for(FilterBandType::Lowpass),
            Cutoff::Lowpass(0.25)
        );
        assert_eq!(
            Cutoff::<f64>::default_for(FilterBandType::Bandpass),
            Cutoff::Bandpass(0.125, 0.375)
        );
        assert_eq!(
            Cutoff::<f64>::default_for(FilterBandType::Highpass).band(),
            FilterBandType::Highpass
        );
    }
}
