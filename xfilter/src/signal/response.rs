//! Frequency response of digital transfer functions.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::filter::design::{
    butter_ba, check_sample_rate, lit, ButterConfig, Cutoff, FilterBandType,
};
use crate::signal::traits::Response1D;
use alloc::{format, string::String, vec::Vec};
use nalgebra::Complex;
use num_traits::{Float, FloatConst, NumAssign};
use xfilter_core::{Error, Result};

/// Number of grid points used by the `*_response` helpers.
pub const DEFAULT_RESPONSE_POINTS: usize = 512;

/// Squared-magnitude response sampled on `[0, fs / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseCurve<F> {
    /// Frequencies in the units of the sample rate, strictly increasing from 0.
    pub frequencies: Vec<F>,
    /// `|H|^2` at each frequency.
    pub squared_magnitude: Vec<F>,
    /// Human readable description of the evaluated filter.
    pub info: String,
}

/// Compute the frequency response of a digital filter.
///
/// `H(e^{jw}) = B(e^{-jw}) / A(e^{-jw})` is evaluated at `n_points` angular frequencies
/// `w = pi * i / n_points` for `i` in `0..n_points`. Numerator and denominator are evaluated
/// directly with Horner's rule.
///
/// # Returns
/// `(w, h)` where `w` is in radians per sample.
///
/// # Errors
/// [Error::InvalidArg] when `b` or `a` is empty or `n_points` is zero.
///
/// ```
/// use approx::assert_abs_diff_eq;
/// use xfilter::signal::freqz;
///
/// let (w, h) = freqz(&[0.5f64, 0.5], &[1.0], 4).unwrap();
/// assert_abs_diff_eq!(w[2], core::f64::consts::FRAC_PI_2);
/// assert_abs_diff_eq!(h[0].re, 1.0);
/// assert_abs_diff_eq!(h[2].norm_sqr(), 0.5, epsilon = 1e-12);
/// ```
pub fn freqz<F>(b: &[F], a: &[F], n_points: usize) -> Result<(Vec<F>, Vec<Complex<F>>)>
where
    F: Float + FloatConst,
{
    check_response_args(b, a, n_points).map_err(Error::from)?;
    let (w, h) = (0..n_points)
        .map(|i| {
            let w = omega(i, n_points);
            (w, eval_transfer(b, a, w))
        })
        .unzip();
    Ok((w, h))
}

/// Squared-magnitude response of `b / a` on `n_points` frequencies in `[0, fs / 2)`.
///
/// # Errors
/// [Error::InvalidArg] for empty coefficients, a zero-length grid or a non-positive `fs`.
///
/// ```
/// use approx::assert_abs_diff_eq;
/// use xfilter::signal::filter::design::lowpass_coeffs;
/// use xfilter::signal::response;
///
/// let ba = lowpass_coeffs(0.25f64, 2, 1.0).unwrap();
/// let curve = response(&ba.b, &ba.a, 1.0, 512).unwrap();
/// assert_abs_diff_eq!(curve.frequencies[256], 0.25);
/// assert_abs_diff_eq!(curve.squared_magnitude[0], 1.0, epsilon = 1e-12);
/// assert_abs_diff_eq!(curve.squared_magnitude[256], 0.5, epsilon = 1e-12);
/// ```
pub fn response<F>(b: &[F], a: &[F], fs: F, n_points: usize) -> Result<ResponseCurve<F>>
where
    F: Float + FloatConst,
{
    check_sample_rate(fs)?;
    let (w, h) = freqz(b, a, n_points)?;
    log::trace!(
        "response: len(b)={} len(a)={} n_points={}",
        b.len(),
        a.len(),
        n_points
    );
    let scale = hz_per_radian(fs);
    Ok(ResponseCurve {
        frequencies: w.into_iter().map(|w| w * scale).collect(),
        squared_magnitude: h.into_iter().map(|h| h.norm_sqr()).collect(),
        info: format!("{}-tap IIR response", b.len().max(a.len())),
    })
}

/// Butterworth lowpass design evaluated on the default grid.
///
/// ```
/// use xfilter::signal::lowpass_response;
///
/// let curve = lowpass_response(0.25f64, 2, 1.0).unwrap();
/// assert_eq!(curve.info, "Butterworth 2-order forward-backward lowpass response");
/// assert_eq!(curve.frequencies.len(), 512);
/// ```
pub fn lowpass_response<F>(cutoff: F, order: usize, fs: F) -> Result<ResponseCurve<F>>
where
    F: Float + FloatConst + NumAssign,
{
    butter_response(order, Cutoff::Lowpass(cutoff), fs)
}

/// Butterworth highpass design evaluated on the default grid.
pub fn highpass_response<F>(cutoff: F, order: usize, fs: F) -> Result<ResponseCurve<F>>
where
    F: Float + FloatConst + NumAssign,
{
    butter_response(order, Cutoff::Highpass(cutoff), fs)
}

/// Butterworth bandpass design evaluated on the default grid.
pub fn bandpass_response<F>(cutoff: (F, F), order: usize, fs: F) -> Result<ResponseCurve<F>>
where
    F: Float + FloatConst + NumAssign,
{
    butter_response(order, Cutoff::Bandpass(cutoff.0, cutoff.1), fs)
}

fn butter_response<F>(order: usize, cutoff: Cutoff<F>, fs: F) -> Result<ResponseCurve<F>>
where
    F: Float + FloatConst + NumAssign,
{
    let ba = butter_ba(order, cutoff, fs)?;
    let mut curve = response(&ba.b, &ba.a, fs, DEFAULT_RESPONSE_POINTS)?;
    curve.info = describe(order, cutoff.band());
    Ok(curve)
}

fn describe(order: usize, band: FilterBandType) -> String {
    format!(
        "Butterworth {}-order forward-backward {} response",
        order,
        band.name()
    )
}

fn omega<F: Float + FloatConst>(i: usize, n_points: usize) -> F {
    F::PI() * lit(i as f64) / lit(n_points as f64)
}

fn hz_per_radian<F: Float + FloatConst>(fs: F) -> F {
    fs / (lit::<F>(2.0) * F::PI())
}

fn eval_transfer<F: Float>(b: &[F], a: &[F], w: F) -> Complex<F> {
    let zinv = Complex::new(w.cos(), -w.sin());
    let horner = |coeffs: &[F]| {
        coeffs
            .iter()
            .rev()
            .fold(Complex::new(F::zero(), F::zero()), |acc, c| {
                acc * zinv + Complex::new(*c, F::zero())
            })
    };
    horner(b) / horner(a)
}

fn check_response_args<F>(
    b: &[F],
    a: &[F],
    n_points: usize,
) -> core::result::Result<(), ConfigError> {
    if b.is_empty() {
        return Err(ConfigError::EmptyInput { arg: "b" });
    }
    if a.is_empty() {
        return Err(ConfigError::EmptyInput { arg: "a" });
    }
    check_points(n_points)
}

fn check_points(n_points: usize) -> core::result::Result<(), ConfigError> {
    if n_points == 0 {
        return Err(ConfigError::InvalidArgument {
            arg: "n_points",
            reason: "response grid must contain at least one point",
        });
    }
    Ok(())
}

/// Constructor config for [`ResponseKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseConfig<F> {
    /// Sample rate the frequencies are expressed in.
    pub fs: F,
    /// Number of grid points.
    pub n_points: usize,
}

impl<F: Float> Default for ResponseConfig<F> {
    fn default() -> Self {
        Self {
            fs: F::one(),
            n_points: DEFAULT_RESPONSE_POINTS,
        }
    }
}

/// Response evaluator with a fixed sample rate and grid size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseKernel<F> {
    fs: F,
    n_points: usize,
}

impl<F: Float + FloatConst> ResponseKernel<F> {
    /// Number of grid points.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Frequency grid in the units of the sample rate.
    pub fn frequencies(&self) -> Vec<F> {
        let scale = hz_per_radian(self.fs);
        (0..self.n_points)
            .map(|i| omega::<F>(i, self.n_points) * scale)
            .collect()
    }
}

impl<F: Float> KernelLifecycle for ResponseKernel<F> {
    type Config = ResponseConfig<F>;

    fn try_new(config: Self::Config) -> core::result::Result<Self, ConfigError> {
        check_sample_rate(config.fs)?;
        check_points(config.n_points)?;
        Ok(Self {
            fs: config.fs,
            n_points: config.n_points,
        })
    }
}

impl<F> Response1D<F> for ResponseKernel<F>
where
    F: Float + FloatConst,
{
    type Output = ResponseCurve<F>;

    fn run_into<I1, I2, OF, OM>(
        &self,
        b: &I1,
        a: &I2,
        frequencies: &mut OF,
        squared_magnitude: &mut OM,
    ) -> core::result::Result<(), ExecInvariantViolation>
    where
        I1: Read1D<F> + ?Sized,
        I2: Read1D<F> + ?Sized,
        OF: Write1D<F> + ?Sized,
        OM: Write1D<F> + ?Sized,
    {
        let b = b.read_slice().map_err(ExecInvariantViolation::from)?;
        let a = a.read_slice().map_err(ExecInvariantViolation::from)?;
        check_response_args(b, a, self.n_points).map_err(ExecInvariantViolation::from)?;

        let freq_out = frequencies
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if freq_out.len() != self.n_points {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "frequencies",
                expected: self.n_points,
                got: freq_out.len(),
            });
        }
        freq_out.copy_from_slice(&self.frequencies());

        let mag_out = squared_magnitude
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if mag_out.len() != self.n_points {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "squared_magnitude",
                expected: self.n_points,
                got: mag_out.len(),
            });
        }
        mag_out.iter_mut().enumerate().for_each(|(i, m)| {
            *m = eval_transfer(b, a, omega(i, self.n_points)).norm_sqr();
        });
        Ok(())
    }

    fn run_alloc<I1, I2>(
        &self,
        b: &I1,
        a: &I2,
    ) -> core::result::Result<Self::Output, ExecInvariantViolation>
    where
        I1: Read1D<F> + ?Sized,
        I2: Read1D<F> + ?Sized,
    {
        let mut frequencies = alloc::vec![F::zero(); self.n_points];
        let mut squared_magnitude = alloc::vec![F::zero(); self.n_points];
        self.run_into(b, a, &mut frequencies, &mut squared_magnitude)?;
        let ntaps = b
            .read_slice()
            .map_err(ExecInvariantViolation::from)?
            .len()
            .max(a.read_slice().map_err(ExecInvariantViolation::from)?.len());
        Ok(ResponseCurve {
            frequencies,
            squared_magnitude,
            info: format!("{}-tap IIR response", ntaps),
        })
    }
}

impl<F> ResponseKernel<F>
where
    F: Float + FloatConst + NumAssign,
{
    /// Design the Butterworth filter described by `config` and evaluate it on this grid.
    ///
    /// The design sample rate is taken from `config`; the kernel's own `fs` only labels the
    /// frequency axis, so both are normally equal.
    pub fn run_butter(&self, config: &ButterConfig<F>) -> Result<ResponseCurve<F>> {
        let ba = butter_ba(config.order, config.cutoff, config.fs)?;
        let mut curve = self.run_alloc(&ba.b, &ba.a)?;
        curve.info = describe(config.order, config.cutoff.band());
        Ok(curve)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::signal::filter::design::{bandpass_coeffs, highpass_coeffs, lowpass_coeffs};
    use approx::assert_abs_diff_eq;

    #[test]
    fn lowpass_passes_dc_and_rejects_nyquist() {
        let ba = lowpass_coeffs(0.25f64, 2, 1.0).unwrap();
        let curve = response(&ba.b, &ba.a, 1.0, 512).unwrap();
        let h = &curve.squared_magnitude;
        assert_eq!(h.len(), 512);
        assert_abs_diff_eq!(h[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(h[128], 0.9714045207910316, epsilon = 1e-10);
        assert_abs_diff_eq!(h[256], 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(h[384], 0.028595479208968325, epsilon = 1e-10);
        assert_abs_diff_eq!(h[511], 8.859416402982698e-11, epsilon = 1e-13);
    }

    #[test]
    fn highpass_is_the_mirror_of_lowpass() {
        let ba = highpass_coeffs(0.25f64, 2, 1.0).unwrap();
        let curve = response(&ba.b, &ba.a, 1.0, 512).unwrap();
        let h = &curve.squared_magnitude;
        assert_abs_diff_eq!(h[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(h[128], 0.028595479208968315, epsilon = 1e-10);
        assert_abs_diff_eq!(h[384], 0.9714045207910316, epsilon = 1e-10);
        assert_abs_diff_eq!(h[511], 0.9999999999114058, epsilon = 1e-10);
    }

    #[test]
    fn bandpass_center_beats_the_edges() {
        let ba = bandpass_coeffs((0.125f64, 0.375), 2, 1.0).unwrap();
        let curve = response(&ba.b, &ba.a, 1.0, 512).unwrap();
        let (f, h) = (&curve.frequencies, &curve.squared_magnitude);
        assert_abs_diff_eq!(f[256], 0.25);
        assert_abs_diff_eq!(h[256], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(h[128], 0.5, epsilon = 1e-10);
        assert!(h[256] >= h[0]);
        assert!(h[256] >= h[511]);
        assert_abs_diff_eq!(h[511], 1.4175599926982048e-9, epsilon = 1e-12);
    }

    #[test]
    fn frequencies_follow_the_sample_rate() {
        let curve = lowpass_response(20.0f64, 4, 100.0).unwrap();
        assert_eq!(curve.frequencies.len(), DEFAULT_RESPONSE_POINTS);
        assert_abs_diff_eq!(curve.frequencies[0], 0.0);
        assert_abs_diff_eq!(curve.frequencies[511], 50.0 * 511.0 / 512.0, epsilon = 1e-12);
        assert!(curve.frequencies.windows(2).all(|w| w[0] < w[1]));
        assert!(curve.squared_magnitude.iter().all(|m| *m >= 0.0));

        let ba = lowpass_coeffs(20.0f64, 4, 100.0).unwrap();
        let coarse = response(&ba.b, &ba.a, 100.0, 8).unwrap();
        let expected = [
            1.0,
            0.9999684359839264,
            0.9889621154606492,
            0.6614878604710868,
            0.07204675432231197,
            0.0030753274514166706,
            6.727498735886059e-05,
            1.9027535149263654e-07,
        ];
        assert_abs_diff_eq!(coarse.frequencies[3], 18.75, epsilon = 1e-12);
        coarse
            .squared_magnitude
            .iter()
            .zip(expected)
            .for_each(|(r, e)| assert_abs_diff_eq!(*r, e, epsilon = 1e-9));
    }

    // |H|^2 = 1 / (1 + (tan(pi f / fs) / tan(pi fc / fs))^(2n)) for a bilinear Butterworth lowpass
    #[test]
    fn lowpass_matches_closed_form_magnitude() {
        let (fs, fc) = (100.0f64, 20.0);
        let warp = |f: f64| (core::f64::consts::PI * f / fs).tan();
        for order in 1..=8 {
            let curve = lowpass_response(fc, order, fs).unwrap();
            curve
                .frequencies
                .iter()
                .zip(&curve.squared_magnitude)
                .for_each(|(f, m)| {
                    let ratio = warp(*f) / warp(fc);
                    let expected = 1.0 / (1.0 + ratio.powi(2 * order as i32));
                    assert_abs_diff_eq!(*m, expected, epsilon = 1e-9);
                });
        }
    }

    #[test]
    fn band_helpers_describe_the_design() {
        let hp = highpass_response(0.25f64, 3, 1.0).unwrap();
        assert_eq!(hp.info, "Butterworth 3-order forward-backward highpass response");
        let bp = bandpass_response((0.125f64, 0.375), 2, 1.0).unwrap();
        assert_eq!(bp.info, "Butterworth 2-order forward-backward bandpass response");
        assert!(matches!(
            bandpass_response((0.375f64, 0.125), 2, 1.0),
            Err(Error::InvalidCutoff { .. })
        ));
        assert!(matches!(
            lowpass_response(0.25f64, 0, 1.0),
            Err(Error::InvalidOrder { order: 0 })
        ));
    }

    #[test]
    fn invalid_arguments() {
        assert!(matches!(
            response::<f64>(&[1.0], &[1.0], 1.0, 0),
            Err(Error::InvalidArg { .. })
        ));
        assert!(matches!(
            response::<f64>(&[], &[1.0], 1.0, 4),
            Err(Error::InvalidArg { .. })
        ));
        assert!(matches!(
            response::<f64>(&[1.0], &[1.0], -1.0, 4),
            Err(Error::InvalidArg { .. })
        ));
    }

    #[test]
    fn kernel_matches_free_function() {
        let kernel = ResponseKernel::try_new(ResponseConfig::default()).unwrap();
        let ba = bandpass_coeffs((0.125f64, 0.375), 2, 1.0).unwrap();
        let curve = kernel.run_alloc(&ba.b, &ba.a).unwrap();
        assert_eq!(curve, response(&ba.b, &ba.a, 1.0, 512).unwrap());

        let designed = kernel
            .run_butter(&ButterConfig::default_for(FilterBandType::Bandpass))
            .unwrap();
        assert_eq!(designed.squared_magnitude, curve.squared_magnitude);
        assert_eq!(
            designed.info,
            "Butterworth 2-order forward-backward bandpass response"
        );

        let mut freqs = vec![0.0f64; 511];
        let mut mags = vec![0.0f64; 512];
        assert!(matches!(
            kernel.run_into(&ba.b, &ba.a, &mut freqs, &mut mags),
            Err(ExecInvariantViolation::LengthMismatch {
                arg: "frequencies",
                expected: 512,
                got: 511
            })
        ));
    }

    #[test]
    fn kernel_config_is_validated() {
        assert_eq!(
            ResponseKernel::<f64>::try_new(ResponseConfig {
                fs: 1.0,
                n_points: 0
            }),
            Err(ConfigError::InvalidArgument {
                arg: "n_points",
                reason: "response grid must contain at least one point",
            })
        );
        assert!(ResponseKernel::<f64>::try_new(ResponseConfig {
            fs: 0.0,
            n_points: 8
        })
        .is_err());
    }
}
