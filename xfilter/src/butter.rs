//! Butterworth lowpass, highpass and bandpass filtering of N-D arrays.
//!
//! Each call designs the filter, then applies it forward and backward along one axis so the
//! output has no phase shift. All other axes are treated as independent channels.
//!
//! ```
//! use ndarray::Array1;
//! use xfilter::{ButterConfig, ButterworthFilter, Cutoff};
//!
//! let x = Array1::from_shape_fn(200, |i| (i as f64 * 0.05).sin() + (i as f64 * 2.5).sin());
//! let config = ButterConfig {
//!     order: 4,
//!     cutoff: Cutoff::Lowpass(0.1),
//!     fs: 1.0,
//! };
//! let smooth = x.lowpass(&config, None).unwrap();
//! assert_eq!(smooth.shape(), x.shape());
//! ```

use crate::kernel::KernelLifecycle;
use crate::signal::filter::design::{ButterConfig, ButterKernel, Cutoff, FilterBandType};
use crate::signal::filter::{FiltFiltConfig, FiltFiltKernel};
use crate::signal::traits::IirDesign;
use alloc::string::ToString;
use nalgebra::RealField;
use ndarray::{Array, ArrayBase, Data, Dimension};
use num_traits::{Float, FloatConst, NumAssign};
use xfilter_core::{Error, Result};

/// Zero-phase Butterworth lowpass along `axis`.
///
/// `cutoff` and `fs` share units; the cutoff must lie strictly between 0 and `fs / 2`.
///
/// # Errors
/// [Error::InvalidOrder], [Error::InvalidCutoff], [Error::AxisOutOfRange], and
/// [Error::InsufficientSignalLength] when the axis is not longer than
/// `3 * (order + 1)` samples.
///
/// ```
/// use ndarray::Array1;
/// use xfilter::lowpass;
///
/// let x = Array1::from_elem(32, 3.5f64);
/// let y = lowpass(&x, 0.25, 2, 0, 1.0).unwrap();
/// assert!(y.iter().all(|v| (v - 3.5).abs() < 1e-12));
/// ```
pub fn lowpass<F, S, D>(
    x: &ArrayBase<S, D>,
    cutoff: F,
    order: usize,
    axis: usize,
    fs: F,
) -> Result<Array<F, D>>
where
    F: Float + FloatConst + NumAssign + RealField + Copy,
    S: Data<Elem = F>,
    D: Dimension,
{
    let config = ButterConfig {
        order,
        cutoff: Cutoff::Lowpass(cutoff),
        fs,
    };
    butterworth(x, &config, axis)
}

/// Zero-phase Butterworth highpass along `axis`.
///
/// # Errors
/// Same as [lowpass].
pub fn highpass<F, S, D>(
    x: &ArrayBase<S, D>,
    cutoff: F,
    order: usize,
    axis: usize,
    fs: F,
) -> Result<Array<F, D>>
where
    F: Float + FloatConst + NumAssign + RealField + Copy,
    S: Data<Elem = F>,
    D: Dimension,
{
    let config = ButterConfig {
        order,
        cutoff: Cutoff::Highpass(cutoff),
        fs,
    };
    butterworth(x, &config, axis)
}

/// Zero-phase Butterworth bandpass between `cutoff.0` and `cutoff.1` along `axis`.
///
/// The designed filter has `2 * order` poles, so the axis must be longer than
/// `3 * (2 * order + 1)` samples.
///
/// # Errors
/// Same as [lowpass]; additionally [Error::InvalidCutoff] when `cutoff.0 >= cutoff.1`.
pub fn bandpass<F, S, D>(
    x: &ArrayBase<S, D>,
    cutoff: (F, F),
    order: usize,
    axis: usize,
    fs: F,
) -> Result<Array<F, D>>
where
    F: Float + FloatConst + NumAssign + RealField + Copy,
    S: Data<Elem = F>,
    D: Dimension,
{
    let config = ButterConfig {
        order,
        cutoff: Cutoff::Bandpass(cutoff.0, cutoff.1),
        fs,
    };
    butterworth(x, &config, axis)
}

/// Design the filter described by `config` and apply it forward and backward along `axis`.
pub fn butterworth<F, S, D>(
    x: &ArrayBase<S, D>,
    config: &ButterConfig<F>,
    axis: usize,
) -> Result<Array<F, D>>
where
    F: Float + FloatConst + NumAssign + RealField + Copy,
    S: Data<Elem = F>,
    D: Dimension,
{
    if axis >= x.ndim() {
        return Err(Error::AxisOutOfRange {
            axis: isize::try_from(axis).unwrap_or(isize::MAX),
            ndim: x.ndim(),
        });
    }
    let ba = ButterKernel::try_new(*config)?.run_alloc()?;
    let kernel = FiltFiltKernel::try_new(FiltFiltConfig::new(ba.b, ba.a))?;
    kernel.run_axis(x, Some(axis as isize))
}

/// Butterworth filtering as methods on any real-valued ndarray.
///
/// `axis` selects the time axis. `None` is accepted only for one-dimensional input, where it
/// selects axis 0; multi-dimensional input needs an explicit axis.
pub trait ButterworthFilter<F, D> {
    /// Zero-phase lowpass. `config.cutoff` must be [`Cutoff::Lowpass`].
    fn lowpass(&self, config: &ButterConfig<F>, axis: Option<usize>) -> Result<Array<F, D>>;

    /// Zero-phase highpass. `config.cutoff` must be [`Cutoff::Highpass`].
    fn highpass(&self, config: &ButterConfig<F>, axis: Option<usize>) -> Result<Array<F, D>>;

    /// Zero-phase bandpass. `config.cutoff` must be [`Cutoff::Bandpass`].
    fn bandpass(&self, config: &ButterConfig<F>, axis: Option<usize>) -> Result<Array<F, D>>;
}

impl<F, S, D> ButterworthFilter<F, D> for ArrayBase<S, D>
where
    F: Float + FloatConst + NumAssign + RealField + Copy,
    S: Data<Elem = F>,
    D: Dimension,
{
    fn lowpass(&self, config: &ButterConfig<F>, axis: Option<usize>) -> Result<Array<F, D>> {
        filter_band(self, FilterBandType::Lowpass, config, axis)
    }

    fn highpass(&self, config: &ButterConfig<F>, axis: Option<usize>) -> Result<Array<F, D>> {
        filter_band(self, FilterBandType::Highpass, config, axis)
    }

    fn bandpass(&self, config: &ButterConfig<F>, axis: Option<usize>) -> Result<Array<F, D>> {
        filter_band(self, FilterBandType::Bandpass, config, axis)
    }
}

fn filter_band<F, S, D>(
    x: &ArrayBase<S, D>,
    band: FilterBandType,
    config: &ButterConfig<F>,
    axis: Option<usize>,
) -> Result<Array<F, D>>
where
    F: Float + FloatConst + NumAssign + RealField + Copy,
    S: Data<Elem = F>,
    D: Dimension,
{
    if config.cutoff.band() != band {
        return Err(Error::InvalidArg {
            arg: "cutoff".to_string(),
            reason: alloc::format!(
                "expected a {} cutoff, got {}",
                band.name(),
                config.cutoff.band().name()
            ),
        });
    }
    let axis = match axis {
        Some(axis) => axis,
        None if x.ndim() == 1 => 0,
        None => {
            return Err(Error::InvalidArg {
                arg: "axis".to_string(),
                reason: "an explicit axis is required for multi-dimensional input".to_string(),
            })
        }
    };
    butterworth(x, config, axis)
}
