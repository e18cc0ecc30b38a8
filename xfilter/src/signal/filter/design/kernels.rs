//! Trait-first kernels for filter design APIs.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
use crate::signal::traits::IirDesign;
use num_traits::{Float, FloatConst, NumAssign};

use super::{butter_ba, check_sample_rate, lit, BaFormatFilter, Cutoff, FilterBandType};

/// Constructor config for [`ButterKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButterConfig<F> {
    /// Filter order.
    pub order: usize,
    /// Band and cutoff edges, in the units of `fs`.
    pub cutoff: Cutoff<F>,
    /// Sample rate.
    pub fs: F,
}

impl<F> ButterConfig<F>
where
    F: Float,
{
    /// Second-order design for `band` with the default cutoff at a unit sample rate.
    pub fn default_for(band: FilterBandType) -> Self {
        Self {
            order: 2,
            cutoff: Cutoff::default_for(band),
            fs: F::one(),
        }
    }
}

impl<F> Default for ButterConfig<F>
where
    F: Float,
{
    fn default() -> Self {
        Self::default_for(FilterBandType::Lowpass)
    }
}

/// Trait-first Butterworth design kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButterKernel<F> {
    order: usize,
    cutoff: Cutoff<F>,
    fs: F,
}

impl<F> ButterKernel<F>
where
    F: Float,
{
    /// Filter order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Selected band.
    pub fn band(&self) -> FilterBandType {
        self.cutoff.band()
    }

    /// Cutoff in the units of [`ButterKernel::fs`].
    pub fn cutoff(&self) -> Cutoff<F> {
        self.cutoff
    }

    /// Sample rate.
    pub fn fs(&self) -> F {
        self.fs
    }
}

impl<F> KernelLifecycle for ButterKernel<F>
where
    F: Float,
{
    type Config = ButterConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.order == 0 {
            return Err(ConfigError::InvalidOrder {
                order: config.order,
            });
        }
        check_sample_rate(config.fs)?;
        let nyq = config.fs / lit(2.0);
        let normalized = match config.cutoff {
            Cutoff::Lowpass(w) => Cutoff::Lowpass(w / nyq),
            Cutoff::Highpass(w) => Cutoff::Highpass(w / nyq),
            Cutoff::Bandpass(lo, hi) => Cutoff::Bandpass(lo / nyq, hi / nyq),
        };
        normalized.check_normalized()?;

        Ok(Self {
            order: config.order,
            cutoff: config.cutoff,
            fs: config.fs,
        })
    }
}

impl<F> IirDesign<F> for ButterKernel<F>
where
    F: Float + FloatConst + NumAssign,
{
    type Output = BaFormatFilter<F>;

    fn run_alloc(&self) -> Result<Self::Output, ExecInvariantViolation> {
        butter_ba(self.order, self.cutoff, self.fs).map_err(ExecInvariantViolation::from)
    }
}
