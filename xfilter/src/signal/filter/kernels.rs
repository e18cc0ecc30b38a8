//! Trait-first kernel wrappers for filtering primitives.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::{FiltFilt1D, LFilterZiDesign1D};
use alloc::vec::Vec;
use nalgebra::RealField;
use ndarray::{ArrayView1, ArrayViewMut1};

use super::lfilter::Coefficients;
use super::lfilter_zi::steady_state;
use super::FiltFiltPad;

/// Constructor config for [`FiltFiltKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct FiltFiltConfig<T> {
    /// Numerator coefficients.
    pub b: Vec<T>,
    /// Denominator coefficients.
    pub a: Vec<T>,
    /// Padding policy. `None` disables edge extension.
    pub pad: Option<FiltFiltPad>,
}

impl<T> FiltFiltConfig<T> {
    /// Config with the default odd padding of `3 * max(len(a), len(b))`.
    pub fn new(b: Vec<T>, a: Vec<T>) -> Self {
        Self {
            b,
            a,
            pad: Some(FiltFiltPad::default()),
        }
    }
}

/// Zero-phase forward-backward filter with its steady-state initial condition precomputed.
///
/// The kernel runs on contiguous 1D input through [`FiltFilt1D`], and on every lane of an
/// N-dimensional array through [`FiltFiltKernel::run_axis`].
#[derive(Debug, Clone, PartialEq)]
pub struct FiltFiltKernel<T> {
    coeffs: Coefficients<T>,
    zi: Vec<T>,
    pad: Option<FiltFiltPad>,
}

impl<T> FiltFiltKernel<T>
where
    T: RealField + Copy,
{
    /// Number of samples added at each end of a lane before filtering.
    pub fn padlen(&self) -> usize {
        self.pad
            .map(|p| p.padlen(self.coeffs.ntaps()))
            .unwrap_or(0)
    }

    /// Padding policy.
    pub fn pad(&self) -> Option<FiltFiltPad> {
        self.pad
    }

    /// Steady-state initial condition for a unit step.
    pub fn zi(&self) -> &[T] {
        &self.zi
    }

    pub(crate) fn coeffs(&self) -> &Coefficients<T> {
        &self.coeffs
    }
}

impl<T> KernelLifecycle for FiltFiltKernel<T>
where
    T: RealField + Copy,
{
    type Config = FiltFiltConfig<T>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let coeffs = Coefficients::new(&config.b, &config.a)?;
        let zi = steady_state(&coeffs).map_err(|_| ConfigError::InvalidArgument {
            arg: "a",
            reason: "steady state is undefined for a filter with a pole at z = 1",
        })?;
        Ok(Self {
            coeffs,
            zi,
            pad: config.pad,
        })
    }
}

impl<T> FiltFilt1D<T> for FiltFiltKernel<T>
where
    T: RealField + Copy,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let out_slice = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != input.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: input.len(),
                got: out_slice.len(),
            });
        }
        let padlen = self.padlen();
        if input.len() <= padlen {
            return Err(ExecInvariantViolation::InsufficientSignalLength {
                len: input.len(),
                padlen,
            });
        }
        self.filter_lane(ArrayView1::from(input), ArrayViewMut1::from(out_slice));
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let len = input
            .read_slice()
            .map_err(ExecInvariantViolation::from)?
            .len();
        let mut out = alloc::vec![T::zero(); len];
        self.run_into(input, &mut out)?;
        Ok(out)
    }
}

/// Constructor config for [`LFilterZiKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct LFilterZiConfig<T> {
    /// Numerator coefficients.
    pub b: Vec<T>,
    /// Denominator coefficients.
    pub a: Vec<T>,
}

/// Steady-state initial condition design kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct LFilterZiKernel<T> {
    coeffs: Coefficients<T>,
}

impl<T> KernelLifecycle for LFilterZiKernel<T>
where
    T: RealField + Copy,
{
    type Config = LFilterZiConfig<T>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self {
            coeffs: Coefficients::new(&config.b, &config.a)?,
        })
    }
}

impl<T> LFilterZiDesign1D<T> for LFilterZiKernel<T>
where
    T: RealField + Copy,
{
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized,
    {
        let zi = self.run_alloc()?;
        let out_slice = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != zi.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: zi.len(),
                got: out_slice.len(),
            });
        }
        out_slice.copy_from_slice(&zi);
        Ok(())
    }

    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation> {
        steady_state(&self.coeffs).map_err(|_| ExecInvariantViolation::InvalidState {
            reason: "steady state is undefined for a filter with a pole at z = 1",
        })
    }
}
