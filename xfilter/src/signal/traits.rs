//! Trait interfaces for signal-processing capabilities.
//!
//! These traits define the trait-first API shape shared by the design, filtering and response
//! kernels.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};
use alloc::vec::Vec;

/// IIR design capability.
pub trait IirDesign<T> {
    /// Output representation produced by the design kernel.
    type Output;

    /// Run IIR design and allocate output representation.
    fn run_alloc(&self) -> Result<Self::Output, ExecInvariantViolation>;
}

/// 1D `filtfilt` capability.
pub trait FiltFilt1D<T> {
    /// Run zero-phase filtering into a caller-provided output buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Run zero-phase filtering and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// `lfilter_zi` design capability.
pub trait LFilterZiDesign1D<T> {
    /// Compute initial state into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Compute initial state and allocate output.
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}

/// Squared-magnitude frequency response capability.
pub trait Response1D<T> {
    /// Output representation produced by the response kernel.
    type Output;

    /// Evaluate the response of `b / a` into caller-provided frequency and magnitude buffers.
    fn run_into<I1, I2, OF, OM>(
        &self,
        b: &I1,
        a: &I2,
        frequencies: &mut OF,
        squared_magnitude: &mut OM,
    ) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        OF: Write1D<T> + ?Sized,
        OM: Write1D<T> + ?Sized;

    /// Evaluate the response of `b / a` and allocate the output.
    fn run_alloc<I1, I2>(&self, b: &I1, a: &I2) -> Result<Self::Output, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized;
}
