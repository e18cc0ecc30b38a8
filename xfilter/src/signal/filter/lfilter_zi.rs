use super::lfilter::Coefficients;
use crate::linalg::companion;
use alloc::vec::Vec;
use itertools::izip;
use nalgebra::{DMatrix, DVector, RealField};
use xfilter_core::{Error, Result};

/// Construct initial conditions for lfilter for step response steady-state.
///
/// Compute an initial state `zi` for the [super::lfilter] function that corresponds to the
/// steady state of the step response. A typical use of this function is to set the initial
/// state so that the output of the filter starts at the same value as the first element of the
/// signal to be filtered.
///
/// The state solves `(I - companion(a)^T) zi = b[1:] - a[1:] * b[0]` with `a` and `b`
/// normalized by `a[0]` and padded to a common length.
///
/// # Errors
/// Empty coefficients, `a[0] == 0`, or a singular system (a pole at `z = 1`).
///
/// ```
/// use approx::assert_relative_eq;
/// use xfilter::signal::filter::lfilter_zi;
///
/// let b = [0.2928932188134524, 0.5857864376269049, 0.2928932188134524];
/// let a = [1., 0., 0.17157287525380988];
/// let zi = lfilter_zi(&b, &a).unwrap();
/// assert_relative_eq!(zi[0], 0.7071067811865475, max_relative = 1e-12);
/// assert_relative_eq!(zi[1], 0.12132034355964254, max_relative = 1e-12);
/// ```
pub fn lfilter_zi<T>(b: &[T], a: &[T]) -> Result<Vec<T>>
where
    T: RealField + Copy,
{
    let coeffs = Coefficients::new(b, a).map_err(Error::from)?;
    steady_state(&coeffs)
}

pub(crate) fn steady_state<T>(coeffs: &Coefficients<T>) -> Result<Vec<T>>
where
    T: RealField + Copy,
{
    let n = coeffs.state_len();
    if n == 0 {
        return Ok(Vec::new());
    }
    let (b, a) = (coeffs.b(), coeffs.a());

    let i_minus_a = DMatrix::<T>::identity(n, n) - companion(a)?.transpose();
    let b0 = b[0];
    let rhs = DVector::from_iterator(
        n,
        izip!(&b[1..], &a[1..]).map(|(bi, ai)| *bi - *ai * b0),
    );

    let zi = i_minus_a.lu().solve(&rhs).ok_or_else(|| Error::InvalidArg {
        arg: "a".into(),
        reason: "steady state is undefined for a filter with a pole at z = 1.".into(),
    })?;
    Ok(zi.iter().copied().collect())
}
