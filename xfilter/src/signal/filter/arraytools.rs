//! Functions for acting on a axis of an array.

use ndarray::{ArrayBase, Data, Dimension};
use xfilter_core::{Error, Result};

/// Resolve a user-specified axis against `x`.
///
/// `None` selects the last axis and negative values count from the end, so valid values satisfy
/// `-ndim <= axis < ndim`.
///
/// # Parameters
/// axis: The user-specificed axis which filter is to be applied on.
/// x: The input-data whose axis object that will be manipulated against.
#[inline]
pub(crate) fn check_and_get_axis<S, D>(axis: Option<isize>, x: &ArrayBase<S, D>) -> Result<usize>
where
    D: Dimension,
    S: Data,
{
    let ndim = D::NDIM.unwrap_or(x.ndim());
    let requested = axis.unwrap_or(-1);
    let resolved = if requested < 0 {
        ndim.checked_add_signed(requested)
    } else {
        Some(requested.unsigned_abs()).filter(|ax| *ax < ndim)
    };
    resolved.ok_or(Error::AxisOutOfRange {
        axis: requested,
        ndim,
    })
}
