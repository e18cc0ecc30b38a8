use nalgebra::Complex;
use xfilter_core::{Error, Result};

/// Number of poles in excess of zeros.
///
/// # Errors
/// The system is improper (more zeros than poles).
pub(crate) fn relative_degree<F>(zeros: &[Complex<F>], poles: &[Complex<F>]) -> Result<usize> {
    poles
        .len()
        .checked_sub(zeros.len())
        .ok_or_else(|| Error::InvalidArg {
            arg: "zpk".into(),
            reason: "improper transfer function; poles must be >= zeros".into(),
        })
}
