mod ndarray_conv_binds;

use crate::{Error, Result};
use alloc::string::ToString;
use ndarray::{Array1, ArrayView1};
use ndarray_conv::{ConvExt, PaddingMode};
use num_traits::NumAssign;

/// Convolution mode determines behavior near edges and output size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMode {
    /// Full convolution, output size is `in1.len() + in2.len() - 1`
    #[default]
    Full,
    /// Valid convolution, output size is
    /// `max(in1.len(), in2.len()) - min(in1.len(), in2.len()) + 1`
    Valid,
    /// Same convolution, output size is `max(in1.len(), in2.len())`
    Same,
}

/// Best effort parallel behaviour with numpy's convolve method.
///
/// Returns the discrete, linear convolution of two one-dimensional sequences. When both
/// sequences hold polynomial coefficients, the full convolution is the coefficient sequence of
/// their product, which is how the filter design routines multiply polynomials.
///
/// # Parameters
/// * `a` : (N,) [[array_like]]([ndarray::Array1])
///   Signal to be (linearly) convolved.
/// * `v` : (M,) [[array_like]]([ndarray::Array1])
///   Second one-dimensional input array.
/// * `mode` : [ConvolveMode]
///   [ConvolveMode::Full]:
///   By default, mode is 'full'.  This returns the convolution at each point of overlap, with an
///   output shape of (N+M-1,). At the end-points of the convolution, the signals do not overlap
///   completely, and boundary effects may be seen.
///
///   [ConvolveMode::Same]:
///   Mode 'same' returns output of length ``max(M, N)``.  Boundary effects are still visible.
///
///   [ConvolveMode::Valid]:
///   Mode 'valid' returns output of length ``max(M, N) - min(M, N) + 1``.  The convolution
///   product is only given for points where the signals overlap completely.  Values outside the
///   signal boundary have no effect.
///
/// # Errors
/// Either input is empty.
///
/// # Examples
/// With [ConvolveMode::Full]:
/// ```
/// use ndarray::array;
/// use xfilter_core::num_rs::{ConvolveMode, convolve};
///
/// let a = array![1., 2., 3.];
/// let v = array![0., 1., 0.5];
///
/// let expected = array![0., 1., 2.5, 4., 1.5];
/// let result = convolve((&a).into(), (&v).into(), ConvolveMode::Full).unwrap();
/// assert_eq!(result, expected);
/// ```
/// Multiplying `(1 + x)(1 - x)`:
/// ```
/// use ndarray::array;
/// use xfilter_core::num_rs::{ConvolveMode, convolve};
///
/// let p = convolve(array![1., 1.].view(), array![1., -1.].view(), ConvolveMode::Full).unwrap();
/// assert_eq!(p, array![1., 0., -1.]);
/// ```
pub fn convolve<T>(a: ArrayView1<T>, v: ArrayView1<T>, mode: ConvolveMode) -> Result<Array1<T>>
where
    T: NumAssign + Copy,
{
    if a.is_empty() {
        return Err(Error::InvalidArg {
            arg: "a".into(),
            reason: "cannot convolve an empty array.".into(),
        });
    }
    if v.is_empty() {
        return Err(Error::InvalidArg {
            arg: "v".into(),
            reason: "cannot convolve an empty array.".into(),
        });
    }

    // numpy treats the longer sequence as the signal
    let (a, v) = (a.view(), v.view());
    let (signal, kernel) = if a.len() >= v.len() { (a, v) } else { (v, a) };
    signal
        .conv(&kernel, mode.into(), PaddingMode::Zeros)
        .map_err(|e| Error::Conv {
            reason: e.to_string(),
        })
}
