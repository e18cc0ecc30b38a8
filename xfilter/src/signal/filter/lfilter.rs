use super::arraytools::check_and_get_axis;
use crate::kernel::ConfigError;
use alloc::{vec, vec::Vec};
use nalgebra::RealField;
use ndarray::{Array, ArrayBase, ArrayView, ArrayView1, ArrayViewMut1, Axis, Data, Dimension, Zip};
use xfilter_core::{Error, Result};

/// Filtered output and, when an initial state was supplied, the final filter state.
pub type LFilterResult<T, D> = (Array<T, D>, Option<Array<T, D>>);

/// Transfer function coefficients normalized by `a[0]` and zero-padded to a common length.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Coefficients<T> {
    b: Vec<T>,
    a: Vec<T>,
}

impl<T> Coefficients<T>
where
    T: RealField + Copy,
{
    pub(crate) fn new(b: &[T], a: &[T]) -> core::result::Result<Self, ConfigError> {
        if b.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "b" });
        }
        let a0 = match a.first() {
            None => return Err(ConfigError::EmptyInput { arg: "a" }),
            Some(a0) if a0.is_zero() => {
                return Err(ConfigError::InvalidArgument {
                    arg: "a",
                    reason: "first element of a must be non-zero",
                })
            }
            Some(a0) => *a0,
        };

        let n = a.len().max(b.len());
        let normalized = |c: &[T]| {
            let mut out = vec![T::zero(); n];
            out.iter_mut().zip(c).for_each(|(o, c)| *o = *c / a0);
            out
        };
        Ok(Self {
            b: normalized(b),
            a: normalized(a),
        })
    }

    /// Numerator, padded to [`Coefficients::ntaps`].
    pub(crate) fn b(&self) -> &[T] {
        &self.b
    }

    /// Denominator with `a[0] == 1`, padded to [`Coefficients::ntaps`].
    pub(crate) fn a(&self) -> &[T] {
        &self.a
    }

    /// `max(len(a), len(b))`.
    pub(crate) fn ntaps(&self) -> usize {
        self.b.len()
    }

    /// Length of the delay line.
    pub(crate) fn state_len(&self) -> usize {
        self.b.len() - 1
    }

    /// Advance the direct form II transposed recursion by one sample.
    #[inline]
    fn step(&self, x: T, z: &mut [T]) -> T {
        let y = self.b[0] * x + z.first().copied().unwrap_or_else(T::zero);
        let n = z.len();
        for i in 0..n {
            let next = if i + 1 < n { z[i + 1] } else { T::zero() };
            z[i] = self.b[i + 1] * x + next - self.a[i + 1] * y;
        }
        y
    }

    /// Filter `samples` in place, carrying the delay line `z` across calls.
    pub(crate) fn filter_in_place<'a, I>(&self, samples: I, z: &mut [T])
    where
        I: IntoIterator<Item = &'a mut T>,
        T: 'a,
    {
        debug_assert_eq!(z.len(), self.state_len());
        for s in samples {
            *s = self.step(*s, z);
        }
    }

    fn filter_lane(&self, x: ArrayView1<T>, mut y: ArrayViewMut1<T>, z: &mut [T]) {
        y.assign(&x);
        self.filter_in_place(y.iter_mut(), z);
    }
}

/// Filter data along one dimension with an IIR or FIR filter.
///
/// Filter a data sequence, `x`, using a digital filter. The filter is a direct form II
/// transposed implementation of the standard difference equation
///
/// ```text
/// a[0]*y[n] = b[0]*x[n] + b[1]*x[n-1] + ... + b[M]*x[n-M]
///                       - a[1]*y[n-1] - ... - a[N]*y[n-N]
/// ```
///
/// # Parameters
/// * `b`: The numerator coefficient vector in a 1-D sequence.
/// * `a`: The denominator coefficient vector in a 1-D sequence. If ``a[0]`` is not 1, then both
///   `a` and `b` are normalized by ``a[0]``.
/// * `x`: An N-dimensional input array.
/// * `axis`: The axis of the input data array along which to apply the linear filter. The filter
///   is applied to each subarray along this axis. Default is -1.
/// * `zi`: Initial conditions for the filter delays. It is an array of the shape of `x` with
///   the filter axis replaced by `max(len(a), len(b)) - 1`. If `None`, initial rest is assumed.
///
/// # Returns
/// The filtered output with the shape of `x`, and the final filter delay values when `zi` was
/// given.
///
/// # Errors
/// Empty coefficients, `a[0] == 0`, a bad axis, or `zi` of the wrong shape.
///
/// # Examples
/// ```
/// use ndarray::array;
/// use xfilter::signal::filter::lfilter;
///
/// let b = array![5., 4., 1., 2.];
/// let a = array![1.];
/// let x = array![1., 2., 3., 4., 3., 5., 6.];
/// let (y, zf) = lfilter(b.view(), a.view(), &x, None, None).unwrap();
/// assert_eq!(y, array![5., 14., 24., 36., 38., 47., 61.]);
/// assert!(zf.is_none());
/// ```
pub fn lfilter<T, S, D>(
    b: ArrayView1<T>,
    a: ArrayView1<T>,
    x: &ArrayBase<S, D>,
    axis: Option<isize>,
    zi: Option<ArrayView<T, D>>,
) -> Result<LFilterResult<T, D>>
where
    T: RealField + Copy,
    S: Data<Elem = T>,
    D: Dimension,
{
    let b = b.to_vec();
    let a = a.to_vec();
    let coeffs = Coefficients::new(&b, &a).map_err(Error::from)?;
    let ax = Axis(check_and_get_axis(axis, x)?);

    let mut y = Array::zeros(x.raw_dim());
    match zi {
        None => {
            let mut z = vec![T::zero(); coeffs.state_len()];
            Zip::from(y.lanes_mut(ax))
                .and(x.lanes(ax))
                .for_each(|out, lane| {
                    z.iter_mut().for_each(|s| *s = T::zero());
                    coeffs.filter_lane(lane, out, &mut z);
                });
            Ok((y, None))
        }
        Some(zi) => {
            let mut expected = x.raw_dim();
            expected[ax.index()] = coeffs.state_len();
            if zi.raw_dim() != expected {
                return Err(Error::InvalidArg {
                    arg: "zi".into(),
                    reason: alloc::format!(
                        "expected shape {:?}, got {:?}.",
                        expected.slice(),
                        zi.shape()
                    ),
                });
            }
            let mut zf = zi.to_owned();
            let mut z = vec![T::zero(); coeffs.state_len()];
            Zip::from(y.lanes_mut(ax))
                .and(x.lanes(ax))
                .and(zf.lanes_mut(ax))
                .for_each(|out, lane, mut state| {
                    z.iter_mut().zip(state.iter()).for_each(|(s, v)| *s = *v);
                    coeffs.filter_lane(lane, out, &mut z);
                    state.iter_mut().zip(&z).for_each(|(s, v)| *s = *v);
                });
            Ok((y, Some(zf)))
        }
    }
}
