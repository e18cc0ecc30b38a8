use super::arraytools::check_and_get_axis;
use super::kernels::{FiltFiltConfig, FiltFiltKernel};
use crate::kernel::KernelLifecycle;
use alloc::vec::Vec;
use core::ops::{Add, Sub};
use nalgebra::RealField;
use ndarray::{Array, ArrayBase, ArrayView1, ArrayViewMut1, Axis, Data, Dimension, Zip};
use num_traits::Zero;
use xfilter_core::{Error, Result};

/// Padding utilised in [filtfilt].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FiltFiltPadType {
    /// Odd extensions
    #[default]
    Odd,
    /// Even extensions
    Even,
    /// Constant extensions
    Const,
}

impl FiltFiltPadType {
    /// Extensions on ndarrays.
    ///
    /// # Parameters
    /// `self`: Type of extension.
    /// `x`: Array to extend on.
    /// `n`: The number of elements by which to extend `x` at each end of the axis.
    /// `axis`: The axis along which to extend `x`. Default is -1.
    ///
    /// ## Type of extension
    /// * odd: Odd extension at the boundaries of an array, generating a new ndarray by making an
    ///   odd extension of `x` along the specified axis.
    /// * even: Even extension at the boundaries of an array, generating a new ndarray by making an
    ///   even extension of `x` along the specified axis.
    /// * const: Constant extension at the boundaries of an array, generating a new ndarray by
    ///   making an constant extension of `x` along the specified axis.
    ///
    /// # Errors
    /// A bad axis, or `n` not shorter than the axis.
    ///
    /// ```
    /// use ndarray::array;
    /// use xfilter::signal::filter::FiltFiltPadType;
    ///
    /// let a = array![[1, 2, 3, 4, 5], [0, 1, 4, 9, 16]];
    /// let odd = FiltFiltPadType::Odd.ext(&a, 2, None).unwrap();
    /// assert_eq!(odd, array![[-1, 0, 1, 2, 3, 4, 5, 6, 7], [-4, -1, 0, 1, 4, 9, 16, 23, 28]]);
    /// ```
    pub fn ext<T, S, D>(
        &self,
        x: &ArrayBase<S, D>,
        n: usize,
        axis: Option<isize>,
    ) -> Result<Array<T, D>>
    where
        T: Copy + Zero + Add<T, Output = T> + Sub<T, Output = T>,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let ax = Axis(check_and_get_axis(axis, x)?);
        let axis_len = x.len_of(ax);
        if n >= axis_len && n > 0 {
            return Err(Error::InvalidArg {
                arg: "n".into(),
                reason: "Extension of array cannot be longer than array in specified axis.".into(),
            });
        }

        let mut out_dim = x.raw_dim();
        out_dim[ax.index()] = axis_len + 2 * n;
        let mut out = Array::zeros(out_dim);
        Zip::from(out.lanes_mut(ax))
            .and(x.lanes(ax))
            .for_each(|mut out, lane| {
                out.iter_mut()
                    .zip(self.extend_lane(lane, n))
                    .for_each(|(o, v)| *o = v);
            });
        Ok(out)
    }

    /// Extend one lane by `n` samples at each end; `n < lane.len()` unless `n == 0`.
    pub(crate) fn extend_lane<T>(&self, x: ArrayView1<T>, n: usize) -> Vec<T>
    where
        T: Copy + Add<T, Output = T> + Sub<T, Output = T>,
    {
        let len = x.len();
        let mut out = Vec::with_capacity(len + 2 * n);
        if n == 0 {
            out.extend(x.iter().copied());
            return out;
        }
        let (first, last) = (x[0], x[len - 1]);
        match self {
            FiltFiltPadType::Odd => {
                out.extend((1..=n).rev().map(|i| first + first - x[i]));
                out.extend(x.iter().copied());
                out.extend((0..n).map(|i| last + last - x[len - 2 - i]));
            }
            FiltFiltPadType::Even => {
                out.extend((1..=n).rev().map(|i| x[i]));
                out.extend(x.iter().copied());
                out.extend((0..n).map(|i| x[len - 2 - i]));
            }
            FiltFiltPadType::Const => {
                out.extend(core::iter::repeat(first).take(n));
                out.extend(x.iter().copied());
                out.extend(core::iter::repeat(last).take(n));
            }
        }
        out
    }
}

/// Arguments for [filtfilt].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FiltFiltPad {
    /// Padding type.
    pub pad_type: FiltFiltPadType,
    /// Length of padding. `None` selects `3 * max(len(a), len(b))`.
    pub len: Option<usize>,
}

impl FiltFiltPad {
    /// Pad length for a filter with `ntaps = max(len(a), len(b))`.
    pub fn padlen(&self, ntaps: usize) -> usize {
        self.len.unwrap_or(3 * ntaps)
    }
}

/// Apply a digital filter forward and backward to a signal.
///
/// This function applies a linear digital filter twice, once forward and once backwards. The
/// combined filter has zero phase and a filter order twice that of the original.
///
/// The function provides options for handling the edges of the signal.
///
/// # Parameters
/// * `b`: (N,) array_like
///   The numerator coefficient vector of the filter.
/// * `a`: (N,) array_like
///   The denominator coefficient vector of the filter.  If ``a[0]``
///   is not 1, then both `a` and `b` are normalized by ``a[0]``.
/// * `x`: array_like
///   The array of data to be filtered.
/// * `axis`: int, optional
///   The axis of `x` to which the filter is applied. Default is -1.
/// * `pad`
///   [Option::None] here denotes a deliberate absence of padding.
///   * `pad_type` [FiltFiltPadType]
///     This determines the type of extension to use for the padded signal to which the filter
///     is applied. The default is 'odd'.
///   * `len` The number of elements by which to extend `x` at both ends of `axis` before
///     applying the filter. [Option::None] here denotes the default value of
///     ``3 * max(len(a), len(b))``.
///
/// # Returns
/// The filtered output with the same shape as `x`.
///
/// # Errors
/// [Error::InsufficientSignalLength] when the filter axis is not longer than the pad length,
/// [Error::AxisOutOfRange] for a bad axis, and [Error::InvalidArg] for invalid coefficients.
///
/// # Example
/// The following examples shows how to use an arbitrary FIR filter on a 2-dimensional input
/// `x`.
/// ```
/// use xfilter::signal::filter::{filtfilt, FiltFiltPad};
/// use ndarray::array;
///
/// let x = array![
///     [1., 2., 3., 4., 5., 6., 7., 8., 9., 10.],
///     [0., 1., 4., 9., 16., 25., 36., 49., 64., 81.]
/// ];
/// let b = array![0.5, 0.4, 0.1];
/// let a = array![1.];
/// let result = filtfilt(b.view(), a.view(), &x, Some(1), Some(FiltFiltPad::default())).unwrap();
///
/// use approx::assert_relative_eq;
/// use ndarray::Zip;
/// let expected = array![
///     [1., 2., 3., 4., 5., 6., 7., 8., 9., 10.],
///     [0., 1.78, 4.88, 9.88, 16.88, 25.88, 36.88, 49.88, 64.78, 81.]
/// ];
/// Zip::from(&result).and(&expected)
///     .for_each(|&r, &e| assert_relative_eq!(r, e, max_relative = 1e-6));
/// ```
///
/// # Notes
/// The data is padded along the given axis in one of three ways: odd, even or constant. The odd
/// and even extensions have the corresponding symmetry about the end point of the data. The
/// constant extension extends the data with the values at the end points. On both the forward
/// and backward passes, the initial condition of the filter is found by using
/// [super::lfilter_zi] and scaling it by the end point of the extended data.
pub fn filtfilt<T, S, D>(
    b: ArrayView1<T>,
    a: ArrayView1<T>,
    x: &ArrayBase<S, D>,
    axis: Option<isize>,
    pad: Option<FiltFiltPad>,
) -> Result<Array<T, D>>
where
    T: RealField + Copy,
    S: Data<Elem = T>,
    D: Dimension,
{
    let kernel = FiltFiltKernel::try_new(FiltFiltConfig {
        b: b.to_vec(),
        a: a.to_vec(),
        pad,
    })?;
    kernel.run_axis(x, axis)
}

impl<T> FiltFiltKernel<T>
where
    T: RealField + Copy,
{
    /// Zero-phase filter every lane of `x` along `axis` (default -1).
    ///
    /// Lanes are independent; with the `rayon` feature they are filtered in parallel.
    ///
    /// # Errors
    /// [Error::AxisOutOfRange] for a bad axis and [Error::InsufficientSignalLength] when the
    /// filter axis is not longer than [FiltFiltKernel::padlen].
    pub fn run_axis<S, D>(&self, x: &ArrayBase<S, D>, axis: Option<isize>) -> Result<Array<T, D>>
    where
        S: Data<Elem = T>,
        D: Dimension,
    {
        let ax = Axis(check_and_get_axis(axis, x)?);
        let axis_len = x.len_of(ax);
        let padlen = self.padlen();
        if axis_len <= padlen {
            return Err(Error::InsufficientSignalLength { axis_len, padlen });
        }
        log::debug!(
            "filtfilt: axis={} len={} padlen={} lanes={}",
            ax.index(),
            axis_len,
            padlen,
            x.len() / axis_len
        );

        let mut y = Array::zeros(x.raw_dim());
        let lanes = Zip::from(y.lanes_mut(ax)).and(x.lanes(ax));
        #[cfg(feature = "rayon")]
        lanes.par_for_each(|out, lane| self.filter_lane(lane, out));
        #[cfg(not(feature = "rayon"))]
        lanes.for_each(|out, lane| self.filter_lane(lane, out));
        Ok(y)
    }

    /// Forward-backward pass over one lane. The lane is longer than the pad length.
    pub(crate) fn filter_lane(&self, x: ArrayView1<T>, mut out: ArrayViewMut1<T>) {
        let edge = self.padlen();
        let pad_type = self.pad().map(|p| p.pad_type).unwrap_or_default();
        let mut ext = pad_type.extend_lane(x, edge);
        let zi = self.zi();
        let mut z = Vec::with_capacity(zi.len());

        z.extend(zi.iter().map(|v| *v * ext[0]));
        self.coeffs().filter_in_place(ext.iter_mut(), &mut z);

        ext.reverse();
        z.clear();
        z.extend(zi.iter().map(|v| *v * ext[0]));
        self.coeffs().filter_in_place(ext.iter_mut(), &mut z);
        ext.reverse();

        out.iter_mut()
            .zip(&ext[edge..edge + x.len()])
            .for_each(|(o, v)| *o = *v);
    }
}
