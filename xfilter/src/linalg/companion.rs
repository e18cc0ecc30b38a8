use crate::kernel::ConfigError;
use core::ops::{Div, Neg};
use nalgebra::{DMatrix, Scalar};
use num_traits::{One, Zero};

///
/// Create a companion matrix.
///
/// The first row holds `-coeffs[1..] / coeffs[0]` and the sub-diagonal is one. The eigenvalues
/// of the result are the roots of the polynomial `coeffs` (highest power first).
///
/// # Errors
/// Fewer than two coefficients, or a zero leading coefficient.
///
/// # Example
/// ```
/// use nalgebra::matrix;
/// use xfilter::linalg::companion;
///
/// let m = companion(&[1.0f64, -10.0, 31.0, -30.0]).unwrap();
/// assert_eq!(
///     m,
///     matrix![10., -31., 30.;
///             1., 0., 0.;
///             0., 1., 0.]
/// );
/// ```
pub fn companion<T>(coeffs: &[T]) -> Result<DMatrix<T>, ConfigError>
where
    T: Scalar + One + Zero + Div<Output = T> + Neg<Output = T> + Copy + PartialEq,
{
    if coeffs.len() < 2 {
        return Err(ConfigError::InvalidArgument {
            arg: "coeffs",
            reason: "companion requires at least 2 coefficients",
        });
    }
    if coeffs[0] == T::zero() {
        return Err(ConfigError::InvalidArgument {
            arg: "coeffs",
            reason: "leading coefficient must be non-zero",
        });
    }
    Ok(companion_from_slice(coeffs))
}

fn companion_from_slice<T>(coeffs: &[T]) -> DMatrix<T>
where
    T: Scalar + One + Zero + Div<Output = T> + Neg<Output = T> + Copy,
{
    let m = coeffs.len();
    let a0 = coeffs[0];
    let itr = coeffs
        .iter()
        .skip(1)
        .enumerate()
        .map(|(i, ai)| ((0, i), -*ai / a0))
        .chain((0..(m - 2)).map(|i| (((i + 1), i), T::one())));
    let mut matrix = DMatrix::<T>::zeros(m - 1, m - 1);
    for (idx, t) in itr {
        matrix[idx] = t;
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::matrix;

    #[test]
    fn scipy_example() {
        let data = [1, -10, 31, -30];
        let matrix = companion(&data.map(|i| i as f32)).expect("valid polynomial");

        let expected = matrix!(
            10., -31.,  30.;
            1.,   0.,   0.;
            0.,   1.,   0.;
        );

        assert_eq!(expected, matrix);
    }

    #[test]
    fn leading_coefficient_normalizes_first_row() {
        let matrix = companion(&[2.0f64, 4.0, -6.0]).expect("valid polynomial");
        assert_eq!(matrix, matrix![-2., 3.; 1., 0.]);
    }

    #[test]
    fn degenerate_polynomials_are_rejected() {
        assert_eq!(
            companion(&[1.0f64]),
            Err(ConfigError::InvalidArgument {
                arg: "coeffs",
                reason: "companion requires at least 2 coefficients",
            })
        );
        assert_eq!(
            companion(&[0.0f64, 1.0, 2.0]),
            Err(ConfigError::InvalidArgument {
                arg: "coeffs",
                reason: "leading coefficient must be non-zero",
            })
        );
    }
}
