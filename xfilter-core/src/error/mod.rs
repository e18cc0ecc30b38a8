use alloc::string::String;
use core::fmt;

/// Errors raised whilst designing or applying filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Filter order was not a positive integer.
    InvalidOrder {
        /// The rejected order.
        order: usize,
    },
    /// Cutoff frequencies were non-positive, at or above Nyquist, or unordered.
    InvalidCutoff {
        /// Explaining why the cutoff is invalid.
        reason: String,
    },
    /// The filter axis is too short for the edge extension.
    InsufficientSignalLength {
        /// Length of the input along the filter axis.
        axis_len: usize,
        /// Number of samples the input is extended by at each end.
        padlen: usize,
    },
    /// The requested axis does not exist on the input.
    AxisOutOfRange {
        /// The requested axis, possibly negative.
        axis: isize,
        /// Dimensionality of the input.
        ndim: usize,
    },
    /// Convolution backend failure.
    Conv {
        /// Reason reported by the convolution backend.
        reason: String,
    },
    /// Argument parsed into function were invalid.
    InvalidArg {
        /// The invalid arg
        arg: String,
        /// Explaining why arg is invalid.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOrder { order } => {
                write!(f, "Invalid filter order {order}: order must be at least 1.")
            }
            Error::InvalidCutoff { reason } => write!(f, "Invalid cutoff: {reason}"),
            Error::InsufficientSignalLength { axis_len, padlen } => write!(
                f,
                "The length of the input along the filter axis ({axis_len}) \
                 must be greater than padlen ({padlen})."
            ),
            Error::Conv { reason } => write!(f, "Convolution failed: {reason}"),
            Error::AxisOutOfRange { axis, ndim } => {
                write!(f, "Axis {axis} is out of range for a {ndim}-dimensional input.")
            }
            Error::InvalidArg { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used across xfilter.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_offending_values() {
        let err = Error::InsufficientSignalLength {
            axis_len: 9,
            padlen: 9,
        };
        assert_eq!(
            err.to_string(),
            "The length of the input along the filter axis (9) must be greater than padlen (9)."
        );

        let err = Error::Conv {
            reason: "kernel too large".into(),
        };
        let source: &dyn std::error::Error = &err;
        assert_eq!(source.to_string(), "Convolution failed: kernel too large");

        let err = Error::AxisOutOfRange { axis: -3, ndim: 2 };
        assert_eq!(
            err.to_string(),
            "Axis -3 is out of range for a 2-dimensional input."
        );
    }
}
