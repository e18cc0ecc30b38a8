use alloc::{format, string::ToString};
use core::fmt;
use xfilter_core::Error;

/// Validation errors raised at kernel construction or adapter binding time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required input or configuration field is empty.
    EmptyInput {
        /// Name of the argument that is empty.
        arg: &'static str,
    },
    /// A configuration argument value is invalid.
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Human readable reason.
        reason: &'static str,
    },
    /// Filter order is below one.
    InvalidOrder {
        /// The rejected order.
        order: usize,
    },
    /// Cutoff frequencies fall outside `(0, nyquist)` or are unordered.
    InvalidCutoff {
        /// Human readable reason.
        reason: &'static str,
    },
    /// A contiguous 1D slice view could not be obtained.
    NonContiguous {
        /// Name of the argument that is non-contiguous.
        arg: &'static str,
    },
    /// Output/input lengths did not match required shape.
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyInput { arg } => write!(f, "Input `{arg}` was empty."),
            ConfigError::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            ConfigError::InvalidOrder { order } => {
                write!(f, "Invalid filter order {order}: order must be at least 1.")
            }
            ConfigError::InvalidCutoff { reason } => write!(f, "Invalid cutoff: {reason}"),
            ConfigError::NonContiguous { arg } => {
                write!(f, "Argument `{arg}` is not contiguous in memory.")
            }
            ConfigError::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime execution invariant violations for checked kernel entrypoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecInvariantViolation {
    /// An execution precondition was violated.
    InvalidState {
        /// Human readable reason.
        reason: &'static str,
    },
    /// Output length mismatched the expected runtime shape.
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// The input was too short for the configured edge extension.
    InsufficientSignalLength {
        /// Length of the input.
        len: usize,
        /// Configured pad length.
        padlen: usize,
    },
    /// Adapter binding/configuration failure.
    Config(ConfigError),
    /// The underlying computation rejected the validated inputs.
    Compute(Error),
}

impl From<ConfigError> for ExecInvariantViolation {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<Error> for ExecInvariantViolation {
    fn from(value: Error) -> Self {
        Self::Compute(value)
    }
}

impl fmt::Display for ExecInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecInvariantViolation::InvalidState { reason } => {
                write!(f, "Execution invariant violation: {reason}")
            }
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Execution length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
            ExecInvariantViolation::InsufficientSignalLength { len, padlen } => {
                write!(
                    f,
                    "Input of length {len} is too short for a pad length of {padlen}."
                )
            }
            ExecInvariantViolation::Config(err) => write!(f, "{err}"),
            ExecInvariantViolation::Compute(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ExecInvariantViolation {}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::InvalidOrder { order } => Error::InvalidOrder { order },
            ConfigError::InvalidCutoff { reason } => Error::InvalidCutoff {
                reason: reason.to_string(),
            },
            ConfigError::EmptyInput { arg } => Error::InvalidArg {
                arg: arg.to_string(),
                reason: "input must be non-empty.".into(),
            },
            ConfigError::InvalidArgument { arg, reason } => Error::InvalidArg {
                arg: arg.to_string(),
                reason: reason.to_string(),
            },
            ConfigError::NonContiguous { arg } => Error::InvalidArg {
                arg: arg.to_string(),
                reason: "input must be contiguous in memory.".into(),
            },
            ConfigError::LengthMismatch { arg, expected, got } => Error::InvalidArg {
                arg: arg.to_string(),
                reason: format!("expected length {expected}, got {got}."),
            },
        }
    }
}

impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        match value {
            ExecInvariantViolation::InsufficientSignalLength { len, padlen } => {
                Error::InsufficientSignalLength {
                    axis_len: len,
                    padlen,
                }
            }
            ExecInvariantViolation::InvalidState { reason } => Error::InvalidArg {
                arg: "state".into(),
                reason: reason.to_string(),
            },
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => Error::InvalidArg {
                arg: arg.to_string(),
                reason: format!("expected length {expected}, got {got}."),
            },
            ExecInvariantViolation::Config(err) => err.into(),
            ExecInvariantViolation::Compute(err) => err,
        }
    }
}
