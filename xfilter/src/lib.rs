#![doc = include_str!("../../README.md")]

extern crate alloc;

/// Trait-first kernel substrate shared by every capability.
pub mod kernel;

/// Linear algebra helpers.
pub mod linalg;

/// Signal processing: filter design, application and response.
pub mod signal;

mod butter;
pub use butter::*;

pub use signal::filter::design::{ButterConfig, Cutoff, FilterBandType};
pub use xfilter_core::{Error, Result};
