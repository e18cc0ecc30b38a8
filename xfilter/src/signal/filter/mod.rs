//! Digital IIR filtering: design, direct-form application and zero-phase filtering.
//!
//! Functions mirror the [`Filtering` section of
//! `scipy.signal`](https://docs.scipy.org/doc/scipy/reference/signal.html#filtering) that
//! Butterworth forward-backward filtering relies on.

/// Digital IIR filter design.
/// Functions located in the [`Filter design` section of
/// `scipy.signal`](https://docs.scipy.org/doc/scipy/reference/signal.html#filter-design).
pub mod design;

mod arraytools;
mod filtfilt;
mod kernels;
mod lfilter;
mod lfilter_zi;

pub use filtfilt::*;
pub use kernels::*;
pub use lfilter::*;
pub use lfilter_zi::*;
