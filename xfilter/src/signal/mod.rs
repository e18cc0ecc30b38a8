//! Digital signal processing: Butterworth design, zero-phase filtering and frequency response.

/// Digital filter design and application.
pub mod filter;

/// Capability traits implemented by the signal kernels.
pub mod traits;

mod response;
pub use response::*;
