//! Shared trait-first kernel substrate.
//!
//! Design, zero-phase application and response evaluation are all exposed as
//! kernels: a config struct validated once by [KernelLifecycle::try_new], and a
//! capability trait from [crate::signal::traits] that runs it.

mod errors;
mod io;
mod lifecycle;

pub use errors::*;
pub use io::*;
pub use lifecycle::*;
