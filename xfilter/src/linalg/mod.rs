//! Linear algebra helpers backing the filter routines.

mod companion;

pub use companion::*;
