//! Common utility functions for the instrument core
//!
//! Currently this is the home of the decimal-magnitude helpers the
//! calibration engine is built on.

pub mod numeric;

// Re-export commonly used functions for convenience
pub use numeric::{order_of_magnitude, pow10};
