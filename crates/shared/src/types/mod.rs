//! Common types used across the application.

pub mod rounding;

pub use rounding::RoundingMode;
