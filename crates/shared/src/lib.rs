//! Shared types, errors, and configuration for exconv.
//!
//! This crate provides common types used across all other crates:
//! - Rounding policy for converted amounts
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::{AppConfig, ConverterConfig, FeedConfig, LogConfig};
pub use error::{AppError, AppResult};
pub use types::RoundingMode;
