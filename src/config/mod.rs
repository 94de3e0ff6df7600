//! Configuration module for page-builder conversion
//!
//! This module provides the `ConverterConfig` struct and its fluent builder
//! for configuring the converter with validation and sensible defaults.
//! Everything the emitters need is threaded through this struct rather than
//! read from ambient state mid-traversal.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::ConverterConfigBuilder;
pub use types::{ConverterConfig, EncodingStrategy, HeadingStyle};
