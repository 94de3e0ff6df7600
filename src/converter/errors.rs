//! Error types for conversion operations
//!
//! The facade never returns these through `Err`; they are carried in
//! `ConversionResult::error` so callers can persist whatever markup was
//! produced before the failure.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for fallible configuration and option handling
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error types for conversion operations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ConvertError {
    /// Requested builder is not one of auto, elementor, divi, gutenberg
    #[error("Unsupported builder: {0}")]
    UnsupportedBuilder(String),

    /// Option record is contradictory or malformed
    #[error("Invalid conversion options: {0}")]
    InvalidOptions(String),

    /// Image could not be migrated while images were mandatory
    #[error("Image migration failed for {url}: {message}")]
    ImageMigration { url: String, message: String },

    /// Converter configuration failed to load or validate
    #[error("Invalid converter configuration: {0}")]
    Config(String),
}

/// Taxonomy bucket of a conversion error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// External collaborator misbehaved; markup is still usable
    Collaborator,
    /// Caller asked for something the converter cannot do
    InvalidOptions,
    /// Converter was set up with a bad configuration
    Configuration,
}

impl ConvertError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::ImageMigration { .. } => ErrorCategory::Collaborator,
            ConvertError::UnsupportedBuilder(_) | ConvertError::InvalidOptions(_) => {
                ErrorCategory::InvalidOptions
            }
            ConvertError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Check if the failure left usable content behind and may be retried later
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Collaborator
    }
}
