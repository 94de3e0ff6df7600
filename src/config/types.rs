//! Core configuration types for page-builder conversion
//!
//! This module contains the main `ConverterConfig` struct and its associated
//! types. A config is built once and shared by every conversion.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::converter::{ConvertError, ConvertResult};
use crate::utils::{
    DEFAULT_DIVI_PAGE_LAYOUT, DEFAULT_DIVI_VERSION, DEFAULT_ELEMENTOR_VERSION,
    DEFAULT_HEADING_FONT_FAMILY, DEFAULT_HEADING_FONT_WEIGHT, DEFAULT_IMAGE_CACHE_CAPACITY,
    DEFAULT_UTILITY_CLASS_PREFIX,
};

/// How raw markup is prepared before tree construction.
///
/// Parsing engines disagree on their default encoding behaviour, so the choice
/// is made once here instead of being re-checked on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingStrategy {
    /// Hand the markup to the HTML5 parser untouched
    #[default]
    Html5,
    /// Replace every non-ASCII character with a numeric entity first
    LegacyNumericEntities,
}

/// Styling applied to heading widgets by builders that support it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingStyle {
    /// Master switch for colour and typography settings
    pub enabled: bool,
    /// Hex colour for heading titles, e.g. `#1a1a1a`
    pub title_color: Option<String>,
    /// Emit the fixed typography block
    pub typography: bool,
    pub font_family: String,
    pub font_weight: String,
}

impl Default for HeadingStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            title_color: None,
            typography: true,
            font_family: DEFAULT_HEADING_FONT_FAMILY.to_string(),
            font_weight: DEFAULT_HEADING_FONT_WEIGHT.to_string(),
        }
    }
}

/// Main configuration struct for conversion operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub(crate) encoding: EncodingStrategy,
    pub(crate) heading_style: HeadingStyle,
    pub(crate) elementor_version: String,
    pub(crate) divi_version: String,
    pub(crate) divi_page_layout: String,
    pub(crate) utility_class_prefix: String,

    /// Seed for element ids. `None` draws from the OS RNG; a fixed seed makes
    /// ids reproducible for the same document.
    pub(crate) element_id_seed: Option<u64>,

    pub(crate) image_cache_capacity: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            encoding: EncodingStrategy::default(),
            heading_style: HeadingStyle::default(),
            elementor_version: DEFAULT_ELEMENTOR_VERSION.to_string(),
            divi_version: DEFAULT_DIVI_VERSION.to_string(),
            divi_page_layout: DEFAULT_DIVI_PAGE_LAYOUT.to_string(),
            utility_class_prefix: DEFAULT_UTILITY_CLASS_PREFIX.to_string(),
            element_id_seed: None,
            image_cache_capacity: DEFAULT_IMAGE_CACHE_CAPACITY,
        }
    }
}

impl ConverterConfig {
    /// Start a fluent builder from the defaults
    #[must_use]
    pub fn builder() -> super::ConverterConfigBuilder {
        super::ConverterConfigBuilder::default()
    }

    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ConvertResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConvertError::Config(format!("malformed config JSON: {e}")))?;
        super::builder::validate(&config)?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}
