//! Fluent builder for `ConverterConfig`
//!
//! All fields have defaults, so unlike a typestate builder there is nothing
//! required; `build()` validates the combination instead.

use regex::Regex;
use std::sync::LazyLock;

use super::types::{ConverterConfig, EncodingStrategy, HeadingStyle};
use crate::converter::{ConvertError, ConvertResult};

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("HEX_COLOR_RE: hardcoded regex is valid")
});

static CLASS_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("CLASS_PREFIX_RE: hardcoded regex is valid")
});

/// Check a config for values the emitters cannot use
pub(crate) fn validate(config: &ConverterConfig) -> ConvertResult<()> {
    if let Some(color) = &config.heading_style.title_color {
        if !HEX_COLOR_RE.is_match(color) {
            return Err(ConvertError::Config(format!(
                "heading title color '{color}' is not a hex colour"
            )));
        }
    }
    if config.elementor_version.trim().is_empty() {
        return Err(ConvertError::Config("elementor_version must not be empty".into()));
    }
    if config.divi_version.trim().is_empty() {
        return Err(ConvertError::Config("divi_version must not be empty".into()));
    }
    if !CLASS_PREFIX_RE.is_match(&config.utility_class_prefix) {
        return Err(ConvertError::Config(format!(
            "utility class prefix '{}' is not a valid CSS identifier",
            config.utility_class_prefix
        )));
    }
    if config.image_cache_capacity == 0 {
        return Err(ConvertError::Config("image_cache_capacity must be at least 1".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    #[must_use]
    pub fn encoding(mut self, strategy: EncodingStrategy) -> Self {
        self.config.encoding = strategy;
        self
    }

    #[must_use]
    pub fn heading_style(mut self, style: HeadingStyle) -> Self {
        self.config.heading_style = style;
        self
    }

    #[must_use]
    pub fn heading_color(mut self, color: impl Into<String>) -> Self {
        self.config.heading_style.title_color = Some(color.into());
        self
    }

    /// Turn heading colour and typography settings on or off
    #[must_use]
    pub fn style_headings(mut self, enabled: bool) -> Self {
        self.config.heading_style.enabled = enabled;
        self
    }

    #[must_use]
    pub fn elementor_version(mut self, version: impl Into<String>) -> Self {
        self.config.elementor_version = version.into();
        self
    }

    #[must_use]
    pub fn divi_version(mut self, version: impl Into<String>) -> Self {
        self.config.divi_version = version.into();
        self
    }

    #[must_use]
    pub fn divi_page_layout(mut self, layout: impl Into<String>) -> Self {
        self.config.divi_page_layout = layout.into();
        self
    }

    #[must_use]
    pub fn utility_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.utility_class_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn element_id_seed(mut self, seed: u64) -> Self {
        self.config.element_id_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn image_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.image_cache_capacity = capacity;
        self
    }

    /// Validate and produce the config
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Config` for a non-hex heading colour, an empty
    /// version string, an invalid class prefix or a zero cache capacity.
    pub fn build(self) -> ConvertResult<ConverterConfig> {
        validate(&self.config)?;
        Ok(self.config)
    }
}
