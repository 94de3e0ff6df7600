//! Getter methods for `ConverterConfig`
//!
//! This module provides the accessor methods for retrieving configuration
//! values from a `ConverterConfig` instance.

use super::types::{ConverterConfig, EncodingStrategy, HeadingStyle};
use crate::block_ir::UtilityClasses;

impl ConverterConfig {
    #[must_use]
    pub fn encoding(&self) -> EncodingStrategy {
        self.encoding
    }

    #[must_use]
    pub fn heading_style(&self) -> &HeadingStyle {
        &self.heading_style
    }

    #[must_use]
    pub fn elementor_version(&self) -> &str {
        &self.elementor_version
    }

    #[must_use]
    pub fn divi_version(&self) -> &str {
        &self.divi_version
    }

    #[must_use]
    pub fn divi_page_layout(&self) -> &str {
        &self.divi_page_layout
    }

    #[must_use]
    pub fn utility_class_prefix(&self) -> &str {
        &self.utility_class_prefix
    }

    #[must_use]
    pub fn element_id_seed(&self) -> Option<u64> {
        self.element_id_seed
    }

    #[must_use]
    pub fn image_cache_capacity(&self) -> usize {
        self.image_cache_capacity
    }

    /// Class names stamped on captured blocks during lowering
    #[must_use]
    pub fn utility_classes(&self) -> UtilityClasses {
        UtilityClasses::from_prefix(&self.utility_class_prefix)
    }
}
