pub mod block_ir;
pub mod config;
pub mod converter;
pub mod css_scoper;
pub mod emitters;
pub mod header_footer;
pub mod html_normalizer;
pub mod image_migration;
pub mod utils;

pub use block_ir::{BlockKind, BlockNode, CapturedHtml, HeadingLevel, ImageSource, UtilityClasses};
pub use config::{ConverterConfig, ConverterConfigBuilder, EncodingStrategy, HeadingStyle};
pub use converter::{
    ActivePluginsProbe, Builder, BuilderChoice, BuilderProbe, ConversionResult, ConvertError,
    ConvertOptions, ConvertRequest, ConvertResult, Converter, ErrorCategory, LegacyPayload,
    StaticProbe,
};
pub use css_scoper::{ScopedStyleSheet, StyleRule, scope_css};
pub use emitters::{BuilderPayload, GutenbergBlock, MetaData, serialize_blocks};
pub use html_normalizer::{NormalizedTree, RawDocument};
pub use image_migration::{
    AttachmentId, CachingMigrator, ImageFailure, ImageMigrationResult, ImageMigrator,
    MigrationOutcome, NoopMigrator, StaticMigrator,
};

/// Convert with the default configuration, no image store and no builder
/// detection
#[must_use]
pub fn convert(html: &str, options: &ConvertOptions) -> ConversionResult {
    Converter::default().convert(html, options)
}
