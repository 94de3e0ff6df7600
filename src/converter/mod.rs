//! Converter facade
//!
//! Runs the whole pipeline for one document:
//!
//! 1. Normalize raw markup into a body-rooted tree
//! 2. Pull `<style>` rules out of the tree
//! 3. Split off header and footer regions
//! 4. Lower body (and regions) to block nodes
//! 5. Emit with the selected builder
//!
//! Every entry point returns a `ConversionResult`; failures are reported in
//! its `error` field instead of through `Err`.

use anyhow::{Context, Result};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub mod detection;
pub mod errors;
pub mod legacy;
pub mod options;
pub mod result;

pub use detection::{ActivePluginsProbe, BuilderProbe, StaticProbe};
pub use errors::{ConvertError, ConvertResult, ErrorCategory};
pub use legacy::LegacyPayload;
pub use options::{Builder, BuilderChoice, ConvertOptions};
pub use result::ConversionResult;

use crate::block_ir::{BlockNode, HeadingLevel, lower};
use crate::config::ConverterConfig;
use crate::css_scoper::{StyleRule, extract_styles, post_scope_token, render_rules, scope};
use crate::emitters::{EmitContext, ImageResolver, emitter_for};
use crate::header_footer::extract_header_footer;
use crate::html_normalizer::{NormalizedTree, RawDocument, normalize, normalize_document};
use crate::image_migration::{CachingMigrator, ImageMigrator, NoopMigrator};

/// A conversion request with the builder still a free-form string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub html: String,
    #[serde(default = "default_builder_name")]
    pub builder: String,
    #[serde(default)]
    pub options: ConvertOptions,
}

fn default_builder_name() -> String {
    "auto".to_string()
}

/// Shared, thread-safe entry point. Cloning is cheap.
#[derive(Clone)]
pub struct Converter {
    config: Arc<ConverterConfig>,
    migrator: Arc<dyn ImageMigrator>,
    probe: Arc<dyn BuilderProbe>,
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl Converter {
    /// Converter with no image store and no active builder detected
    #[must_use]
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config: Arc::new(config),
            migrator: Arc::new(NoopMigrator),
            probe: Arc::new(StaticProbe(None)),
        }
    }

    /// Load the config from a JSON file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = ConverterConfig::from_file(path)
            .with_context(|| format!("Failed to load converter config from {}", path.display()))?;
        Ok(Self::new(config))
    }

    #[must_use]
    pub fn with_image_migrator(mut self, migrator: impl ImageMigrator + 'static) -> Self {
        self.migrator = Arc::new(migrator);
        self
    }

    /// Put `migrator` behind a URL-keyed cache sized from the config
    #[must_use]
    pub fn with_cached_image_migrator(self, migrator: impl ImageMigrator + 'static) -> Self {
        let capacity = self.config.image_cache_capacity();
        self.with_image_migrator(CachingMigrator::new(migrator, capacity))
    }

    #[must_use]
    pub fn with_builder_probe(mut self, probe: impl BuilderProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Concrete builder for a choice; `Auto` asks the probe and falls back to
    /// Gutenberg, which needs no plugin.
    #[must_use]
    pub fn resolve_builder(&self, choice: BuilderChoice) -> Builder {
        if let Some(builder) = choice.explicit() {
            return builder;
        }
        match self.probe.detect_active_builder() {
            Some(builder) => {
                tracing::debug!("Auto-detected active builder: {}", builder);
                builder
            }
            None => {
                tracing::debug!("No active builder detected, using gutenberg");
                Builder::Gutenberg
            }
        }
    }

    /// Convert an HTML string
    #[must_use]
    pub fn convert(&self, html: &str, options: &ConvertOptions) -> ConversionResult {
        let builder = self.resolve_builder(options.builder);
        if let Err(e) = options.validate() {
            tracing::warn!("Rejecting conversion options: {}", e);
            return ConversionResult::failed(builder, e);
        }
        let tree = normalize(html, self.config.encoding());
        self.run(tree, builder, options)
    }

    /// Convert a decoded byte document
    #[must_use]
    pub fn convert_document(&self, raw: &RawDocument, options: &ConvertOptions) -> ConversionResult {
        let builder = self.resolve_builder(options.builder);
        if let Err(e) = options.validate() {
            tracing::warn!("Rejecting conversion options: {}", e);
            return ConversionResult::failed(builder, e);
        }
        let tree = normalize_document(raw, self.config.encoding());
        self.run(tree, builder, options)
    }

    /// Convert a request whose builder name has not been parsed yet
    #[must_use]
    pub fn convert_request(&self, request: &ConvertRequest) -> ConversionResult {
        match request.builder.parse::<BuilderChoice>() {
            Ok(choice) => {
                let options = ConvertOptions {
                    builder: choice,
                    ..request.options.clone()
                };
                self.convert(&request.html, &options)
            }
            Err(e) => {
                tracing::warn!("Rejecting conversion request: {}", e);
                ConversionResult::failed(Builder::Gutenberg, e)
            }
        }
    }

    /// Entry point for older call sites
    #[must_use]
    pub fn convert_legacy(&self, payload: &LegacyPayload) -> ConversionResult {
        self.convert(&payload.post_content, &payload.to_options())
    }

    /// Convert on the blocking pool
    pub async fn convert_async(&self, html: &str, options: &ConvertOptions) -> Result<ConversionResult> {
        let converter = self.clone();
        let html = Arc::<str>::from(html);
        let options = options.clone();

        tokio::task::spawn_blocking(move || converter.convert(&html, &options))
            .await
            .map_err(|e| anyhow::anyhow!("Page-builder conversion task panicked: {}", e))
    }

    /// Convert independent documents concurrently, results in input order
    pub async fn convert_batch(
        &self,
        documents: &[(String, ConvertOptions)],
    ) -> Vec<Result<ConversionResult>> {
        join_all(
            documents
                .iter()
                .map(|(html, options)| self.convert_async(html, options)),
        )
        .await
    }

    fn run(&self, tree: NormalizedTree, builder: Builder, options: &ConvertOptions) -> ConversionResult {
        let classes = self.config.utility_classes();

        // Styles always leave the tree; preserve_css only decides whether they are kept
        let (tree, rules) = extract_styles(tree);
        let sections = extract_header_footer(tree, options.extract_header_footer, &classes);

        let mut body = lower(&sections.body, &classes);
        if builder.prepends_title() && !options.skip_auto_prepend {
            body = prepend_title_and_image(body, options);
        }

        let emitter = emitter_for(builder);
        let images = ImageResolver::new(
            self.migrator.as_ref(),
            options.upload_images,
            options.base_url.as_deref(),
        );
        let mut ctx = EmitContext::new(&self.config, images, options.post_id);

        // Document order, so the image store sees header images first
        let header = sections
            .header
            .map(|nodes| emitter.emit(&nodes, &mut ctx).content);
        let output = emitter.emit(&body, &mut ctx);
        let footer = sections
            .footer
            .map(|nodes| emitter.emit(&nodes, &mut ctx).content);

        let css_content = if options.preserve_css {
            css_content(&rules, options)
        } else {
            if !rules.is_empty() {
                tracing::debug!("Discarding {} style rules, preserve_css is off", rules.len());
            }
            None
        };

        let image_failures = ctx.images.into_failures();
        let error = if options.require_images {
            image_failures.first().map(|failure| ConvertError::ImageMigration {
                url: failure.url.clone(),
                message: failure.reason.clone(),
            })
        } else {
            None
        };

        tracing::debug!(
            "Converted {} block nodes for {} ({} image failures)",
            body.len(),
            emitter.builder(),
            image_failures.len()
        );

        ConversionResult {
            builder,
            content: output.content,
            meta_data: output.meta_data,
            header,
            footer,
            css_content,
            image_failures,
            error,
        }
    }
}

fn prepend_title_and_image(body: Vec<BlockNode>, options: &ConvertOptions) -> Vec<BlockNode> {
    let mut nodes = Vec::with_capacity(body.len() + 2);
    if let Some(title) = options.page_title.as_deref().map(str::trim) {
        if !title.is_empty() {
            nodes.push(BlockNode::heading(HeadingLevel::H1, title));
        }
    }
    if let Some(image) = &options.featured_image {
        nodes.push(BlockNode::Image(image.clone()));
    }
    nodes.extend(body);
    nodes
}

fn css_content(rules: &[StyleRule], options: &ConvertOptions) -> Option<String> {
    if rules.is_empty() {
        return None;
    }
    let token = if options.scope_css {
        options
            .css_scope
            .clone()
            .or_else(|| options.post_id.map(post_scope_token))
    } else {
        None
    };
    Some(match token {
        Some(token) => scope(rules, &token).to_css(),
        None => render_rules(rules),
    })
}
