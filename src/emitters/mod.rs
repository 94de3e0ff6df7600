//! Builder emitters
//!
//! Three peer back-ends share one contract: take the lowered block sequence,
//! produce the builder's native payload plus the auxiliary fields the host
//! persists next to it. Each emitter matches `BlockNode` exhaustively.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::block_ir::{BlockNode, ImageSource};
use crate::config::ConverterConfig;
use crate::converter::Builder;
use crate::image_migration::{
    AttachmentId, ImageFailure, ImageMigrator, MigrationOutcome, is_inline_image,
    resolve_source_url,
};
use crate::utils::ElementIdGenerator;

pub mod divi;
pub mod elementor;
pub mod gutenberg;
pub mod shortcode;

pub use divi::DiviEmitter;
pub use elementor::ElementorEmitter;
pub use gutenberg::{GutenbergBlock, GutenbergEmitter, serialize_blocks};

/// Builder-specific fields persisted verbatim against the destination post
pub type MetaData = BTreeMap<String, String>;

/// Native content of one builder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BuilderPayload {
    /// Elementor widget tree
    Elementor(serde_json::Value),
    /// Divi shortcode string
    Divi(String),
    /// Gutenberg block records
    Gutenberg(Vec<GutenbergBlock>),
}

impl BuilderPayload {
    /// Payload with no content, used when a conversion fails before emission
    #[must_use]
    pub fn empty(builder: Builder) -> Self {
        match builder {
            Builder::Elementor => BuilderPayload::Elementor(serde_json::Value::Array(Vec::new())),
            Builder::Divi => BuilderPayload::Divi(String::new()),
            Builder::Gutenberg => BuilderPayload::Gutenberg(Vec::new()),
        }
    }

    #[must_use]
    pub fn builder(&self) -> Builder {
        match self {
            BuilderPayload::Elementor(_) => Builder::Elementor,
            BuilderPayload::Divi(_) => Builder::Divi,
            BuilderPayload::Gutenberg(_) => Builder::Gutenberg,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            BuilderPayload::Elementor(tree) => tree.as_array().is_none_or(Vec::is_empty),
            BuilderPayload::Divi(shortcodes) => shortcodes.is_empty(),
            BuilderPayload::Gutenberg(blocks) => blocks.is_empty(),
        }
    }

    /// Text a host stores as the post body.
    ///
    /// Elementor keeps its tree in meta, so the JSON is returned as-is for
    /// callers that want a single string.
    #[must_use]
    pub fn to_post_content(&self) -> String {
        match self {
            BuilderPayload::Elementor(tree) => tree.to_string(),
            BuilderPayload::Divi(shortcodes) => shortcodes.clone(),
            BuilderPayload::Gutenberg(blocks) => serialize_blocks(blocks),
        }
    }
}

/// What an emitter hands back
#[derive(Debug, Clone, PartialEq)]
pub struct EmitOutput {
    pub content: BuilderPayload,
    pub meta_data: MetaData,
}

/// An image ready to embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub url: String,
    /// Present only when the migrator issued an attachment
    pub attachment_id: Option<AttachmentId>,
}

/// Routes image nodes through the migrator and keeps track of failures
pub struct ImageResolver<'a> {
    migrator: &'a dyn ImageMigrator,
    upload_images: bool,
    base_url: Option<&'a str>,
    failures: Vec<ImageFailure>,
}

impl<'a> ImageResolver<'a> {
    pub fn new(migrator: &'a dyn ImageMigrator, upload_images: bool, base_url: Option<&'a str>) -> Self {
        Self {
            migrator,
            upload_images,
            base_url,
            failures: Vec::new(),
        }
    }

    /// Migrate one image, falling back to the original source on failure.
    ///
    /// Called in document order so the migrator sees images in the same
    /// order on every run.
    pub fn resolve(&mut self, image: &ImageSource) -> ResolvedImage {
        if !self.upload_images || is_inline_image(&image.src) {
            return ResolvedImage {
                url: image.src.clone(),
                attachment_id: None,
            };
        }

        let source_url = resolve_source_url(&image.src, self.base_url);
        match self.migrator.upload_image_by_url(
            &source_url,
            image.alt.as_deref(),
            image.title.as_deref(),
        ) {
            MigrationOutcome::Migrated(result) => ResolvedImage {
                url: result.url,
                attachment_id: Some(result.attachment_id),
            },
            MigrationOutcome::NoAttachment { reason } => {
                tracing::warn!("Image migration failed: {}, using original source {}", reason, image.src);
                self.failures.push(ImageFailure {
                    url: source_url,
                    reason,
                });
                ResolvedImage {
                    url: image.src.clone(),
                    attachment_id: None,
                }
            }
        }
    }

    #[must_use]
    pub fn failures(&self) -> &[ImageFailure] {
        &self.failures
    }

    #[must_use]
    pub fn into_failures(self) -> Vec<ImageFailure> {
        self.failures
    }
}

/// Per-conversion state shared by every emit call of one conversion
pub struct EmitContext<'a> {
    pub config: &'a ConverterConfig,
    pub images: ImageResolver<'a>,
    pub ids: ElementIdGenerator,
    /// Destination post, when known
    pub post_id: Option<u64>,
}

impl<'a> EmitContext<'a> {
    pub fn new(config: &'a ConverterConfig, images: ImageResolver<'a>, post_id: Option<u64>) -> Self {
        Self {
            config,
            images,
            ids: ElementIdGenerator::new(config.element_id_seed()),
            post_id,
        }
    }
}

pub trait Emitter {
    fn builder(&self) -> Builder;

    fn emit(&self, nodes: &[BlockNode], ctx: &mut EmitContext<'_>) -> EmitOutput;
}

/// The emitter for a concrete builder
#[must_use]
pub fn emitter_for(builder: Builder) -> &'static dyn Emitter {
    match builder {
        Builder::Elementor => &ElementorEmitter,
        Builder::Divi => &DiviEmitter,
        Builder::Gutenberg => &GutenbergEmitter,
    }
}
