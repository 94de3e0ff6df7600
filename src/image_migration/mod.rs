//! Image migration collaborator
//!
//! The converter does not own image storage. It calls an `ImageMigrator`
//! once per image node, in document order, and embeds whatever comes back.
//! Implementations must be safe to share between concurrent conversions.

use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

pub mod cache;
pub mod types;

pub use cache::CachingMigrator;
pub use types::{AttachmentId, ImageFailure, ImageMigrationResult, MigrationOutcome};

pub trait ImageMigrator: Send + Sync {
    /// Ingest the image at `source_url` into durable storage.
    ///
    /// Must not panic or block forever on bad input; report
    /// `MigrationOutcome::NoAttachment` instead.
    fn upload_image_by_url(
        &self,
        source_url: &str,
        alt: Option<&str>,
        title: Option<&str>,
    ) -> MigrationOutcome;
}

impl<M: ImageMigrator + ?Sized> ImageMigrator for Arc<M> {
    fn upload_image_by_url(
        &self,
        source_url: &str,
        alt: Option<&str>,
        title: Option<&str>,
    ) -> MigrationOutcome {
        (**self).upload_image_by_url(source_url, alt, title)
    }
}

/// Migrator for environments without a media store
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMigrator;

impl ImageMigrator for NoopMigrator {
    fn upload_image_by_url(&self, _: &str, _: Option<&str>, _: Option<&str>) -> MigrationOutcome {
        MigrationOutcome::no_attachment("no image store configured")
    }
}

/// Fixed URL table, for previews and tests
#[derive(Debug, Clone, Default)]
pub struct StaticMigrator {
    images: HashMap<String, ImageMigrationResult>,
}

impl StaticMigrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_image(
        mut self,
        source_url: impl Into<String>,
        attachment_id: AttachmentId,
        url: impl Into<String>,
    ) -> Self {
        self.images.insert(
            source_url.into(),
            ImageMigrationResult {
                attachment_id,
                url: url.into(),
            },
        );
        self
    }
}

impl ImageMigrator for StaticMigrator {
    fn upload_image_by_url(&self, source_url: &str, _: Option<&str>, _: Option<&str>) -> MigrationOutcome {
        match self.images.get(source_url) {
            Some(result) => MigrationOutcome::Migrated(result.clone()),
            None => MigrationOutcome::no_attachment(format!("unknown image {source_url}")),
        }
    }
}

/// True for inline `data:` images, which are never sent to a migrator
#[must_use]
pub fn is_inline_image(src: &str) -> bool {
    src.trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Resolve a possibly relative image source against the page URL.
///
/// Absolute sources and unparseable bases come back unchanged.
#[must_use]
pub fn resolve_source_url(src: &str, base_url: Option<&str>) -> String {
    if Url::parse(src).is_ok() {
        return src.to_string();
    }
    let Some(base_url) = base_url else {
        return src.to_string();
    };
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Invalid base URL '{base_url}': {e}, leaving image source as-is");
            return src.to_string();
        }
    };
    match base.join(src) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            log::warn!("Failed to resolve image '{src}' against base '{base_url}': {e}");
            src.to_string()
        }
    }
}
