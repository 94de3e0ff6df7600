//! URL-keyed cache in front of another migrator
//!
//! Only successful uploads are remembered. A failure may be transient, and
//! the next conversion that references the image should try again.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

use super::ImageMigrator;
use super::types::{ImageMigrationResult, MigrationOutcome};
use crate::utils::DEFAULT_IMAGE_CACHE_CAPACITY;

pub struct CachingMigrator<M> {
    inner: M,
    cache: Mutex<LruCache<String, ImageMigrationResult>>,
}

impl<M: ImageMigrator> CachingMigrator<M> {
    /// Wrap `inner` with room for `capacity` entries (at least one)
    pub fn new(inner: M, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn with_default_capacity(inner: M) -> Self {
        Self::new(inner, DEFAULT_IMAGE_CACHE_CAPACITY)
    }

    /// Number of cached URLs
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: ImageMigrator> ImageMigrator for CachingMigrator<M> {
    fn upload_image_by_url(
        &self,
        source_url: &str,
        alt: Option<&str>,
        title: Option<&str>,
    ) -> MigrationOutcome {
        if let Some(hit) = self.cache.lock().get(source_url) {
            log::debug!("Image cache hit for {source_url}");
            return MigrationOutcome::Migrated(hit.clone());
        }

        // Lock is not held across the upload
        let outcome = self.inner.upload_image_by_url(source_url, alt, title);
        if let MigrationOutcome::Migrated(result) = &outcome {
            self.cache.lock().put(source_url.to_string(), result.clone());
        }
        outcome
    }
}
