//! Type definitions for image migration

use serde::{Deserialize, Serialize};

/// Opaque attachment identifier issued by the media store
pub type AttachmentId = u64;

/// A successfully re-hosted image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMigrationResult {
    pub attachment_id: AttachmentId,
    pub url: String,
}

/// What the migrator reports for one source URL.
///
/// Migrators never raise: an unreachable or rejected URL is a `NoAttachment`
/// and the emitter keeps the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    Migrated(ImageMigrationResult),
    NoAttachment { reason: String },
}

impl MigrationOutcome {
    #[must_use]
    pub fn no_attachment(reason: impl Into<String>) -> Self {
        MigrationOutcome::NoAttachment {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn migrated(&self) -> Option<&ImageMigrationResult> {
        match self {
            MigrationOutcome::Migrated(result) => Some(result),
            MigrationOutcome::NoAttachment { .. } => None,
        }
    }
}

/// A failed migration recorded on the conversion result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFailure {
    pub url: String,
    pub reason: String,
}

impl std::fmt::Display for ImageFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.url, self.reason)
    }
}
