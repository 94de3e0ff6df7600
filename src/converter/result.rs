//! The unified result record

use serde::Serialize;

use super::errors::ConvertError;
use super::options::Builder;
use crate::emitters::{BuilderPayload, MetaData};
use crate::image_migration::ImageFailure;

/// Output of one conversion.
///
/// Always produced, even on failure: `error` is set and `content` holds
/// whatever markup was emitted before the failure (possibly nothing).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub builder: Builder,
    pub content: BuilderPayload,
    pub meta_data: MetaData,
    pub header: Option<BuilderPayload>,
    pub footer: Option<BuilderPayload>,
    pub css_content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub image_failures: Vec<ImageFailure>,
    pub error: Option<ConvertError>,
}

impl ConversionResult {
    /// Result for a conversion that failed before anything was emitted
    #[must_use]
    pub fn failed(builder: Builder, error: ConvertError) -> Self {
        Self {
            builder,
            content: BuilderPayload::empty(builder),
            meta_data: MetaData::new(),
            header: None,
            footer: None,
            css_content: None,
            image_failures: Vec::new(),
            error: Some(error),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Post body text for the host to store
    #[must_use]
    pub fn post_content(&self) -> String {
        self.content.to_post_content()
    }
}
