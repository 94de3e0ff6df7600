//! HTML normalization: raw markup to a body-rooted DOM tree
//!
//! Parsing never fails. The HTML5 tree builder recovers from malformed markup
//! the way a browser does, turning stray bytes into text and synthesizing the
//! `<html>`/`<head>`/`<body>` wrappers when the input is a bare fragment, so
//! downstream passes can always assume a single top-level container.

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use crate::config::EncodingStrategy;

pub mod encoding;

pub use encoding::{RawDocument, encode_non_ascii};

/// A parsed document owned by exactly one conversion call
#[derive(Debug, Clone)]
pub struct NormalizedTree {
    document: NodeRef,
}

impl NormalizedTree {
    /// The synthetic document root
    #[must_use]
    pub fn document(&self) -> &NodeRef {
        &self.document
    }

    /// The single top-level content container.
    ///
    /// The tree builder always creates `<body>`; the document root is returned
    /// only if that invariant were ever broken.
    #[must_use]
    pub fn body(&self) -> NodeRef {
        match self.document.select_first("body") {
            Ok(body) => body.as_node().clone(),
            Err(()) => {
                tracing::warn!("Parsed document has no <body>, lowering from the document root");
                self.document.clone()
            }
        }
    }

    /// Serialized children of `<body>`
    #[must_use]
    pub fn body_html(&self) -> String {
        self.body().children().map(|child| child.to_string()).collect()
    }
}

/// Parse markup that is already a string
#[must_use]
pub fn normalize(raw: &str, strategy: EncodingStrategy) -> NormalizedTree {
    let prepared = strategy.prepare(raw);
    let document = kuchiki::parse_html().one(prepared.into_owned());
    NormalizedTree { document }
}

/// Parse a decoded document
#[must_use]
pub fn normalize_document(raw: &RawDocument, strategy: EncodingStrategy) -> NormalizedTree {
    normalize(raw.html(), strategy)
}
