//! Builder-agnostic block intermediate representation
//!
//! HTML is lowered into a flat sequence of `BlockNode`s before any emitter
//! sees it. Every emitter matches on the enum exhaustively, so a new variant
//! cannot be added without every builder learning how to render it.

use serde::Serialize;
use std::fmt;

pub mod classify;
pub mod lowering;

pub use classify::{Classification, classify};
pub use lowering::{UtilityClasses, lower, lower_children};

/// Heading level 1-6
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const H1: HeadingLevel = HeadingLevel(1);

    /// `None` outside 1..=6
    #[must_use]
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    /// Level from a tag name: `"h3"` -> 3
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.as_bytes() {
            [b'h' | b'H', digit @ b'1'..=b'6'] => Some(Self(digit - b'0')),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Tag name for this level, e.g. `h2`
    #[must_use]
    pub fn tag(self) -> String {
        format!("h{}", self.0)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An image reference as found in the source markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct ImageSource {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ImageSource {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: None,
            title: None,
        }
    }

    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn alt_text(&self) -> &str {
        self.alt.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Markup captured from an element after its utility class was stamped on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedHtml {
    /// Serialized children of the element
    pub inner_html: String,
    /// The element itself, carrying the utility class
    pub outer_html: String,
    /// Full `class` attribute after tagging
    pub classes: String,
}

/// One lowered construct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockNode {
    Heading {
        level: HeadingLevel,
        text: String,
        anchor_id: Option<String>,
    },
    Image(ImageSource),
    Paragraph(CapturedHtml),
    RichList {
        ordered: bool,
        html: CapturedHtml,
    },
    Table(CapturedHtml),
    Blockquote(CapturedHtml),
    /// `<iframe>` markup carried verbatim
    Embed {
        raw_html: String,
    },
    /// Bare text that sat directly in the content container
    PlainText {
        value: String,
    },
}

/// Variant discriminant, handy for structural comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    Image,
    Paragraph,
    RichList,
    Table,
    Blockquote,
    Embed,
    PlainText,
}

impl BlockNode {
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockNode::Heading { .. } => BlockKind::Heading,
            BlockNode::Image(_) => BlockKind::Image,
            BlockNode::Paragraph(_) => BlockKind::Paragraph,
            BlockNode::RichList { .. } => BlockKind::RichList,
            BlockNode::Table(_) => BlockKind::Table,
            BlockNode::Blockquote(_) => BlockKind::Blockquote,
            BlockNode::Embed { .. } => BlockKind::Embed,
            BlockNode::PlainText { .. } => BlockKind::PlainText,
        }
    }

    /// Heading node built outside of lowering, e.g. a prepended page title
    #[must_use]
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        BlockNode::Heading {
            level,
            text: text.into(),
            anchor_id: None,
        }
    }
}
