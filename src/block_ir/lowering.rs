//! Lowering pass: normalized tree to `BlockNode` sequence
//!
//! Depth-first, document order. The walk keeps its own stack of pending
//! nodes instead of recursing, so nesting depth is bounded only by memory.

use kuchiki::{ElementData, NodeRef};

use super::classify::{Classification, classify};
use super::{BlockNode, CapturedHtml, HeadingLevel, ImageSource};
use crate::html_normalizer::NormalizedTree;

/// Utility class names stamped on captured elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityClasses {
    pub paragraph: String,
    pub table: String,
    pub list: String,
    pub blockquote: String,
}

impl UtilityClasses {
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            paragraph: format!("{prefix}-paragraph"),
            table: format!("{prefix}-table"),
            list: format!("{prefix}-list"),
            blockquote: format!("{prefix}-blockquote"),
        }
    }
}

impl Default for UtilityClasses {
    fn default() -> Self {
        Self::from_prefix(crate::utils::DEFAULT_UTILITY_CLASS_PREFIX)
    }
}

/// Lower the body of a normalized tree
#[must_use]
pub fn lower(tree: &NormalizedTree, classes: &UtilityClasses) -> Vec<BlockNode> {
    let nodes = lower_children(&tree.body(), classes);
    tracing::debug!("Lowered document into {} block nodes", nodes.len());
    nodes
}

/// Lower the children of one container node.
///
/// The container itself is treated as a content container, so bare text
/// directly inside it becomes `PlainText`.
#[must_use]
pub fn lower_children(container: &NodeRef, classes: &UtilityClasses) -> Vec<BlockNode> {
    let mut out = Vec::new();
    let mut pending: Vec<(NodeRef, bool)> = Vec::new();
    push_children(&mut pending, container, true);

    while let Some((node, in_container)) = pending.pop() {
        lower_node(&node, classes, in_container, &mut out, &mut pending);
    }
    out
}

/// Queue children so that popping yields them in document order
fn push_children(pending: &mut Vec<(NodeRef, bool)>, node: &NodeRef, in_container: bool) {
    let start = pending.len();
    pending.extend(node.children().map(|child| (child, in_container)));
    pending[start..].reverse();
}

fn lower_node(
    node: &NodeRef,
    classes: &UtilityClasses,
    in_container: bool,
    out: &mut Vec<BlockNode>,
    pending: &mut Vec<(NodeRef, bool)>,
) {
    if let Some(text) = node.as_text() {
        let text = text.borrow();
        let value = text.trim();
        if in_container && !value.is_empty() {
            out.push(BlockNode::PlainText {
                value: value.to_string(),
            });
        }
        return;
    }

    let Some(element) = node.as_element() else {
        // Comments, doctypes, processing instructions
        return;
    };

    let tag = element.name.local.to_ascii_lowercase();
    match classify(&tag) {
        Classification::Heading(level) => out.extend(lower_heading(node, element, level)),
        Classification::Image => out.extend(lower_image(element)),
        Classification::Paragraph => {
            if node.text_contents().trim().is_empty() {
                // `<p><img></p>` and friends: surface what is inside
                push_children(pending, node, false);
            } else {
                out.push(BlockNode::Paragraph(capture(node, element, &classes.paragraph)));
            }
        }
        Classification::List { ordered } => out.push(BlockNode::RichList {
            ordered,
            html: capture(node, element, &classes.list),
        }),
        Classification::Table => out.push(BlockNode::Table(capture(node, element, &classes.table))),
        Classification::Blockquote => {
            out.push(BlockNode::Blockquote(capture(node, element, &classes.blockquote)));
        }
        Classification::Embed => out.push(BlockNode::Embed {
            raw_html: node.to_string(),
        }),
        Classification::Group => push_children(pending, node, true),
        Classification::Unrecognized => {
            tracing::trace!("Dropping <{}> wrapper, visiting its children", tag);
            push_children(pending, node, false);
        }
    }
}

fn lower_heading(node: &NodeRef, element: &ElementData, level: HeadingLevel) -> Option<BlockNode> {
    let text = node.text_contents().trim().to_string();
    if text.is_empty() {
        return None;
    }

    let anchor_id = element
        .attributes
        .borrow()
        .get("id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from);

    Some(BlockNode::Heading {
        level,
        text,
        anchor_id,
    })
}

fn lower_image(element: &ElementData) -> Option<BlockNode> {
    let attributes = element.attributes.borrow();
    let src = attributes.get("src").map(str::trim).filter(|s| !s.is_empty());
    let Some(src) = src else {
        tracing::debug!("Skipping <img> without a src attribute");
        return None;
    };

    Some(BlockNode::Image(ImageSource {
        src: src.to_string(),
        alt: attributes.get("alt").map(String::from),
        title: attributes.get("title").map(String::from),
    }))
}

/// Stamp `class_name` on the element (once) and serialize it
fn capture(node: &NodeRef, element: &ElementData, class_name: &str) -> CapturedHtml {
    let classes = {
        let mut attributes = element.attributes.borrow_mut();
        let existing = attributes.get("class").unwrap_or("").trim().to_string();
        let already_tagged = existing.split_ascii_whitespace().any(|c| c == class_name);
        let classes = if already_tagged {
            existing
        } else if existing.is_empty() {
            class_name.to_string()
        } else {
            format!("{existing} {class_name}")
        };
        attributes.insert("class", classes.clone());
        classes
    };

    CapturedHtml {
        inner_html: node.children().map(|child| child.to_string()).collect(),
        outer_html: node.to_string(),
        classes,
    }
}
