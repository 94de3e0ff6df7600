//! Header/footer split
//!
//! Runs before the body is lowered. A designated header or footer is a direct
//! child of `<body>` that is either a `<header>`/`<footer>` element or carries
//! the matching landmark role (`banner`/`contentinfo`). Only the first of each
//! is taken; nested page headers inside articles stay in the body.

use kuchiki::NodeRef;

use crate::block_ir::{BlockNode, UtilityClasses, lower_children};
use crate::html_normalizer::NormalizedTree;

/// Result of the split
#[derive(Debug, Clone)]
pub struct PageSections {
    /// The tree with header and footer detached
    pub body: NormalizedTree,
    pub header: Option<Vec<BlockNode>>,
    pub footer: Option<Vec<BlockNode>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Header,
    Footer,
}

impl Region {
    fn tag(self) -> &'static str {
        match self {
            Region::Header => "header",
            Region::Footer => "footer",
        }
    }

    fn role(self) -> &'static str {
        match self {
            Region::Header => "banner",
            Region::Footer => "contentinfo",
        }
    }

    fn matches(self, node: &NodeRef) -> bool {
        let Some(element) = node.as_element() else {
            return false;
        };
        if &*element.name.local == self.tag() {
            return true;
        }
        element
            .attributes
            .borrow()
            .get("role")
            .is_some_and(|role| role.trim().eq_ignore_ascii_case(self.role()))
    }
}

/// Split designated header/footer markup out of the tree.
///
/// When `enabled` is false the tree is returned untouched with no header or
/// footer. The detached regions are lowered with the same rules as the body.
#[must_use]
pub fn extract_header_footer(
    tree: NormalizedTree,
    enabled: bool,
    classes: &UtilityClasses,
) -> PageSections {
    if !enabled {
        return PageSections {
            body: tree,
            header: None,
            footer: None,
        };
    }

    let body = tree.body();
    let header = take_region(&body, Region::Header, classes);
    let footer = take_region(&body, Region::Footer, classes);

    tracing::debug!(
        "Header/footer split: header={}, footer={}",
        header.is_some(),
        footer.is_some()
    );

    PageSections {
        body: tree,
        header,
        footer,
    }
}

fn take_region(body: &NodeRef, region: Region, classes: &UtilityClasses) -> Option<Vec<BlockNode>> {
    let node = body.children().find(|child| region.matches(child))?;
    node.detach();
    Some(lower_children(&node, classes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_ir::{BlockKind, lower};
    use crate::config::EncodingStrategy;
    use crate::html_normalizer::normalize;

    const PAGE: &str = "<header><h1>Site</h1></header><p>Body</p><footer><p>Legal</p></footer>";

    #[test]
    fn test_disabled_leaves_tree_alone() {
        let tree = normalize(PAGE, EncodingStrategy::Html5);
        let sections = extract_header_footer(tree, false, &UtilityClasses::default());
        assert!(sections.header.is_none());
        assert!(sections.footer.is_none());
        assert_eq!(lower(&sections.body, &UtilityClasses::default()).len(), 3);
    }

    #[test]
    fn test_splits_first_level_regions() {
        let tree = normalize(PAGE, EncodingStrategy::Html5);
        let classes = UtilityClasses::default();
        let sections = extract_header_footer(tree, true, &classes);

        let header = sections.header.expect("header extracted");
        assert_eq!(header.iter().map(BlockNode::kind).collect::<Vec<_>>(), vec![BlockKind::Heading]);
        let footer = sections.footer.expect("footer extracted");
        assert_eq!(footer.len(), 1);

        let body = lower(&sections.body, &classes);
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].kind(), BlockKind::Paragraph);
    }

    #[test]
    fn test_role_marker() {
        let html = r#"<div role="banner"><p>Top</p></div><p>Body</p>"#;
        let tree = normalize(html, EncodingStrategy::Html5);
        let sections = extract_header_footer(tree, true, &UtilityClasses::default());
        assert!(sections.header.is_some());
        assert!(sections.footer.is_none());
    }

    #[test]
    fn test_nested_header_stays_in_body() {
        let html = "<article><header><h2>Post</h2></header><p>Text</p></article>";
        let tree = normalize(html, EncodingStrategy::Html5);
        let classes = UtilityClasses::default();
        let sections = extract_header_footer(tree, true, &classes);
        assert!(sections.header.is_none());
        assert_eq!(lower(&sections.body, &classes).len(), 2);
    }
}
