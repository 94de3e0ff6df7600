//! Tag-name classification
//!
//! Matching is by tag name only; attributes never change the outcome.

use super::HeadingLevel;
use crate::utils::GROUP_TAGS;

/// What lowering does with an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Heading(HeadingLevel),
    Image,
    Paragraph,
    List { ordered: bool },
    Table,
    Blockquote,
    Embed,
    /// Section/column wrapper: children are flattened into the parent sequence
    Group,
    /// No node emitted, but recognized descendants are still visited
    Unrecognized,
}

#[must_use]
pub fn classify(tag: &str) -> Classification {
    if let Some(level) = HeadingLevel::from_tag(tag) {
        return Classification::Heading(level);
    }
    match tag {
        "img" => Classification::Image,
        "p" => Classification::Paragraph,
        "ul" => Classification::List { ordered: false },
        "ol" => Classification::List { ordered: true },
        "table" => Classification::Table,
        "blockquote" => Classification::Blockquote,
        "iframe" => Classification::Embed,
        _ if GROUP_TAGS.contains(&tag) => Classification::Group,
        _ => Classification::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        assert_eq!(classify("ol"), Classification::List { ordered: true });
        assert_eq!(classify("ul"), Classification::List { ordered: false });
        assert_eq!(classify("section"), Classification::Group);
        assert_eq!(classify("custom-widget"), Classification::Unrecognized);
        assert_eq!(classify("span"), Classification::Unrecognized);
        assert!(matches!(classify("h4"), Classification::Heading(l) if l.get() == 4));
    }
}
