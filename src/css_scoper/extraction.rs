//! Pulling `<style>` blocks out of a parsed document
//!
//! Only enough structure is recovered to find `selector { ... }` blocks by
//! brace matching. Declarations stay opaque, and an `@`-prefixed block is
//! carried as one unit with its nested rules verbatim.

use regex::Regex;
use std::sync::LazyLock;

use super::types::StyleRule;
use crate::html_normalizer::NormalizedTree;

static CSS_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)/\*.*?\*/").expect("CSS_COMMENT_RE: hardcoded regex is valid")
});

/// Remove every `<style>` element from the tree and return its rules in
/// document order.
///
/// Styles parked in `<head>` by the tree builder are found as well, so no
/// style text can leak into a body block.
#[must_use]
pub fn extract_styles(tree: NormalizedTree) -> (NormalizedTree, Vec<StyleRule>) {
    let styles: Vec<_> = match tree.document().select("style") {
        Ok(matches) => matches.collect(),
        Err(()) => {
            tracing::warn!("Style selector rejected by the selector engine, keeping styles inline");
            return (tree, Vec::new());
        }
    };

    let mut rules = Vec::new();
    for style in styles {
        let node = style.as_node();
        rules.extend(parse_rules(&node.text_contents()));
        node.detach();
    }

    tracing::debug!("Extracted {} style rules", rules.len());
    (tree, rules)
}

/// Split stylesheet text into rules.
///
/// Tolerant of junk: an unterminated block swallows the rest of the text and
/// trailing text without a block is dropped.
#[must_use]
pub fn parse_rules(css: &str) -> Vec<StyleRule> {
    let css = CSS_COMMENT_RE.replace_all(css, "");
    let mut rules = Vec::new();
    let mut rest = css.as_ref();

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let open = find_unquoted(rest, b'{');

        // Statement at-rules: @import, @charset, @namespace
        if rest.starts_with('@') {
            let head = open.map_or(rest, |o| &rest[..o]);
            if let Some(end) = find_unquoted(head, b';') {
                let prelude = rest[..end].trim();
                rules.push(StyleRule {
                    selectors: vec![prelude.to_string()],
                    declarations: String::new(),
                    statement: true,
                });
                rest = &rest[end + 1..];
                continue;
            }
        }

        let Some(open) = open else {
            tracing::trace!("Dropping trailing CSS without a block: {}", rest);
            break;
        };

        let prelude = rest[..open].trim();
        let close = matching_brace(rest, open);
        let body_end = close.unwrap_or(rest.len());
        let declarations = rest[open + 1..body_end].trim();

        let selectors: Vec<String> = if prelude.starts_with('@') {
            vec![prelude.to_string()]
        } else {
            prelude
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };

        if !selectors.is_empty() {
            rules.push(StyleRule::new(selectors, declarations));
        }

        rest = match close {
            Some(close) => &rest[close + 1..],
            None => "",
        };
    }

    rules
}

/// Byte offset of the first `needle` outside a quoted string
fn find_unquoted(text: &str, needle: u8) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    for (i, &b) in text.as_bytes().iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, b) {
            (_, b'\\') => escaped = true,
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, _) if b == needle => return Some(i),
            (None, _) => {}
        }
    }
    None
}

/// Byte offset of the `}` closing the `{` at `open`
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    for (i, &b) in text.as_bytes().iter().enumerate().skip(open) {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, b) {
            (_, b'\\') => escaped = true,
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'{') => depth += 1,
            (None, b'}') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            (None, _) => {}
        }
    }
    None
}
