//! Prefixing selectors with a page scope token

use super::extraction::parse_rules;
use super::types::{ScopedStyleSheet, StyleRule};

/// Scope token for a destination post, e.g. `body.postid-5`
#[must_use]
pub fn post_scope_token(post_id: u64) -> String {
    format!("body.postid-{post_id}")
}

/// Prefix every selector of every non-at-rule with `token` and a space.
///
/// Selectors already carrying the same token are left alone, so scoping a
/// scoped sheet again with the same token gives identical text. A different
/// token compounds.
#[must_use]
pub fn scope(rules: &[StyleRule], token: &str) -> ScopedStyleSheet {
    let token = token.trim();
    let rules = rules.iter().map(|rule| scope_rule(rule, token)).collect();
    ScopedStyleSheet::new(token.to_string(), rules)
}

#[must_use]
pub fn scope_rule(rule: &StyleRule, token: &str) -> StyleRule {
    if token.is_empty() || rule.is_at_rule() {
        return rule.clone();
    }
    let selectors = rule
        .selectors
        .iter()
        .map(|selector| scope_selector(selector, token))
        .collect();
    StyleRule {
        selectors,
        declarations: rule.declarations.clone(),
        statement: rule.statement,
    }
}

fn scope_selector(selector: &str, token: &str) -> String {
    let already_scoped = selector == token
        || selector
            .strip_prefix(token)
            .is_some_and(|rest| rest.starts_with(' '));
    if already_scoped {
        selector.to_string()
    } else {
        format!("{token} {selector}")
    }
}

/// Parse, scope and render stylesheet text in one go
#[must_use]
pub fn scope_css(css: &str, token: &str) -> String {
    scope(&parse_rules(css), token).to_css()
}
