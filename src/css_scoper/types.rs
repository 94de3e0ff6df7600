//! Type definitions for extracted and scoped style rules

use serde::Serialize;
use std::fmt;

/// One `selector { ... }` block lifted out of a `<style>` element.
///
/// Declarations are kept as raw text; nothing inside the braces is parsed.
/// At-rules keep their whole prelude (e.g. `@media screen, print`) as a
/// single selector so commas inside it are never split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    pub selectors: Vec<String>,
    pub declarations: String,
    /// Block-less at-rule such as `@import url(a.css);`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub statement: bool,
}

impl StyleRule {
    #[must_use]
    pub fn new(selectors: Vec<String>, declarations: impl Into<String>) -> Self {
        Self {
            selectors,
            declarations: declarations.into(),
            statement: false,
        }
    }

    /// At-rules pass through scoping untouched
    #[must_use]
    pub fn is_at_rule(&self) -> bool {
        self.selectors.first().is_some_and(|s| s.starts_with('@'))
    }

    #[must_use]
    pub fn selector_text(&self) -> String {
        self.selectors.join(", ")
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statement {
            write!(f, "{};", self.selector_text())
        } else {
            write!(f, "{}{{{}}}", self.selector_text(), self.declarations)
        }
    }
}

/// Rules whose selectors have been prefixed with a page scope token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedStyleSheet {
    token: String,
    rules: Vec<StyleRule>,
}

impl ScopedStyleSheet {
    pub(crate) fn new(token: String, rules: Vec<StyleRule>) -> Self {
        Self { token, rules }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    #[must_use]
    pub fn into_rules(self) -> Vec<StyleRule> {
        self.rules
    }

    /// Stylesheet text, one rule per line
    #[must_use]
    pub fn to_css(&self) -> String {
        render_rules(&self.rules)
    }
}

impl fmt::Display for ScopedStyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Render rules as stylesheet text, one rule per line
#[must_use]
pub fn render_rules(rules: &[StyleRule]) -> String {
    rules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
