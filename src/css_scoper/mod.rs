//! CSS extraction and selector scoping
//!
//! Style rules are lifted out of the markup so they can be stored out of
//! band, then optionally scoped to a page-specific container selector to
//! raise their specificity without renaming classes.

pub mod extraction;
pub mod scoping;
pub mod types;

pub use extraction::{extract_styles, parse_rules};
pub use scoping::{post_scope_token, scope, scope_css, scope_rule};
pub use types::{ScopedStyleSheet, StyleRule, render_rules};
