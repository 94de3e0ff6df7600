//! Shortcode rendering helpers
//!
//! Attribute values cannot contain `"` or square brackets; those are
//! percent-style escaped the way the Divi builder stores them.

use std::fmt::Write;

/// Escape a value for use inside a double-quoted shortcode attribute
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("%22"),
            '[' => out.push_str("%91"),
            ']' => out.push_str("%93"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape enclosed content so it cannot open or close a shortcode
#[must_use]
pub fn escape_content(content: &str) -> String {
    content.replace('[', "&#91;").replace(']', "&#93;")
}

/// One shortcode with ordered attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcode {
    tag: String,
    attrs: Vec<(String, String)>,
}

impl Shortcode {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Attribute only when a value is present
    #[must_use]
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    fn open_tag(&self) -> String {
        let mut out = format!("[{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
        out
    }

    /// `[tag attrs]content[/tag]`
    #[must_use]
    pub fn wrap(&self, content: &str) -> String {
        format!("{}]{content}[/{}]", self.open_tag(), self.tag)
    }

    /// `[tag attrs][/tag]`
    #[must_use]
    pub fn empty(&self) -> String {
        self.wrap("")
    }

    /// `[tag attrs /]`
    #[must_use]
    pub fn self_closing(&self) -> String {
        format!("{} /]", self.open_tag())
    }
}
