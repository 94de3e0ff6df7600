//! Byte-level input handling: charset sniffing and pre-parse encoding
//!
//! Input arrives either as valid UTF-8 or in a legacy encoding named by a
//! WHATWG label. The decision about what to do with non-ASCII text is an `EncodingStrategy`
//! chosen once in the config.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::bytes::Regex;
use std::borrow::Cow;
use std::fmt::Write;
use std::sync::LazyLock;

use crate::config::EncodingStrategy;

/// Only the head of a document is searched for a charset declaration
const CHARSET_SNIFF_LIMIT: usize = 1024;

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([A-Za-z0-9_.:-]+)"#)
        .expect("META_CHARSET_RE: hardcoded regex is valid")
});

/// The input HTML plus the character encoding it was declared or sniffed as.
///
/// Lives only for the duration of one conversion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    html: String,
    charset: Option<String>,
}

impl RawDocument {
    /// Wrap markup that is already a Rust string (and therefore UTF-8)
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            charset: Some("utf-8".to_string()),
        }
    }

    /// Decode raw bytes.
    ///
    /// The declared charset wins; otherwise a `<meta charset>` near the top of
    /// the document is used. Labels resolve the way browsers resolve them, so
    /// `iso-8859-1` decodes as windows-1252. Undeclared input that is not
    /// valid UTF-8 is decoded as windows-1252 as well.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], declared_charset: Option<&str>) -> Self {
        let charset = declared_charset
            .map(|c| c.trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .or_else(|| sniff_meta_charset(bytes));

        let encoding = charset.as_deref().and_then(|label| {
            let encoding = Encoding::for_label(label.as_bytes());
            if encoding.is_none() {
                tracing::debug!("Unknown charset label {:?}, ignoring it", label);
            }
            encoding
        });

        let html = match encoding {
            Some(encoding) if encoding != UTF_8 => decode_with(encoding, bytes),
            _ => match std::str::from_utf8(bytes) {
                Ok(text) => text.to_string(),
                Err(e) => {
                    tracing::debug!("Input is not valid UTF-8 ({}), decoding as windows-1252", e);
                    decode_with(WINDOWS_1252, bytes)
                }
            },
        };

        Self { html, charset }
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }
}

impl From<&str> for RawDocument {
    fn from(html: &str) -> Self {
        Self::new(html)
    }
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(CHARSET_SNIFF_LIMIT)];
    META_CHARSET_RE
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).to_ascii_lowercase())
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("Malformed {} input, replaced bad sequences", used.name());
    }
    text.into_owned()
}

impl EncodingStrategy {
    /// Prepare markup for the parser according to this strategy
    #[must_use]
    pub fn prepare(self, html: &str) -> Cow<'_, str> {
        match self {
            EncodingStrategy::Html5 => Cow::Borrowed(html),
            EncodingStrategy::LegacyNumericEntities => encode_non_ascii(html),
        }
    }
}

/// Replace every non-ASCII character with a decimal character reference
pub fn encode_non_ascii(html: &str) -> Cow<'_, str> {
    if html.is_ascii() {
        return Cow::Borrowed(html);
    }
    let mut out = String::with_capacity(html.len() + html.len() / 4);
    for c in html.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            // Writing to a String cannot fail
            let _ = write!(out, "&#{};", u32::from(c));
        }
    }
    Cow::Owned(out)
}
