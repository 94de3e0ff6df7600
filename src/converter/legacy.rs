//! Options-light entry point kept for older call sites

use serde::{Deserialize, Serialize};

use super::options::{BuilderChoice, ConvertOptions};

/// Payload sent by older callers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyPayload {
    pub post_content: String,
    pub is_landing_page: bool,
    pub is_ai_page: bool,
}

impl LegacyPayload {
    /// Full options equivalent to the old behaviour.
    ///
    /// Landing pages get header/footer extraction; landing and AI pages carry
    /// their own title block, so nothing is prepended.
    #[must_use]
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            builder: BuilderChoice::Auto,
            preserve_css: true,
            upload_images: true,
            extract_header_footer: self.is_landing_page,
            skip_auto_prepend: self.is_landing_page || self.is_ai_page,
            ..ConvertOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping() {
        let plain = LegacyPayload {
            post_content: "<p>x</p>".into(),
            ..LegacyPayload::default()
        }
        .to_options();
        assert!(!plain.extract_header_footer);
        assert!(!plain.skip_auto_prepend);

        let landing = LegacyPayload {
            is_landing_page: true,
            ..LegacyPayload::default()
        }
        .to_options();
        assert!(landing.extract_header_footer);
        assert!(landing.skip_auto_prepend);

        let ai = LegacyPayload {
            is_ai_page: true,
            ..LegacyPayload::default()
        }
        .to_options();
        assert!(!ai.extract_header_footer);
        assert!(ai.skip_auto_prepend);
    }
}
