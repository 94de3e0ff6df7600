//! Per-call conversion options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ConvertError;
use crate::block_ir::ImageSource;

/// A concrete target builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Builder {
    Elementor,
    Divi,
    Gutenberg,
}

impl Builder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Builder::Elementor => "elementor",
            Builder::Divi => "divi",
            Builder::Gutenberg => "gutenberg",
        }
    }

    /// Builders that get the page title and featured image prepended
    #[must_use]
    pub fn prepends_title(self) -> bool {
        matches!(self, Builder::Elementor | Builder::Divi)
    }
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Builder {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elementor" => Ok(Builder::Elementor),
            "divi" => Ok(Builder::Divi),
            "gutenberg" => Ok(Builder::Gutenberg),
            _ => Err(ConvertError::UnsupportedBuilder(s.to_string())),
        }
    }
}

/// Requested builder, possibly left to detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderChoice {
    #[default]
    Auto,
    Elementor,
    Divi,
    Gutenberg,
}

impl BuilderChoice {
    /// `None` for `Auto`
    #[must_use]
    pub fn explicit(self) -> Option<Builder> {
        match self {
            BuilderChoice::Auto => None,
            BuilderChoice::Elementor => Some(Builder::Elementor),
            BuilderChoice::Divi => Some(Builder::Divi),
            BuilderChoice::Gutenberg => Some(Builder::Gutenberg),
        }
    }
}

impl From<Builder> for BuilderChoice {
    fn from(builder: Builder) -> Self {
        match builder {
            Builder::Elementor => BuilderChoice::Elementor,
            Builder::Divi => BuilderChoice::Divi,
            Builder::Gutenberg => BuilderChoice::Gutenberg,
        }
    }
}

impl FromStr for BuilderChoice {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(BuilderChoice::Auto);
        }
        s.parse::<Builder>().map(BuilderChoice::from)
    }
}

impl fmt::Display for BuilderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.explicit() {
            Some(builder) => builder.fmt(f),
            None => f.write_str("auto"),
        }
    }
}

/// Options for one conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub builder: BuilderChoice,
    /// Extract `<style>` rules into `css_content`
    pub preserve_css: bool,
    /// Send images through the migrator
    pub upload_images: bool,
    pub extract_header_footer: bool,

    /// Destination post, used for the CSS scope token and Divi split tracking
    pub post_id: Option<u64>,
    /// Explicit scope token; wins over the post-derived one
    pub css_scope: Option<String>,
    pub scope_css: bool,

    pub skip_auto_prepend: bool,
    pub page_title: Option<String>,
    pub featured_image: Option<ImageSource>,

    /// Page URL that relative image sources are resolved against
    pub base_url: Option<String>,
    /// Treat any failed image migration as a conversion error
    pub require_images: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            builder: BuilderChoice::Auto,
            preserve_css: true,
            upload_images: true,
            extract_header_footer: true,
            post_id: None,
            css_scope: None,
            scope_css: true,
            skip_auto_prepend: false,
            page_title: None,
            featured_image: None,
            base_url: None,
            require_images: false,
        }
    }
}

impl ConvertOptions {
    #[must_use]
    pub fn for_builder(builder: impl Into<BuilderChoice>) -> Self {
        Self {
            builder: builder.into(),
            ..Self::default()
        }
    }

    /// Reject combinations that cannot be honoured
    pub(crate) fn validate(&self) -> Result<(), ConvertError> {
        if self.require_images && !self.upload_images {
            return Err(ConvertError::InvalidOptions(
                "require_images needs upload_images enabled".into(),
            ));
        }
        if let Some(scope) = &self.css_scope {
            if scope.trim().is_empty() {
                return Err(ConvertError::InvalidOptions("css_scope must not be blank".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builder_choice() {
        assert_eq!("auto".parse::<BuilderChoice>(), Ok(BuilderChoice::Auto));
        assert_eq!(" Divi ".parse::<BuilderChoice>(), Ok(BuilderChoice::Divi));
        assert_eq!(
            "beaver".parse::<BuilderChoice>(),
            Err(ConvertError::UnsupportedBuilder("beaver".into()))
        );
    }

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert!(options.preserve_css);
        assert!(options.upload_images);
        assert!(options.extract_header_footer);
        assert!(options.scope_css);
        assert_eq!(options.builder, BuilderChoice::Auto);
    }

    #[test]
    fn test_contradictory_options() {
        let options = ConvertOptions {
            upload_images: false,
            require_images: true,
            ..ConvertOptions::default()
        };
        assert!(matches!(options.validate(), Err(ConvertError::InvalidOptions(_))));
    }

    #[test]
    fn test_options_from_json() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"builder":"elementor","upload_images":false}"#)
                .expect("valid options");
        assert_eq!(options.builder, BuilderChoice::Elementor);
        assert!(!options.upload_images);
        assert!(options.preserve_css);
    }
}
