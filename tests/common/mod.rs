//! Test utilities and helper functions for the page-builder test suite

use kodegen_tools_pagebuilder::{
    Builder, BuilderPayload, ConversionResult, ConvertOptions, Converter, ConverterConfig,
    GutenbergBlock, StaticMigrator, StaticProbe,
};

/// Migrator stub that maps `http://a/x.png` to attachment 7 on the CDN
#[allow(dead_code)]
pub fn stub_migrator() -> StaticMigrator {
    StaticMigrator::new().with_image("http://a/x.png", 7, "http://cdn/x.png")
}

/// Converter with reproducible element ids and the stub migrator
#[allow(dead_code)]
pub fn test_converter() -> Converter {
    let config = ConverterConfig::builder()
        .element_id_seed(42)
        .build()
        .expect("Test operation should succeed");
    Converter::new(config).with_image_migrator(stub_migrator())
}

/// Converter whose environment probe reports `builder` as active
#[allow(dead_code)]
pub fn converter_with_active(builder: Option<Builder>) -> Converter {
    test_converter().with_builder_probe(StaticProbe(builder))
}

/// Options targeting one builder with header/footer extraction off
#[allow(dead_code)]
pub fn options_for(builder: Builder) -> ConvertOptions {
    ConvertOptions {
        extract_header_footer: false,
        ..ConvertOptions::for_builder(builder)
    }
}

/// Creates a test HTML document with specified content
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{}</title>
</head>
<body>
    {}
</body>
</html>"#,
        html_escape::encode_text(title),
        body
    )
}

/// Elementor widgets inside the single section/column
#[allow(dead_code)]
pub fn elementor_widgets(result: &ConversionResult) -> Vec<serde_json::Value> {
    match &result.content {
        BuilderPayload::Elementor(tree) => tree[0]["elements"][0]["elements"]
            .as_array()
            .cloned()
            .unwrap_or_default(),
        other => panic!("expected elementor payload, got {other:?}"),
    }
}

#[allow(dead_code)]
pub fn divi_shortcodes(result: &ConversionResult) -> &str {
    match &result.content {
        BuilderPayload::Divi(code) => code,
        other => panic!("expected divi payload, got {other:?}"),
    }
}

#[allow(dead_code)]
pub fn gutenberg_blocks(result: &ConversionResult) -> &[GutenbergBlock] {
    match &result.content {
        BuilderPayload::Gutenberg(blocks) => blocks,
        other => panic!("expected gutenberg payload, got {other:?}"),
    }
}
