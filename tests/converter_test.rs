//! End-to-end conversions through the facade

use kodegen_tools_pagebuilder::{
    Builder, BuilderChoice, BuilderPayload, ConvertError, ConvertOptions, ConvertRequest,
    ErrorCategory, LegacyPayload, RawDocument,
};

mod common;

const PAGE: &str = r#"
<header><nav><h2>Site name</h2></nav></header>
<main>
  <h1 id="welcome">Welcome</h1>
  <p>First paragraph.</p>
</main>
<footer><p>&copy; 2025</p></footer>"#;

#[test]
fn test_auto_detection_uses_probe() {
    let converter = common::converter_with_active(Some(Builder::Divi));
    let result = converter.convert("<p>Hello</p>", &ConvertOptions::default());

    assert_eq!(result.builder, Builder::Divi);
    let code = common::divi_shortcodes(&result);
    assert!(code.starts_with("[et_pb_section"));
    assert!(code.contains("[et_pb_text"));
    assert!(!code.contains("<!-- wp:"));
    assert_eq!(result.meta_data["_et_pb_use_builder"], "on");
}

#[test]
fn test_auto_detection_defaults_to_gutenberg() {
    let converter = common::converter_with_active(None);
    let result = converter.convert("<p>Hello</p>", &ConvertOptions::default());
    assert_eq!(result.builder, Builder::Gutenberg);
    assert!(result.meta_data.is_empty());
    assert_eq!(common::gutenberg_blocks(&result)[0].block_name, "core/paragraph");
}

#[test]
fn test_explicit_builder_ignores_probe() {
    let converter = common::converter_with_active(Some(Builder::Divi));
    let result = converter.convert("<p>Hello</p>", &ConvertOptions::for_builder(Builder::Elementor));
    assert_eq!(result.builder, Builder::Elementor);
    assert_eq!(result.meta_data["_elementor_edit_mode"], "builder");
}

#[test]
fn test_header_and_footer_extracted() {
    let converter = common::test_converter();
    let options = ConvertOptions::for_builder(Builder::Gutenberg);
    let result = converter.convert(PAGE, &options);

    let body = common::gutenberg_blocks(&result);
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].attrs["anchor"], "welcome");

    let Some(BuilderPayload::Gutenberg(header)) = &result.header else {
        panic!("expected gutenberg header, got {:?}", result.header);
    };
    assert_eq!(header[0].block_name, "core/heading");
    let Some(BuilderPayload::Gutenberg(footer)) = &result.footer else {
        panic!("expected gutenberg footer");
    };
    assert!(footer[0].inner_html.contains("© 2025"));
}

#[test]
fn test_header_footer_left_in_body_when_disabled() {
    let converter = common::test_converter();
    let result = converter.convert(PAGE, &common::options_for(Builder::Gutenberg));
    assert!(result.header.is_none());
    assert!(result.footer.is_none());
    assert_eq!(common::gutenberg_blocks(&result).len(), 4);
}

#[test]
fn test_unsupported_builder_is_result_error() {
    let converter = common::test_converter();
    let request = ConvertRequest {
        html: "<p>x</p>".into(),
        builder: "beaver".into(),
        options: ConvertOptions::default(),
    };
    let result = converter.convert_request(&request);
    assert_eq!(result.error, Some(ConvertError::UnsupportedBuilder("beaver".into())));
    assert!(result.content.is_empty());
    assert_eq!(
        result.error.as_ref().map(ConvertError::category),
        Some(ErrorCategory::InvalidOptions)
    );
}

#[test]
fn test_request_from_json() {
    let request: ConvertRequest = serde_json::from_str(
        r#"{"html":"<h3>Hi</h3>","builder":"elementor","options":{"upload_images":false}}"#,
    )
    .expect("Test operation should succeed");
    let result = common::test_converter().convert_request(&request);
    assert!(result.is_success());
    assert_eq!(result.builder, Builder::Elementor);
}

#[test]
fn test_contradictory_options_rejected() {
    let options = ConvertOptions {
        upload_images: false,
        require_images: true,
        ..ConvertOptions::for_builder(Builder::Elementor)
    };
    let result = common::test_converter().convert("<p>x</p>", &options);
    assert!(matches!(result.error, Some(ConvertError::InvalidOptions(_))));
    assert!(result.content.is_empty());
}

#[test]
fn test_legacy_entry_point() {
    let converter = common::converter_with_active(Some(Builder::Elementor));
    let payload = LegacyPayload {
        post_content: PAGE.into(),
        is_landing_page: true,
        is_ai_page: false,
    };
    let result = converter.convert_legacy(&payload);
    assert_eq!(result.builder, Builder::Elementor);
    assert!(result.header.is_some());
    assert!(result.footer.is_some());
}

#[test]
fn test_auto_prepend_only_for_elementor_and_divi() {
    let converter = common::test_converter();
    let with_title = |builder: Builder, skip: bool| ConvertOptions {
        page_title: Some("Launch".into()),
        skip_auto_prepend: skip,
        ..common::options_for(builder)
    };

    let divi = converter.convert("<p>Body</p>", &with_title(Builder::Divi, false));
    assert!(common::divi_shortcodes(&divi).contains("title=\"Launch\" title_level=\"h1\""));

    let skipped = converter.convert("<p>Body</p>", &with_title(Builder::Divi, true));
    assert!(!common::divi_shortcodes(&skipped).contains("Launch"));

    let gutenberg = converter.convert("<p>Body</p>", &with_title(Builder::Gutenberg, false));
    assert_eq!(common::gutenberg_blocks(&gutenberg).len(), 1);
}

#[test]
fn test_divi_split_track_tied_to_post() {
    let options = ConvertOptions {
        post_id: Some(314),
        ..common::options_for(Builder::Divi)
    };
    let result = common::test_converter().convert("<p>x</p>", &options);
    assert_eq!(
        result.meta_data["_et_pb_ab_current_shortcode"],
        "[et_pb_split_track id=\"314\" /]"
    );
}

#[test]
fn test_elementor_ids_reproducible_with_seed() {
    let converter = common::test_converter();
    let options = common::options_for(Builder::Elementor);
    let first = converter.convert("<h2>A</h2><p>B</p>", &options);
    let second = converter.convert("<h2>A</h2><p>B</p>", &options);
    assert_eq!(first.content, second.content);
}

#[test]
fn test_latin1_document() {
    let bytes = b"<meta charset=\"iso-8859-1\"><p>caf\xe9</p>";
    let document = RawDocument::from_bytes(bytes, None);
    let result = common::test_converter()
        .convert_document(&document, &common::options_for(Builder::Gutenberg));
    assert!(common::gutenberg_blocks(&result)[0].inner_html.contains("café"));
}

#[test]
fn test_result_serializes() {
    let result = common::test_converter().convert("<p>x</p>", &common::options_for(Builder::Elementor));
    let json = serde_json::to_value(&result).expect("Test operation should succeed");
    assert_eq!(json["builder"], "elementor");
    assert!(json["content"].is_array());
    assert!(json["error"].is_null());
}

#[tokio::test]
async fn test_convert_async() {
    let converter = common::test_converter();
    let result = converter
        .convert_async("<h2>Async</h2>", &common::options_for(Builder::Gutenberg))
        .await
        .expect("Test operation should succeed");
    assert_eq!(common::gutenberg_blocks(&result)[0].attrs["level"], 2);
}

#[tokio::test]
async fn test_convert_batch_keeps_order() {
    let converter = common::test_converter();
    let documents: Vec<_> = (1..=6)
        .map(|level| {
            (
                format!("<h{level}>T</h{level}>"),
                ConvertOptions::for_builder(BuilderChoice::Gutenberg),
            )
        })
        .collect();

    let results = converter.convert_batch(&documents).await;
    assert_eq!(results.len(), 6);
    for (i, result) in results.into_iter().enumerate() {
        let result = result.expect("Test operation should succeed");
        assert_eq!(common::gutenberg_blocks(&result)[0].attrs["level"], i as u64 + 1);
    }
}

#[test]
fn test_top_level_convert() {
    let result = kodegen_tools_pagebuilder::convert("<p>x</p>", &ConvertOptions::default());
    assert_eq!(result.builder, Builder::Gutenberg);
    assert_eq!(
        kodegen_tools_pagebuilder::serialize_blocks(common::gutenberg_blocks(&result)),
        "<!-- wp:paragraph {\"className\":\"pb-paragraph\"} -->\n<p class=\"pb-paragraph\">x</p>\n<!-- /wp:paragraph -->"
    );
}

#[test]
fn test_deeply_nested_document_converts() {
    let depth = 20_000;
    let html = format!("{}<p>Deep</p>{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let result = common::test_converter().convert(&html, &common::options_for(Builder::Gutenberg));
    assert!(result.is_success());
    let blocks = common::gutenberg_blocks(&result);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].block_name, "core/paragraph");
}
