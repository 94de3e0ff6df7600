//! Lowering pass behaviour through the public API

use kodegen_tools_pagebuilder::block_ir::{BlockKind, BlockNode, UtilityClasses, lower};
use kodegen_tools_pagebuilder::html_normalizer::normalize;
use kodegen_tools_pagebuilder::{Builder, EncodingStrategy};
use proptest::prelude::*;

mod common;

fn lower_str(html: &str) -> Vec<BlockNode> {
    lower(&normalize(html, EncodingStrategy::Html5), &UtilityClasses::default())
}

fn kinds(nodes: &[BlockNode]) -> Vec<BlockKind> {
    nodes.iter().map(BlockNode::kind).collect()
}

#[test]
fn test_unknown_tag_drop_through() {
    let nodes = lower_str("<custom-widget><p>Hi</p></custom-widget>");
    assert_eq!(nodes.len(), 1);
    let BlockNode::Paragraph(html) = &nodes[0] else {
        panic!("expected paragraph, got {:?}", nodes[0]);
    };
    assert_eq!(html.inner_html, "Hi");
}

#[test]
fn test_list_ordering_flag() {
    let nodes = lower_str("<ol><li>a</li></ol><ul><li>b</li></ul>");
    let flags: Vec<_> = nodes
        .iter()
        .map(|node| match node {
            BlockNode::RichList { ordered, .. } => *ordered,
            other => panic!("expected list, got {other:?}"),
        })
        .collect();
    assert_eq!(flags, vec![true, false]);

    let converter = common::test_converter();
    let result = converter.convert(
        "<ol><li>a</li></ol><ul><li>b</li></ul>",
        &common::options_for(Builder::Gutenberg),
    );
    let blocks = common::gutenberg_blocks(&result);
    assert_eq!(blocks[0].attrs["ordered"], true);
    assert_eq!(blocks[1].attrs["ordered"], false);
    assert!(blocks[0].inner_html.starts_with("<ol class=\"pb-list\">"));
}

#[test]
fn test_document_order_across_groups() {
    let html = r#"
        <main>
            <section><h1>One</h1><div class="row"><p>Two</p></div></section>
            <aside><table><tr><td>3</td></tr></table></aside>
            <blockquote>Four</blockquote>
            <iframe src="https://video.test/5"></iframe>
        </main>"#;
    assert_eq!(
        kinds(&lower_str(html)),
        vec![
            BlockKind::Heading,
            BlockKind::Paragraph,
            BlockKind::Table,
            BlockKind::Blockquote,
            BlockKind::Embed,
        ]
    );
}

#[test]
fn test_utility_classes_use_prefix() {
    let classes = UtilityClasses::from_prefix("ai");
    let nodes = lower(
        &normalize("<table><tr><td>1</td></tr></table>", EncodingStrategy::Html5),
        &classes,
    );
    let BlockNode::Table(html) = &nodes[0] else {
        panic!("expected table");
    };
    assert_eq!(html.classes, "ai-table");
    assert!(html.outer_html.starts_with("<table class=\"ai-table\">"));
}

#[test]
fn test_gutenberg_output_lowers_to_same_kinds() {
    let html = r#"
        <h2 id="a">Heading</h2>
        <p>Para <em>graph</em></p>
        <table><tr><td>cell</td></tr></table>
        <ul><li>one</li><li>two</li></ul>
        <blockquote><p>quoted</p></blockquote>"#;
    let first = lower_str(html);

    let converter = common::test_converter();
    let result = converter.convert(html, &common::options_for(Builder::Gutenberg));
    let emitted: String = common::gutenberg_blocks(&result)
        .iter()
        .map(|block| block.inner_html.as_str())
        .collect();
    let second = lower_str(&emitted);

    assert_eq!(kinds(&first), kinds(&second));
}

#[test]
fn test_malformed_markup_still_lowers() {
    let nodes = lower_str("<div><p>open<div><h3>inner</h3></p></span>");
    assert!(kinds(&nodes).contains(&BlockKind::Heading));
}

#[test]
fn test_legacy_encoding_strategy() {
    let nodes = lower(
        &normalize("<p>Grüße</p>", EncodingStrategy::LegacyNumericEntities),
        &UtilityClasses::default(),
    );
    let BlockNode::Paragraph(html) = &nodes[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(html.inner_html, "Grüße");
}

proptest! {
    #[test]
    fn heading_level_matches_tag(level in 1u8..=6, text in "[A-Za-z][A-Za-z ]{0,15}[A-Za-z]") {
        let html = format!("<h{level}>{text}</h{level}>");
        let converter = common::test_converter();

        let elementor = converter.convert(&html, &common::options_for(Builder::Elementor));
        let widgets = common::elementor_widgets(&elementor);
        let expected_header_size = format!("h{level}");
        prop_assert_eq!(widgets[0]["settings"]["header_size"].as_str(), Some(expected_header_size.as_str()));

        let divi = converter.convert(&html, &common::options_for(Builder::Divi));
        let title_level = format!("title_level=\"h{}\"", level);
        prop_assert!(common::divi_shortcodes(&divi).contains(&title_level));

        let gutenberg = converter.convert(&html, &common::options_for(Builder::Gutenberg));
        prop_assert_eq!(common::gutenberg_blocks(&gutenberg)[0].attrs["level"].as_u64(), Some(u64::from(level)));
    }
}
