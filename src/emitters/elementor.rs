//! Elementor emitter: JSON widget tree
//!
//! The whole page is one section holding one full-width column. Every node
//! becomes one widget with a fresh 7-digit hex id.

use serde_json::{Map, Value, json};

use super::{BuilderPayload, EmitContext, EmitOutput, Emitter, MetaData};
use crate::block_ir::{BlockNode, HeadingLevel, ImageSource};
use crate::converter::Builder;

#[derive(Debug, Clone, Copy, Default)]
pub struct ElementorEmitter;

impl Emitter for ElementorEmitter {
    fn builder(&self) -> Builder {
        Builder::Elementor
    }

    fn emit(&self, nodes: &[BlockNode], ctx: &mut EmitContext<'_>) -> EmitOutput {
        let widgets: Vec<Value> = nodes.iter().filter_map(|node| widget(node, ctx)).collect();

        let tree = if widgets.is_empty() {
            Value::Array(Vec::new())
        } else {
            let column = json!({
                "id": ctx.ids.next_id(),
                "elType": "column",
                "settings": { "_column_size": 100 },
                "elements": widgets,
                "isInner": false,
            });
            json!([{
                "id": ctx.ids.next_id(),
                "elType": "section",
                "settings": {},
                "elements": [column],
                "isInner": false,
            }])
        };

        let mut meta_data = MetaData::new();
        meta_data.insert("_elementor_edit_mode".into(), "builder".into());
        meta_data.insert("_elementor_template_type".into(), "wp-page".into());
        meta_data.insert("_elementor_version".into(), ctx.config.elementor_version().to_string());
        meta_data.insert("_elementor_data".into(), tree.to_string());

        EmitOutput {
            content: BuilderPayload::Elementor(tree),
            meta_data,
        }
    }
}

fn widget(node: &BlockNode, ctx: &mut EmitContext<'_>) -> Option<Value> {
    let (widget_type, settings) = match node {
        BlockNode::Heading {
            level,
            text,
            anchor_id,
        } => ("heading", heading_settings(*level, text, anchor_id.as_deref(), ctx)),
        BlockNode::Image(image) => ("image", image_settings(image, ctx)),
        BlockNode::Paragraph(html)
        | BlockNode::Table(html)
        | BlockNode::Blockquote(html)
        | BlockNode::RichList { html, .. } => ("text-editor", text_editor(&html.outer_html)),
        BlockNode::Embed { raw_html } => {
            let mut settings = Map::new();
            settings.insert("html".into(), Value::String(raw_html.clone()));
            ("html", settings)
        }
        BlockNode::PlainText { value } => {
            tracing::debug!("Elementor has no bare text widget, skipping {} bytes", value.len());
            return None;
        }
    };

    Some(json!({
        "id": ctx.ids.next_id(),
        "elType": "widget",
        "widgetType": widget_type,
        "settings": settings,
        "elements": [],
    }))
}

fn heading_settings(
    level: HeadingLevel,
    text: &str,
    anchor_id: Option<&str>,
    ctx: &EmitContext<'_>,
) -> Map<String, Value> {
    let mut settings = Map::new();
    settings.insert("title".into(), Value::String(text.to_string()));
    settings.insert("header_size".into(), Value::String(level.tag()));

    let style = ctx.config.heading_style();
    if style.enabled {
        if let Some(color) = &style.title_color {
            settings.insert("title_color".into(), Value::String(color.clone()));
        }
        if style.typography {
            settings.insert("typography_typography".into(), Value::String("custom".into()));
            settings.insert(
                "typography_font_family".into(),
                Value::String(style.font_family.clone()),
            );
            settings.insert(
                "typography_font_weight".into(),
                Value::String(style.font_weight.clone()),
            );
        }
    }

    if let Some(anchor) = anchor_id {
        settings.insert("_element_id".into(), Value::String(anchor.to_string()));
    }
    settings
}

fn image_settings(image: &ImageSource, ctx: &mut EmitContext<'_>) -> Map<String, Value> {
    let resolved = ctx.images.resolve(image);

    let mut media = Map::new();
    media.insert("url".into(), Value::String(resolved.url));
    if let Some(id) = resolved.attachment_id {
        media.insert("id".into(), json!(id));
    }
    if let Some(alt) = image.alt.as_deref().filter(|a| !a.is_empty()) {
        media.insert("alt".into(), Value::String(alt.to_string()));
    }

    let mut settings = Map::new();
    settings.insert("image".into(), Value::Object(media));
    settings.insert("image_size".into(), Value::String("full".into()));
    settings
}

fn text_editor(html: &str) -> Map<String, Value> {
    let mut settings = Map::new();
    settings.insert("editor".into(), Value::String(html.to_string()));
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_ir::CapturedHtml;
    use crate::config::ConverterConfig;
    use crate::emitters::ImageResolver;
    use crate::image_migration::NoopMigrator;

    fn widgets(tree: &Value) -> &Vec<Value> {
        tree[0]["elements"][0]["elements"]
            .as_array()
            .expect("column holds a widget array")
    }

    #[test]
    fn test_widget_tree_shape() {
        let config = ConverterConfig::builder()
            .element_id_seed(3)
            .heading_color("#112233")
            .build()
            .expect("valid config");
        let mut ctx = EmitContext::new(&config, ImageResolver::new(&NoopMigrator, false, None), None);
        let nodes = vec![
            BlockNode::Heading {
                level: HeadingLevel::new(2).expect("valid level"),
                text: "Hi".into(),
                anchor_id: Some("top".into()),
            },
            BlockNode::Paragraph(CapturedHtml {
                inner_html: "x".into(),
                outer_html: r#"<p class="pb-paragraph">x</p>"#.into(),
                classes: "pb-paragraph".into(),
            }),
            BlockNode::PlainText { value: "skip".into() },
        ];

        let out = ElementorEmitter.emit(&nodes, &mut ctx);
        let BuilderPayload::Elementor(tree) = &out.content else {
            panic!("expected elementor payload");
        };

        assert_eq!(tree[0]["elType"], "section");
        let widgets = widgets(tree);
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0]["widgetType"], "heading");
        assert_eq!(widgets[0]["settings"]["header_size"], "h2");
        assert_eq!(widgets[0]["settings"]["title_color"], "#112233");
        assert_eq!(widgets[0]["settings"]["_element_id"], "top");
        assert_eq!(widgets[1]["widgetType"], "text-editor");
        assert_eq!(out.meta_data["_elementor_edit_mode"], "builder");
        assert_eq!(out.meta_data["_elementor_data"], tree.to_string());
    }

    #[test]
    fn test_ids_unique() {
        let config = ConverterConfig::default();
        let mut ctx = EmitContext::new(&config, ImageResolver::new(&NoopMigrator, false, None), None);
        let nodes: Vec<_> = (0..20)
            .map(|i| BlockNode::Embed {
                raw_html: format!("<iframe src=\"/{i}\"></iframe>"),
            })
            .collect();
        let out = ElementorEmitter.emit(&nodes, &mut ctx);
        let BuilderPayload::Elementor(tree) = &out.content else {
            panic!("expected elementor payload");
        };
        let mut ids: Vec<_> = widgets(tree).iter().map(|w| w["id"].to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_no_widgets_no_section() {
        let config = ConverterConfig::default();
        let mut ctx = EmitContext::new(&config, ImageResolver::new(&NoopMigrator, false, None), None);
        let out = ElementorEmitter.emit(&[], &mut ctx);
        assert!(out.content.is_empty());
    }
}
