//! Gutenberg emitter: block records and their comment-delimited form

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::{BuilderPayload, EmitContext, EmitOutput, Emitter, MetaData};
use crate::block_ir::{BlockNode, CapturedHtml, HeadingLevel, ImageSource};
use crate::converter::Builder;

/// One parsed-block record, the shape the block editor parser yields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GutenbergBlock {
    pub block_name: String,
    pub attrs: Map<String, Value>,
    pub inner_blocks: Vec<GutenbergBlock>,
    #[serde(rename = "innerHTML")]
    pub inner_html: String,
    pub inner_content: Vec<String>,
}

impl GutenbergBlock {
    #[must_use]
    pub fn new(block_name: &str, attrs: Map<String, Value>, html: String) -> Self {
        Self {
            block_name: block_name.to_string(),
            attrs,
            inner_blocks: Vec::new(),
            inner_content: vec![html.clone()],
            inner_html: html,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GutenbergEmitter;

impl Emitter for GutenbergEmitter {
    fn builder(&self) -> Builder {
        Builder::Gutenberg
    }

    fn emit(&self, nodes: &[BlockNode], ctx: &mut EmitContext<'_>) -> EmitOutput {
        let blocks = nodes.iter().map(|node| block(node, ctx)).collect();
        EmitOutput {
            content: BuilderPayload::Gutenberg(blocks),
            meta_data: MetaData::new(),
        }
    }
}

fn block(node: &BlockNode, ctx: &mut EmitContext<'_>) -> GutenbergBlock {
    match node {
        BlockNode::Heading {
            level,
            text,
            anchor_id,
        } => heading(*level, text, anchor_id.as_deref()),
        BlockNode::Image(image) => image_block(image, ctx),
        BlockNode::Paragraph(html) => {
            let mut attrs = Map::new();
            attrs.insert("className".into(), Value::String(html.classes.clone()));
            let markup = format!(
                "<p class=\"{}\">{}</p>",
                html_escape::encode_double_quoted_attribute(&html.classes),
                html.inner_html
            );
            GutenbergBlock::new("core/paragraph", attrs, markup)
        }
        BlockNode::Table(html) => {
            let markup = format!("<figure class=\"wp-block-table\">{}</figure>", html.outer_html);
            GutenbergBlock::new("core/table", Map::new(), markup)
        }
        BlockNode::RichList { ordered, html } => list(*ordered, html),
        BlockNode::Blockquote(html) => {
            let markup = format!(
                "<blockquote class=\"wp-block-quote {}\">{}</blockquote>",
                html_escape::encode_double_quoted_attribute(&html.classes),
                html.inner_html
            );
            GutenbergBlock::new("core/quote", Map::new(), markup)
        }
        BlockNode::Embed { raw_html } => GutenbergBlock::new("core/html", Map::new(), raw_html.clone()),
        BlockNode::PlainText { value } => {
            let markup = format!("<p>{}</p>", html_escape::encode_text(value));
            GutenbergBlock::new("core/paragraph", Map::new(), markup)
        }
    }
}

fn heading(level: HeadingLevel, text: &str, anchor_id: Option<&str>) -> GutenbergBlock {
    let mut attrs = Map::new();
    attrs.insert("level".into(), json!(level.get()));
    let id_attr = match anchor_id {
        Some(anchor) => {
            attrs.insert("anchor".into(), Value::String(anchor.to_string()));
            format!(" id=\"{}\"", html_escape::encode_double_quoted_attribute(anchor))
        }
        None => String::new(),
    };
    let markup = format!(
        "<{tag} class=\"wp-block-heading\"{id_attr}>{}</{tag}>",
        html_escape::encode_text(text),
        tag = level.tag()
    );
    GutenbergBlock::new("core/heading", attrs, markup)
}

fn image_block(image: &ImageSource, ctx: &mut EmitContext<'_>) -> GutenbergBlock {
    let resolved = ctx.images.resolve(image);

    let mut attrs = Map::new();
    if let Some(id) = resolved.attachment_id {
        attrs.insert("id".into(), json!(id));
    }
    attrs.insert("sizeSlug".into(), Value::String("full".into()));
    attrs.insert("linkDestination".into(), Value::String("none".into()));

    let class_attr = resolved
        .attachment_id
        .map(|id| format!(" class=\"wp-image-{id}\""))
        .unwrap_or_default();
    let title_attr = image
        .title
        .as_deref()
        .map(|title| format!(" title=\"{}\"", html_escape::encode_double_quoted_attribute(title)))
        .unwrap_or_default();
    let markup = format!(
        "<figure class=\"wp-block-image size-full\"><img src=\"{}\" alt=\"{}\"{title_attr}{class_attr}/></figure>",
        html_escape::encode_double_quoted_attribute(&resolved.url),
        html_escape::encode_double_quoted_attribute(image.alt_text()),
    );
    GutenbergBlock::new("core/image", attrs, markup)
}

fn list(ordered: bool, html: &CapturedHtml) -> GutenbergBlock {
    let mut attrs = Map::new();
    attrs.insert("ordered".into(), Value::Bool(ordered));
    let tag = if ordered { "ol" } else { "ul" };
    let markup = format!(
        "<{tag} class=\"{}\">{}</{tag}>",
        html_escape::encode_double_quoted_attribute(&html.classes),
        html.inner_html
    );
    GutenbergBlock::new("core/list", attrs, markup)
}

/// Render blocks in the comment-delimited `post_content` form
#[must_use]
pub fn serialize_blocks(blocks: &[GutenbergBlock]) -> String {
    blocks.iter().map(serialize_block).collect::<Vec<_>>().join("\n\n")
}

fn serialize_block(block: &GutenbergBlock) -> String {
    let name = block.block_name.strip_prefix("core/").unwrap_or(&block.block_name);
    let attrs = if block.attrs.is_empty() {
        String::new()
    } else {
        format!(" {}", serialize_attrs(&block.attrs))
    };
    format!("<!-- wp:{name}{attrs} -->\n{}\n<!-- /wp:{name} -->", block.inner_html)
}

/// JSON attributes made safe to sit inside an HTML comment
fn serialize_attrs(attrs: &Map<String, Value>) -> String {
    Value::Object(attrs.clone())
        .to_string()
        .replace("--", "\\u002d\\u002d")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace("\\\"", "\\u0022")
}
