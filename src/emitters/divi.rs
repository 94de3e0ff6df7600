//! Divi emitter: shortcode string
//!
//! Output is a single section/row/column triple with one module per node.
//! Every shortcode carries the same version scaffolding.

use super::shortcode::{Shortcode, escape_content};
use super::{BuilderPayload, EmitContext, EmitOutput, Emitter, MetaData};
use crate::block_ir::{BlockNode, ImageSource};
use crate::converter::Builder;

#[derive(Debug, Clone, Copy, Default)]
pub struct DiviEmitter;

impl Emitter for DiviEmitter {
    fn builder(&self) -> Builder {
        Builder::Divi
    }

    fn emit(&self, nodes: &[BlockNode], ctx: &mut EmitContext<'_>) -> EmitOutput {
        let version = ctx.config.divi_version().to_string();
        let modules: String = nodes.iter().map(|node| module(node, &version, ctx)).collect();

        let column = scaffold("et_pb_column", &version).attr("type", "4_4").wrap(&modules);
        let row = scaffold("et_pb_row", &version).wrap(&column);
        let section = scaffold("et_pb_section", &version)
            .attr("fb_built", "1")
            .wrap(&row);

        let mut meta_data = MetaData::new();
        meta_data.insert("_et_pb_use_builder".into(), "on".into());
        meta_data.insert("_et_pb_old_content".into(), String::new());
        meta_data.insert("_et_builder_version".into(), format!("VB|Divi|{version}"));
        meta_data.insert(
            "_et_pb_page_layout".into(),
            ctx.config.divi_page_layout().to_string(),
        );
        meta_data.insert("_et_pb_show_page_creation".into(), "off".into());
        if let Some(post_id) = ctx.post_id {
            meta_data.insert(
                "_et_pb_ab_current_shortcode".into(),
                Shortcode::new("et_pb_split_track")
                    .attr("id", post_id.to_string())
                    .self_closing(),
            );
        }

        EmitOutput {
            content: BuilderPayload::Divi(section),
            meta_data,
        }
    }
}

fn scaffold(tag: &str, version: &str) -> Shortcode {
    Shortcode::new(tag)
        .attr("_builder_version", version)
        .attr("_module_preset", "default")
        .attr("global_colors_info", "{}")
}

fn module(node: &BlockNode, version: &str, ctx: &mut EmitContext<'_>) -> String {
    match node {
        BlockNode::Heading {
            level,
            text,
            anchor_id,
        } => scaffold("et_pb_heading", version)
            .attr("title", text.as_str())
            .attr("title_level", level.tag())
            .attr_opt("module_id", anchor_id.as_deref())
            .empty(),
        BlockNode::Image(image) => image_module(image, version, ctx),
        BlockNode::Paragraph(html) | BlockNode::Blockquote(html) => {
            scaffold("et_pb_text", version).wrap(&html.outer_html)
        }
        BlockNode::Table(html) | BlockNode::RichList { html, .. } => {
            scaffold("et_pb_code", version).wrap(&escape_content(&html.outer_html))
        }
        BlockNode::Embed { raw_html } => {
            scaffold("et_pb_code", version).wrap(&escape_content(raw_html))
        }
        BlockNode::PlainText { value } => {
            let paragraph = format!("<p>{}</p>", html_escape::encode_text(value));
            scaffold("et_pb_text", version).wrap(&paragraph)
        }
    }
}

fn image_module(image: &ImageSource, version: &str, ctx: &mut EmitContext<'_>) -> String {
    let resolved = ctx.images.resolve(image);
    scaffold("et_pb_image", version)
        .attr("src", resolved.url)
        .attr_opt("alt", image.alt.as_deref())
        .attr_opt("title_text", image.title.as_deref())
        .attr_opt("attachment_id", resolved.attachment_id.map(|id| id.to_string()))
        .empty()
}
