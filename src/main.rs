// Page-builder conversion CLI
//
// Reads HTML from a file or stdin and prints the conversion result as JSON.
// No image store is attached, so image sources are kept as they are.

use anyhow::{Context, Result};
use clap::Parser;
use kodegen_tools_pagebuilder::{BuilderChoice, ConvertOptions, Converter};
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Convert HTML into page-builder content
#[derive(Debug, Parser)]
#[command(name = "kodegen-pagebuilder", version, about)]
struct Args {
    /// Target builder: auto, elementor, divi or gutenberg
    #[arg(long, default_value = "auto", value_parser = BuilderChoice::from_str)]
    builder: BuilderChoice,

    /// Drop `<style>` rules instead of returning them as css_content
    #[arg(long)]
    no_css: bool,

    /// Keep page header and footer in the body
    #[arg(long)]
    no_header_footer: bool,

    /// JSON converter config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// HTML file to convert; stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read HTML from stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let converter = match &args.config {
        Some(path) => Converter::from_config_file(path)?,
        None => Converter::default(),
    };

    let bytes = read_input(args.input.as_ref())?;
    let document = kodegen_tools_pagebuilder::RawDocument::from_bytes(&bytes, None);

    let options = ConvertOptions {
        builder: args.builder,
        preserve_css: !args.no_css,
        upload_images: false,
        extract_header_footer: !args.no_header_footer,
        ..ConvertOptions::default()
    };

    let result = tokio::task::spawn_blocking(move || converter.convert_document(&document, &options))
        .await
        .map_err(|e| anyhow::anyhow!("Conversion task panicked: {}", e))?;

    if let Some(error) = &result.error {
        tracing::warn!("Conversion reported an error: {}", error);
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
