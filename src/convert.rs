//! Conversion entry points.
//!
//! [`convert`] is the pure transformation: Markdown text and a frozen
//! [`ConversionConfig`] in, HTML out. The other functions wrap it with file
//! I/O and statistics. Nothing is written until the whole document has
//! converted, so a failed conversion never leaves partial HTML behind.

use crate::config::ConversionConfig;
use crate::document::Document;
use crate::error::Md2HtmlError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::code::render_code;
use crate::pipeline::prose::render_prose_counted;
use crate::pipeline::segment::{segment, Segment, FENCE};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert Markdown text to HTML.
///
/// Deterministic: the same text and config always give the same HTML.
///
/// # Errors
/// - [`Md2HtmlError::UnterminatedFence`] when a ``` block is never closed
/// - [`Md2HtmlError::MissingImageMapping`] when an image is not in the table
/// - [`Md2HtmlError::BasePathNotSet`] when an image is used with no base path
pub fn convert(markdown: &str, config: &ConversionConfig) -> Result<String, Md2HtmlError> {
    render(markdown, config).map(|output| output.html)
}

/// Convert a [`Document`], collecting statistics.
pub fn convert_document(
    document: &Document,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2HtmlError> {
    if let Some(path) = document.path() {
        info!("Converting {}", path.display());
    }
    render(document.text(), config)
}

/// Read and convert the Markdown file at `input` with an explicit config.
pub fn convert_file(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2HtmlError> {
    let document = Document::open(input)?;
    convert_document(&document, config)
}

/// Read and convert the Markdown file at `input`, configured from its
/// sidecar (`README.md` → `README.yaml`) when one exists.
pub fn convert_path(input: impl AsRef<Path>) -> Result<ConversionOutput, Md2HtmlError> {
    let document = Document::open(input)?;
    let mut builder = ConversionConfig::builder();
    if let Some(sidecar) = document.sidecar_path() {
        builder = builder.load_sidecar(sidecar)?;
    }
    let config = builder.build()?;
    convert_document(&document, &config)
}

/// Convert `input` and write the HTML to `output`.
pub fn convert_to_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2HtmlError> {
    let output = output.as_ref();
    let converted = convert_file(input, config)?;

    std::fs::write(output, converted.html.as_bytes()).map_err(|source| {
        Md2HtmlError::OutputWriteFailed {
            path: output.to_path_buf(),
            source,
        }
    })?;

    info!(
        "Wrote {} bytes of HTML to {}",
        converted.html.len(),
        output.display()
    );
    Ok(converted.stats)
}

fn render(markdown: &str, config: &ConversionConfig) -> Result<ConversionOutput, Md2HtmlError> {
    let start = Instant::now();
    let segments = segment(markdown, FENCE)?;

    let mut html = String::with_capacity(markdown.len() + markdown.len() / 4);
    let mut stats = ConversionStats::default();

    for seg in &segments {
        match seg {
            Segment::Prose(text) => {
                let (rendered, images) = render_prose_counted(text, config)?;
                html.push_str(&rendered);
                stats.prose_segments += 1;
                stats.images += images;
            }
            Segment::Code(text) => {
                html.push_str(&render_code(text));
                stats.code_segments += 1;
            }
        }
    }

    stats.duration_ms = start.elapsed().as_millis() as u64;
    debug!(
        "Converted {} prose / {} code segments, {} images in {}ms",
        stats.prose_segments, stats.code_segments, stats.images, stats.duration_ms
    );
    Ok(ConversionOutput { html, stats })
}
