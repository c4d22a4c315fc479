//! # readme2html
//!
//! Convert README-style Markdown into HTML ready to paste into a blog post.
//!
//! ## Why this crate?
//!
//! A project README is usually the best write-up of a project, and the blog
//! post about it ends up being the same text. General Markdown renderers
//! produce HTML the blog engine mangles: images need to point at the media
//! library's resized variants, code blocks need the syntax highlighter's
//! `lang` attribute, and the README's `# Title` duplicates the post title.
//! This crate handles exactly that dialect and nothing more. It is not a
//! CommonMark implementation (no lists, tables, blockquotes or nesting) and
//! does no HTML escaping; input is trusted documentation source.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Segment  split on ``` into prose / code / prose / …
//!  ├─ 2. Prose    title strip → headings → line join → images → links
//!  │              → code spans → emphasis
//!  ├─ 3. Code     <pre> or <pre lang="java5">
//!  └─ 4. Output   segments concatenated in order
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use readme2html::{convert, ConversionConfig};
//!
//! let config = ConversionConfig::builder()
//!     .base_path("https://blog.example.com/files/2018/09")
//!     .image_mapping("grouped-test-run", "250x270", "56175")
//!     .build()?;
//!
//! let html = convert("# Title\n\nSee ![run](img/grouped-test-run.png).\n", &config)?;
//! assert!(html.contains("wp-image-56175"));
//! # Ok::<(), readme2html::Md2HtmlError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2html` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod sidecar;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, ImageMapping, ImageMappings};
pub use convert::{convert, convert_document, convert_file, convert_path, convert_to_file};
pub use document::Document;
pub use error::{ErrorKind, Md2HtmlError};
pub use output::{ConversionOutput, ConversionStats};
pub use sidecar::{load_sidecar, parse_sidecar, sidecar_path_for, Sidecar};
