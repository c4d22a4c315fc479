//! Error types for the readme2html library.
//!
//! Every failure is fatal: a conversion either produces the whole HTML
//! document or nothing. A broken image reference or an unclosed fence is a
//! document-authoring mistake, and silently rendering around it would publish
//! an incorrect post.
//!
//! [`Md2HtmlError::kind`] groups the variants so callers can tell a malformed
//! document apart from a missing resource or a bad sidecar file.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the readme2html library.
#[derive(Debug, Error)]
pub enum Md2HtmlError {
    // ── Document errors ───────────────────────────────────────────────────
    /// The document contains an odd number of ``` fences.
    #[error("Unterminated code fence: found {fences} ``` markers, expected an even number.\nEvery code block must be closed.")]
    UnterminatedFence { fences: usize },

    /// An image reference names an entry absent from the mapping table.
    #[error("Missing image mapping for '{name}'\nAdd `{name}: <WxH>:<id>` to the sidecar or pass --image {name}=<WxH>:<id>.")]
    MissingImageMapping { name: String },

    /// An image was rendered before any base path was configured.
    #[error("No base path configured while rendering image '{name}'\nAdd `base-bath: <url>` to the sidecar or pass --base-path.")]
    BasePathNotSet { name: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// A sidecar line matches neither `base-bath: <url>` nor `<name>: <WxH>:<id>`.
    #[error("Invalid sidecar line {line} in '{path}': {content:?}")]
    ConfigParse {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Reading the document or sidecar failed for another reason.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of [`Md2HtmlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The Markdown itself is malformed (unclosed fence).
    MalformedInput,
    /// The document references an image the table does not know.
    MissingImageMapping,
    /// The sidecar file could not be parsed.
    ConfigParse,
    /// Configuration is incomplete or invalid.
    Config,
    /// Reading or writing a file failed.
    Io,
}

impl Md2HtmlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Md2HtmlError::UnterminatedFence { .. } => ErrorKind::MalformedInput,
            Md2HtmlError::MissingImageMapping { .. } => ErrorKind::MissingImageMapping,
            Md2HtmlError::ConfigParse { .. } => ErrorKind::ConfigParse,
            Md2HtmlError::BasePathNotSet { .. } | Md2HtmlError::InvalidConfig(_) => {
                ErrorKind::Config
            }
            Md2HtmlError::FileNotFound { .. }
            | Md2HtmlError::PermissionDenied { .. }
            | Md2HtmlError::ReadFailed { .. }
            | Md2HtmlError::OutputWriteFailed { .. } => ErrorKind::Io,
        }
    }

    /// Map an `io::Error` from opening `path` onto the matching variant.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Md2HtmlError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => Md2HtmlError::PermissionDenied { path },
            _ => Md2HtmlError::ReadFailed { path, source },
        }
    }
}
