//! Source documents.
//!
//! A [`Document`] is the immutable Markdown text plus, when it was read from
//! disk, the path it came from. The path is what lets a document find its
//! sidecar image table.

use crate::config::ConversionConfig;
use crate::convert;
use crate::error::Md2HtmlError;
use crate::sidecar::sidecar_path_for;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Markdown source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    path: Option<PathBuf>,
}

impl Document {
    /// A document held in memory, with no sidecar.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
        }
    }

    /// Read the whole of `reader` as UTF-8.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, Md2HtmlError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| Md2HtmlError::ReadFailed {
                path: PathBuf::from("<reader>"),
                source,
            })?;
        Ok(Self::from_text(text))
    }

    /// Read the document at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Md2HtmlError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| Md2HtmlError::from_read(path, e))?;
        debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(Self {
            text,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Where this document's sidecar would be, if it came from a file.
    pub fn sidecar_path(&self) -> Option<PathBuf> {
        self.path.as_ref().map(sidecar_path_for)
    }

    /// Convert this document to HTML.
    pub fn convert(&self, config: &ConversionConfig) -> Result<String, Md2HtmlError> {
        convert::convert(&self.text, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_has_no_sidecar() {
        let doc = Document::from_text("hi\n");
        assert_eq!(doc.text(), "hi\n");
        assert!(doc.path().is_none());
        assert!(doc.sidecar_path().is_none());
    }

    #[test]
    fn test_from_reader() {
        let doc = Document::from_reader("hi *there*\n".as_bytes()).unwrap();
        assert_eq!(
            doc.convert(&ConversionConfig::default()).unwrap(),
            "hi <em>there</em>\n"
        );
    }

    #[test]
    fn test_from_reader_rejects_invalid_utf8() {
        let bytes: &[u8] = &[0x66, 0xff, 0x6f];
        let err = Document::from_reader(bytes).unwrap_err();
        assert!(matches!(err, Md2HtmlError::ReadFailed { .. }));
    }

    #[test]
    fn test_open_records_sidecar_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Title\n\nbody\n").unwrap();

        let doc = Document::open(&path).unwrap();
        assert_eq!(doc.path(), Some(path.as_path()));
        assert_eq!(doc.sidecar_path(), Some(dir.path().join("README.yaml")));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::open(dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, Md2HtmlError::FileNotFound { .. }));
    }
}
