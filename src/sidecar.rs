//! Sidecar image-mapping file.
//!
//! A document may ship with a small line-based file next to it that names
//! the base path and the image table:
//!
//! ```text
//! base-bath: https://blog.example.com/files/2018/09
//! structured-test-run: 250x223:56176
//! grouped-test-run: 250x270:56175
//! ```
//!
//! The `base-bath` key is spelled that way in every existing sidecar and is
//! matched literally. Blank lines are skipped; any other line that fits
//! neither shape is a [`Md2HtmlError::ConfigParse`].

use crate::config::ImageMapping;
use crate::error::Md2HtmlError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extension given to the sidecar of a document (`README.md` → `README.yaml`).
pub const SIDECAR_EXTENSION: &str = "yaml";

static RE_BASE_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^base-bath: (.*)$").unwrap());
static RE_MAPPING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^#:\s][^:\s]*): ([0-9x]*):([0-9]*)$").unwrap());

/// Parsed contents of a sidecar file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidecar {
    pub base_path: Option<String>,
    /// Entries in file order.
    pub images: Vec<ImageMapping>,
}

/// Path of the sidecar belonging to `document`.
pub fn sidecar_path_for(document: impl AsRef<Path>) -> PathBuf {
    document.as_ref().with_extension(SIDECAR_EXTENSION)
}

/// Parse sidecar text. `origin` is only used in error messages.
pub fn parse_sidecar(text: &str, origin: impl AsRef<Path>) -> Result<Sidecar, Md2HtmlError> {
    let mut sidecar = Sidecar::default();
    let mut seen = HashSet::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        if line.is_empty() {
            continue;
        }

        let invalid = || Md2HtmlError::ConfigParse {
            path: origin.as_ref().to_path_buf(),
            line: i + 1,
            content: line.to_string(),
        };

        if let Some(caps) = RE_BASE_PATH.captures(line) {
            sidecar.base_path = Some(caps[1].trim().to_string());
        } else if let Some(caps) = RE_MAPPING.captures(line) {
            // names are unique per document
            if !seen.insert(caps[1].to_string()) {
                return Err(invalid());
            }
            sidecar
                .images
                .push(ImageMapping::new(&caps[1], &caps[2], &caps[3]));
        } else {
            return Err(invalid());
        }
    }

    Ok(sidecar)
}

/// Read and parse the sidecar at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_sidecar(path: impl AsRef<Path>) -> Result<Option<Sidecar>, Md2HtmlError> {
    let path = path.as_ref();
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No sidecar at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(Md2HtmlError::from_read(path, e)),
    };

    let sidecar = parse_sidecar(&text, path)?;
    info!(
        "Loaded sidecar {} ({} images)",
        path.display(),
        sidecar.images.len()
    );
    Ok(Some(sidecar))
}
