//! Configuration types for Markdown-to-HTML conversion.
//!
//! A conversion needs two inputs besides the document: the base path under
//! which images are hosted and the table mapping image names to their
//! resized variant and media id. Both live in [`ConversionConfig`], which is
//! frozen by [`ConversionConfigBuilder::build`] before any text is touched.
//! There is no way to change the base path or add an image once a conversion
//! can run, so "converted before the base path was set" cannot happen
//! half-way through a document.

use crate::error::Md2HtmlError;
use crate::sidecar::{self, Sidecar};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

static RE_RESOLUTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9x]*$").unwrap());
static RE_IMAGE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*$").unwrap());

/// One entry of the image table: `img/<name>.png` is published as
/// `<name>-<resolution>.png` with media id `<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMapping {
    pub name: String,
    /// Resized variant, `WxH` (e.g. `250x223`).
    pub resolution: String,
    /// Numeric media-library id, rendered as the `wp-image-<id>` class.
    pub id: String,
}

impl ImageMapping {
    pub fn new(
        name: impl Into<String>,
        resolution: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resolution: resolution.into(),
            id: id.into(),
        }
    }

    /// Alt text: the name with hyphens turned into spaces.
    pub fn alt(&self) -> String {
        self.name.replace('-', " ")
    }

    fn validate(&self) -> Result<(), Md2HtmlError> {
        if self.name.trim().is_empty() {
            return Err(Md2HtmlError::InvalidConfig(
                "image mapping name must not be empty".into(),
            ));
        }
        if !RE_RESOLUTION.is_match(&self.resolution) {
            return Err(Md2HtmlError::InvalidConfig(format!(
                "resolution for '{}' must look like WxH, got {:?}",
                self.name, self.resolution
            )));
        }
        if !RE_IMAGE_ID.is_match(&self.id) {
            return Err(Md2HtmlError::InvalidConfig(format!(
                "image id for '{}' must be numeric, got {:?}",
                self.name, self.id
            )));
        }
        Ok(())
    }
}

/// Image name → mapping table, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageMappings(BTreeMap<String, ImageMapping>);

impl ImageMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping. Names are unique per document, so a second entry
    /// for the same name is rejected.
    pub fn insert(&mut self, mapping: ImageMapping) -> Result<(), Md2HtmlError> {
        if self.0.contains_key(&mapping.name) {
            return Err(Md2HtmlError::InvalidConfig(format!(
                "duplicate image mapping for '{}'",
                mapping.name
            )));
        }
        self.0.insert(mapping.name.clone(), mapping);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ImageMapping> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageMapping> {
        self.0.values()
    }
}

/// Configuration for a Markdown-to-HTML conversion.
///
/// Built via [`ConversionConfig::builder()`]. The default config has no base
/// path and no images, which is enough for documents without image links.
///
/// # Example
/// ```rust
/// use readme2html::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .base_path("https://blog.example.com/files/2018/09")
///     .image_mapping("structured-test-run", "250x223", "56176")
///     .build()
///     .unwrap();
/// assert!(config.images.contains("structured-test-run"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// URL prefix for image links, without a trailing `/`.
    pub base_path: Option<String>,

    /// Images that may be referenced as `![...](img/<name>.png)`.
    pub images: ImageMappings,
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for [`ConversionConfig`].
///
/// Each image name may be added once; [`build`](Self::build) rejects
/// duplicates. To replace an entry that came from a sidecar, use
/// [`override_image`](Self::override_image).
#[derive(Debug, Default)]
pub struct ConversionConfigBuilder {
    base_path: Option<String>,
    images: Vec<ImageMapping>,
}

impl ConversionConfigBuilder {
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.base_path = Some(path.trim_end_matches('/').to_string());
        self
    }

    pub fn image_mapping(
        self,
        name: impl Into<String>,
        resolution: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        self.image(ImageMapping::new(name, resolution, id))
    }

    pub fn image(mut self, mapping: ImageMapping) -> Self {
        self.images.push(mapping);
        self
    }

    /// Replace any pending mapping with the same name, or add it.
    pub fn override_image(mut self, mapping: ImageMapping) -> Self {
        let before = self.images.len();
        self.images.retain(|m| m.name != mapping.name);
        if self.images.len() != before {
            debug!("Image mapping for '{}' overridden", mapping.name);
        }
        self.images.push(mapping);
        self
    }

    /// Add everything a parsed sidecar declares.
    pub fn sidecar(mut self, sidecar: Sidecar) -> Self {
        if let Some(base) = sidecar.base_path {
            self = self.base_path(base);
        }
        self.images.extend(sidecar.images);
        self
    }

    /// Merge the sidecar at `path` into the builder.
    ///
    /// A missing sidecar is not an error; the builder is returned unchanged.
    pub fn load_sidecar(self, path: impl AsRef<Path>) -> Result<Self, Md2HtmlError> {
        match sidecar::load_sidecar(path)? {
            Some(sidecar) => Ok(self.sidecar(sidecar)),
            None => Ok(self),
        }
    }

    /// Build the configuration, validating every image mapping.
    pub fn build(self) -> Result<ConversionConfig, Md2HtmlError> {
        let mut images = ImageMappings::new();
        for mapping in self.images {
            mapping.validate()?;
            images.insert(mapping)?;
        }
        if let Some(ref base) = self.base_path {
            if base.is_empty() {
                return Err(Md2HtmlError::InvalidConfig(
                    "base path must not be empty".into(),
                ));
            }
        }
        Ok(ConversionConfig {
            base_path: self.base_path,
            images,
        })
    }
}
