//! Image reference rendering.
//!
//! `![label](img/<name>.png)` is published as a link to the full-size image
//! wrapping the resized variant:
//!
//! ```text
//! <a href="<base>/<name>.png"><img src="<base>/<name>-<WxH>.png" alt="<alt>" class="alignnone size-medium wp-image-<id>" /></a>
//! ```

use crate::config::ConversionConfig;
use crate::error::Md2HtmlError;

/// Render the HTML for image `name`.
///
/// Fails when `name` has no mapping or no base path is configured.
pub fn render_image(name: &str, config: &ConversionConfig) -> Result<String, Md2HtmlError> {
    let mapping = config
        .images
        .get(name)
        .ok_or_else(|| Md2HtmlError::MissingImageMapping {
            name: name.to_string(),
        })?;
    let base = config
        .base_path
        .as_deref()
        .ok_or_else(|| Md2HtmlError::BasePathNotSet {
            name: name.to_string(),
        })?;

    Ok(format!(
        "<a href=\"{base}/{name}.png\"><img src=\"{base}/{name}-{res}.png\" alt=\"{alt}\" class=\"alignnone size-medium wp-image-{id}\" /></a>",
        res = mapping.resolution,
        alt = mapping.alt(),
        id = mapping.id,
    ))
}
