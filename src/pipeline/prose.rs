//! Prose rules: the ordered substitution chain applied outside code fences.
//!
//! Every rule is a global substitution over the output of the previous one.
//! Nothing is re-parsed, so overlapping markup (an `*` inside a link label,
//! say) ends up however the linear order leaves it.
//!
//! ## Rule Order
//!
//! The title is stripped before heading conversion so it never becomes an
//! `<h1>`. Headings are converted while they still sit on their own line,
//! before line joining can merge them into a paragraph. Images run before
//! links since `![x](y)` contains a link-shaped `[x](y)`.

use crate::config::ConversionConfig;
use crate::error::Md2HtmlError;
use crate::pipeline::image::render_image;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Apply all prose rules to one prose segment.
///
/// Rules (applied in order):
/// 1. Strip a leading `# title` line and the blank line after it
/// 2. Convert `#`..`####` headings to `<h1>`..`<h4>`
/// 3. Join soft-wrapped lines
/// 4. Convert `![label](img/<name>.png)` to a linked image
/// 5. Convert `[label](url)` to an external link
/// 6. Convert `` `text` `` to `<tt>`
/// 7. Convert `*text*` to `<em>`
pub fn render_prose(input: &str, config: &ConversionConfig) -> Result<String, Md2HtmlError> {
    render_prose_counted(input, config).map(|(html, _)| html)
}

/// Like [`render_prose`], also returning the number of images rendered.
pub(crate) fn render_prose_counted(
    input: &str,
    config: &ConversionConfig,
) -> Result<(String, usize), Md2HtmlError> {
    let s = strip_title(input);
    let s = convert_headings(&s);
    let s = join_single_newlines(&s);
    let (s, images) = convert_images(&s, config)?;
    let s = convert_links(&s);
    let s = convert_code_spans(&s);
    Ok((convert_emphasis(&s), images))
}

// ── Rule 1: Strip leading title ──────────────────────────────────────────────

static RE_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A# .*\n\n").unwrap());

fn strip_title(input: &str) -> String {
    RE_TITLE.replace(input, "").into_owned()
}

// ── Rule 2: Headings ─────────────────────────────────────────────────────────

const HEADING_LEVELS: usize = 4;

static RE_HEADINGS: Lazy<Vec<Regex>> = Lazy::new(|| {
    (1..=HEADING_LEVELS)
        .map(|level| Regex::new(&format!(r"\n#{{{level}}} ([^\n]*)\n\n")).unwrap())
        .collect()
});

/// H1 first, then H2..H4. Each pattern requires a space right after its
/// hashes, so `## x` never matches the H1 rule.
fn convert_headings(input: &str) -> String {
    let mut s = input.to_string();
    for (i, re) in RE_HEADINGS.iter().enumerate() {
        let level = i + 1;
        let replacement = format!("\n<h{level}>${{1}}</h{level}>\n\n");
        s = re.replace_all(&s, replacement.as_str()).into_owned();
    }
    s
}

// ── Rule 3: Join soft-wrapped lines ──────────────────────────────────────────

/// Replace every `\n` that has a non-newline character on both sides with a
/// space. Paragraph breaks and newlines at either end of the segment stay.
fn join_single_newlines(input: &str) -> String {
    // scanned rather than regex-replaced so runs like `a\nb\nc` join fully
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    for (i, ch) in input.char_indices() {
        let joins = ch == '\n'
            && i > 0
            && bytes[i - 1] != b'\n'
            && bytes.get(i + 1).is_some_and(|&b| b != b'\n');
        out.push(if joins { ' ' } else { ch });
    }
    out
}

// ── Rule 4: Images ───────────────────────────────────────────────────────────

// non-greedy on purpose: two images on one joined line stay separate
static RE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[(.*?)\]\(img/(.*?)\.png\)").unwrap());

/// The label is ignored; alt text comes from the image name.
fn convert_images(
    input: &str,
    config: &ConversionConfig,
) -> Result<(String, usize), Md2HtmlError> {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    let mut count = 0;
    for caps in RE_IMAGE.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&input[last..whole.start()]);
        out.push_str(&render_image(&caps[2], config)?);
        last = whole.end();
        count += 1;
    }
    out.push_str(&input[last..]);
    Ok((out, count))
}

// ── Rule 5: Links ────────────────────────────────────────────────────────────

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

fn convert_links(input: &str) -> String {
    RE_LINK
        .replace_all(input, |caps: &Captures<'_>| {
            format!(
                "<a href=\"{}\" rel=\"noopener\" target=\"_blank\">{}</a>",
                &caps[2], &caps[1]
            )
        })
        .into_owned()
}

// ── Rule 6: Code spans ───────────────────────────────────────────────────────

static RE_CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").unwrap());

fn convert_code_spans(input: &str) -> String {
    RE_CODE_SPAN
        .replace_all(input, "<tt>${1}</tt>")
        .into_owned()
}

// ── Rule 7: Emphasis ─────────────────────────────────────────────────────────

static RE_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());

fn convert_emphasis(input: &str) -> String {
    RE_EMPHASIS
        .replace_all(input, "<em>${1}</em>")
        .into_owned()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn prose(input: &str) -> String {
        render_prose(input, &ConversionConfig::default()).unwrap()
    }

    #[test]
    fn test_strip_title() {
        assert_eq!(prose("# hi\n\nho\n"), "ho\n");
    }

    #[test]
    fn test_title_only_at_start() {
        assert_eq!(prose("pre\n\n# hi\n\nho\n"), "pre\n\n<h1>hi</h1>\n\nho\n");
    }

    #[test]
    fn test_title_needs_blank_line() {
        assert_eq!(strip_title("# hi\nho\n"), "# hi\nho\n");
    }

    #[test]
    fn test_headings_all_levels() {
        for level in 1..=4 {
            let hashes = "#".repeat(level);
            let input = format!("pre\n\n{hashes} hi\n\nho\n");
            let expected = format!("pre\n\n<h{level}>hi</h{level}>\n\nho\n");
            assert_eq!(prose(&input), expected, "level {level}");
        }
    }

    #[test]
    fn test_heading_needs_trailing_blank_line() {
        assert_eq!(convert_headings("pre\n\n## hi\nho\n"), "pre\n\n## hi\nho\n");
    }

    #[test]
    fn test_five_hashes_untouched() {
        assert_eq!(convert_headings("a\n##### deep\n\nb"), "a\n##### deep\n\nb");
    }

    #[test]
    fn test_join_single_newlines() {
        assert_eq!(prose("hi\nho\n"), "hi ho\n");
    }

    #[test]
    fn test_join_keeps_paragraph_breaks() {
        assert_eq!(prose("hi\n\nho\n"), "hi\n\nho\n");
    }

    #[test]
    fn test_join_consecutive_short_lines() {
        assert_eq!(join_single_newlines("a\nb\nc\n"), "a b c\n");
    }

    #[test]
    fn test_join_leaves_segment_edges() {
        assert_eq!(join_single_newlines("\nhi\n"), "\nhi\n");
    }

    #[test]
    fn test_join_multibyte_neighbours() {
        assert_eq!(join_single_newlines("größe\nüber"), "größe über");
    }

    #[test]
    fn test_two_images_on_one_line() {
        let config = ConversionConfig::builder()
            .base_path("b")
            .image_mapping("x", "1x1", "1")
            .image_mapping("y", "2x2", "2")
            .build()
            .unwrap();
        let (html, images) =
            render_prose_counted("![a](img/x.png) and ![c](img/y.png)\n", &config).unwrap();
        assert_eq!(images, 2);
        assert!(html.contains("wp-image-1"));
        assert!(html.contains("wp-image-2"));
    }

    #[test]
    fn test_link() {
        assert_eq!(
            prose("hi [label](https://uri) ho\n"),
            "hi <a href=\"https://uri\" rel=\"noopener\" target=\"_blank\">label</a> ho\n"
        );
    }

    #[test]
    fn test_two_links_on_one_line() {
        assert_eq!(
            convert_links("[a](x) and [b](y)"),
            "<a href=\"x\" rel=\"noopener\" target=\"_blank\">a</a> and \
             <a href=\"y\" rel=\"noopener\" target=\"_blank\">b</a>"
        );
    }

    #[test]
    fn test_code_span() {
        assert_eq!(prose("hi `code tt` ho\n"), "hi <tt>code tt</tt> ho\n");
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(prose("hi *text* ho\n"), "hi <em>text</em> ho\n");
    }

    #[test]
    fn test_image() {
        let config = ConversionConfig::builder()
            .base_path("dummy-base-path")
            .image_mapping("image-name", "250x300", "1234")
            .build()
            .unwrap();
        let (html, images) =
            render_prose_counted("hi ![label](img/image-name.png) ho\n", &config).unwrap();
        assert_eq!(
            html,
            "hi <a href=\"dummy-base-path/image-name.png\"><img src=\"dummy-base-path/image-name-250x300.png\" alt=\"image name\" class=\"alignnone size-medium wp-image-1234\" /></a> ho\n"
        );
        assert_eq!(images, 1);
    }

    #[test]
    fn test_unmapped_image_fails() {
        let err = render_prose("![x](img/nope.png)\n", &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, Md2HtmlError::MissingImageMapping { ref name } if name == "nope"));
    }

    #[test]
    fn test_non_img_path_is_plain_link() {
        // only img/<name>.png is an image reference
        assert_eq!(
            prose("![pic](other/a.png)\n"),
            "!<a href=\"other/a.png\" rel=\"noopener\" target=\"_blank\">pic</a>\n"
        );
    }
}
