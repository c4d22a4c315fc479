//! Render a code segment as a preformatted block.
//!
//! Only the `java` info string is recognised, and only as the very first four
//! characters of the segment. Every other block is emitted as plain `<pre>`
//! with its text untouched, including any leading info string.

const JAVA: &str = "java";

/// Wrap `text` in `<pre>`, tagging Java blocks with `lang="java5"`.
pub fn render_code(text: &str) -> String {
    match text.strip_prefix(JAVA) {
        Some(body) => format!("<pre lang=\"java5\">{body}</pre>"),
        None => format!("<pre>{text}</pre>"),
    }
}
