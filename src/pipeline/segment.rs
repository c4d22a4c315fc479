//! Split a document into alternating prose and code segments.
//!
//! The split is purely textual: every literal occurrence of the fence token
//! toggles between prose and code, so a document always starts and ends in
//! prose and a well-formed document has an even number of fences. There is
//! no language or indentation awareness; ```` ```java ```` opens a code
//! segment whose text starts with `java`.

use crate::error::Md2HtmlError;

/// The code fence token.
pub const FENCE: &str = "```";

/// A piece of the document, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any fence.
    Prose(&'a str),
    /// Text between an opening and a closing fence, fences excluded.
    Code(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::Prose(t) | Segment::Code(t) => t,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code(_))
    }
}

/// Split `text` on every occurrence of `delimiter`.
///
/// Even-indexed parts are prose, odd-indexed parts are code. Fails with
/// [`Md2HtmlError::UnterminatedFence`] when the number of parts is even.
pub fn segment<'a>(text: &'a str, delimiter: &str) -> Result<Vec<Segment<'a>>, Md2HtmlError> {
    let parts: Vec<&str> = text.split(delimiter).collect();
    if parts.len() % 2 == 0 {
        return Err(Md2HtmlError::UnterminatedFence {
            fences: parts.len() - 1,
        });
    }

    Ok(parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 0 {
                Segment::Prose(part)
            } else {
                Segment::Code(part)
            }
        })
        .collect())
}
