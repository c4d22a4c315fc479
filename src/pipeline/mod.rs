//! Pipeline stages for Markdown-to-HTML conversion.
//!
//! Each submodule implements exactly one transformation step, so each rule
//! set can be tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//!                 ┌─▶ prose ──▶ image ─┐
//! segment ──▶ ────┤                    ├──▶ concatenate
//!  (```)          └─▶ code ────────────┘
//! ```
//!
//! 1. [`segment`] — split the document on ``` into alternating prose/code
//! 2. [`prose`]   — the ordered substitution chain (title, headings, line
//!    joining, images, links, code spans, emphasis)
//! 3. [`image`]   — resolve an image name against the mapping table
//! 4. [`code`]    — wrap a code segment in `<pre>`

pub mod code;
pub mod image;
pub mod prose;
pub mod segment;
