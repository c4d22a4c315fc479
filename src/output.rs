//! Conversion result types.

use serde::{Deserialize, Serialize};

/// The HTML produced for one document plus what went into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The assembled HTML, segments concatenated in document order.
    pub html: String,
    pub stats: ConversionStats,
}

/// Counters collected during a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Segments outside code fences (always at least one).
    pub prose_segments: usize,
    /// Fenced code blocks.
    pub code_segments: usize,
    /// Image references resolved through the mapping table.
    pub images: usize,
    /// Wall-clock time spent converting, excluding file I/O.
    pub duration_ms: u64,
}
