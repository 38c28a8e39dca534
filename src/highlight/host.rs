//! The capability contract between the highlighter and the editor

use crate::palette::Rgb;

/// A styled-text surface the highlighter can read and color
///
/// All offsets are byte offsets into the document text, with lines joined
/// by a single `\n`. The highlighter performs exactly one kind of
/// mutation through this trait: `set_color`. A host is free to implement
/// coloring via its own selection (as rich-text widgets do), which is why
/// the highlighter saves and restores the selection around every pass.
pub trait HighlightHost {
    /// Full current document text
    fn text(&self) -> String;

    /// Number of lines in the document
    fn line_count(&self) -> usize;

    /// Text of line `index` (without newline) and its absolute starting
    /// offset. None if the index is out of range.
    fn line(&self, index: usize) -> Option<(String, usize)>;

    /// Current selection as (start, length)
    fn selection(&self) -> (usize, usize);

    /// Set the selection to (start, length)
    fn set_selection(&mut self, start: usize, len: usize);

    /// Set the foreground color of the byte range [start, start + len)
    fn set_color(&mut self, start: usize, len: usize, color: Rgb);
}
