//! Script buffer - lines of text with selection and color state
//!
//! The buffer is the highlighter's host: it assembles the document text,
//! maps absolute byte offsets to lines, and applies color-range commands
//! to the per-line color stores. It is also the edit surface the editor
//! loop mutates.

use std::path::{Path, PathBuf};

use crate::highlight::HighlightHost;
use crate::line::Line;
use crate::palette::Rgb;

/// A buffer containing a script and its metadata
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text, always at least one
    lines: Vec<Line>,
    /// Associated file path (None for unsaved scripts)
    filename: Option<PathBuf>,
    /// Whether the buffer has unsaved changes
    modified: bool,
    /// Selection start as an absolute byte offset
    sel_start: usize,
    /// Selection length in bytes (0 = plain caret)
    sel_len: usize,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            filename: None,
            modified: false,
            sel_start: 0,
            sel_len: 0,
        }
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut lines: Vec<Line> = content.split('\n').map(Line::from).collect();
        if lines.is_empty() {
            lines.push(Line::new());
        }

        Ok(Self {
            lines,
            filename: Some(path.to_path_buf()),
            modified: false,
            sel_start: 0,
            sel_len: 0,
        })
    }

    /// Write the buffer contents to its file
    pub fn save(&mut self) -> std::io::Result<()> {
        if let Some(path) = self.filename.clone() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Write the buffer contents to a path and adopt it
    pub fn save_to(&mut self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.text())?;
        self.filename = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&PathBuf> {
        self.filename.as_ref()
    }

    /// Associate the buffer with a path without writing it
    pub fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
    }

    /// Check if buffer is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark buffer as modified or clean
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Get a line by index
    pub fn get_line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Number of lines (inherent twin of the host method, so callers
    /// don't need the trait in scope)
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total document length in bytes (lines joined with `\n`)
    pub fn text_len(&self) -> usize {
        let content: usize = self.lines.iter().map(Line::len).sum();
        content + self.lines.len().saturating_sub(1)
    }

    /// Absolute byte offset of the start of a line
    pub fn line_start(&self, idx: usize) -> Option<usize> {
        if idx >= self.lines.len() {
            return None;
        }
        Some(self.lines[..idx].iter().map(|l| l.len() + 1).sum())
    }

    /// Map an absolute offset to (line index, byte offset within line)
    ///
    /// Offsets on a newline byte map to the end of that line; offsets
    /// past the end clamp to the last position.
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (idx, line) in self.lines.iter().enumerate() {
            if remaining <= line.len() {
                return (idx, remaining);
            }
            remaining -= line.len() + 1;
        }
        let last = self.lines.len() - 1;
        (last, self.lines[last].len())
    }

    /// Map (line index, byte offset within line) to an absolute offset
    pub fn offset_of(&self, line_idx: usize, byte_pos: usize) -> usize {
        let line_idx = line_idx.min(self.lines.len() - 1);
        let start: usize = self.lines[..line_idx].iter().map(|l| l.len() + 1).sum();
        start + byte_pos.min(self.lines[line_idx].len())
    }

    /// Caret position as (line index, byte offset within line)
    pub fn cursor(&self) -> (usize, usize) {
        self.position_of(self.sel_start)
    }

    /// Place the caret (collapses any selection)
    pub fn set_cursor(&mut self, line_idx: usize, byte_pos: usize) {
        self.sel_start = self.offset_of(line_idx, byte_pos);
        self.sel_len = 0;
    }

    /// Insert a character at the caret, advancing it
    pub fn insert_char(&mut self, ch: char) {
        let (line_idx, byte_pos) = self.cursor();
        self.lines[line_idx].insert_char(byte_pos, ch);
        self.modified = true;
        self.set_cursor(line_idx, byte_pos + ch.len_utf8());
    }

    /// Insert a newline at the caret, splitting the current line
    pub fn insert_newline(&mut self) {
        let (line_idx, byte_pos) = self.cursor();
        let rest = self.lines[line_idx].split_off(byte_pos);
        self.lines.insert(line_idx + 1, rest);
        self.modified = true;
        self.set_cursor(line_idx + 1, 0);
    }

    /// Delete the character before the caret; joins lines at column 0
    ///
    /// Returns the line index that changed, for re-highlighting.
    pub fn delete_backward(&mut self) -> Option<usize> {
        let (line_idx, byte_pos) = self.cursor();
        if byte_pos > 0 {
            let line = &mut self.lines[line_idx];
            let before = &line.text()[..byte_pos];
            let ch = before.chars().last()?;
            let new_pos = byte_pos - ch.len_utf8();
            line.delete_range(new_pos, byte_pos);
            self.modified = true;
            self.set_cursor(line_idx, new_pos);
            Some(line_idx)
        } else if line_idx > 0 {
            let removed = self.lines.remove(line_idx);
            let prev_len = self.lines[line_idx - 1].len();
            self.lines[line_idx - 1].append(removed);
            self.modified = true;
            self.set_cursor(line_idx - 1, prev_len);
            Some(line_idx - 1)
        } else {
            None
        }
    }

    /// Delete the character under the caret; joins with the next line at
    /// end of line. Returns the changed line index.
    pub fn delete_forward(&mut self) -> Option<usize> {
        let (line_idx, byte_pos) = self.cursor();
        let line_len = self.lines[line_idx].len();
        if byte_pos < line_len {
            let ch = self.lines[line_idx].text()[byte_pos..].chars().next()?;
            self.lines[line_idx].delete_range(byte_pos, byte_pos + ch.len_utf8());
            self.modified = true;
            Some(line_idx)
        } else if line_idx + 1 < self.lines.len() {
            let next = self.lines.remove(line_idx + 1);
            self.lines[line_idx].append(next);
            self.modified = true;
            Some(line_idx)
        } else {
            None
        }
    }

    /// Replace the whole contents with a single empty line
    pub fn clear(&mut self) {
        self.lines = vec![Line::new()];
        self.modified = true;
        self.sel_start = 0;
        self.sel_len = 0;
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightHost for Buffer {
    fn text(&self) -> String {
        let mut out = String::with_capacity(self.text_len());
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(line.text());
        }
        out
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<(String, usize)> {
        let start = self.line_start(index)?;
        Some((self.lines[index].text().to_string(), start))
    }

    fn selection(&self) -> (usize, usize) {
        (self.sel_start, self.sel_len)
    }

    fn set_selection(&mut self, start: usize, len: usize) {
        let total = self.text_len();
        self.sel_start = start.min(total);
        self.sel_len = len.min(total - self.sel_start);
    }

    fn set_color(&mut self, start: usize, len: usize, color: Rgb) {
        if len == 0 {
            return;
        }
        let end = start + len;
        let mut line_start = 0;
        for line in &mut self.lines {
            let line_end = line_start + line.len();
            if line_start >= end {
                break;
            }
            if line_end > start {
                let local_start = start.saturating_sub(line_start);
                let local_end = end.min(line_end) - line_start;
                line.paint(local_start, local_end, color);
            }
            line_start = line_end + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(text: &str) -> Buffer {
        let mut buf = Buffer::new();
        buf.lines = text.split('\n').map(Line::from).collect();
        buf
    }

    #[test]
    fn test_offsets() {
        let buf = buffer_with("ab\ncde\n\nf");
        assert_eq!(buf.text_len(), 9);
        assert_eq!(buf.line_start(0), Some(0));
        assert_eq!(buf.line_start(1), Some(3));
        assert_eq!(buf.line_start(2), Some(7));
        assert_eq!(buf.line_start(3), Some(8));
        assert_eq!(buf.line_start(4), None);

        assert_eq!(buf.position_of(0), (0, 0));
        assert_eq!(buf.position_of(2), (0, 2));
        assert_eq!(buf.position_of(3), (1, 0));
        assert_eq!(buf.position_of(7), (2, 0));
        assert_eq!(buf.position_of(100), (3, 1));

        assert_eq!(buf.offset_of(1, 2), 5);
        assert_eq!(buf.offset_of(1, 99), 6);
    }

    #[test]
    fn test_text_roundtrip() {
        let buf = buffer_with("ab\ncde");
        assert_eq!(buf.text(), "ab\ncde");
        assert_eq!(buf.line(1), Some(("cde".to_string(), 3)));
        assert_eq!(buf.line(2), None);
    }

    #[test]
    fn test_set_color_across_lines() {
        let mut buf = buffer_with("ab\ncde");
        let red = Rgb::new(255, 0, 0);
        // Covers "b", the newline, and "cd"
        buf.set_color(1, 4, red);

        assert_eq!(buf.get_line(0).unwrap().color_at(0), Rgb::default());
        assert_eq!(buf.get_line(0).unwrap().color_at(1), red);
        assert_eq!(buf.get_line(1).unwrap().color_at(0), red);
        assert_eq!(buf.get_line(1).unwrap().color_at(1), red);
        assert_eq!(buf.get_line(1).unwrap().color_at(2), Rgb::default());
    }

    #[test]
    fn test_edits_move_cursor() {
        let mut buf = Buffer::new();
        buf.insert_char('a');
        buf.insert_char('b');
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor(), (0, 2));
        assert!(buf.is_modified());

        buf.insert_newline();
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.cursor(), (1, 0));

        buf.insert_char('c');
        assert_eq!(buf.text(), "ab\nc");
    }

    #[test]
    fn test_delete_joins_lines() {
        let mut buf = buffer_with("ab\ncd");
        buf.set_cursor(1, 0);
        assert_eq!(buf.delete_backward(), Some(0));
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), (0, 2));

        let mut buf = buffer_with("ab\ncd");
        buf.set_cursor(0, 2);
        assert_eq!(buf.delete_forward(), Some(0));
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_delete_at_document_edges() {
        let mut buf = buffer_with("ab");
        buf.set_cursor(0, 0);
        assert_eq!(buf.delete_backward(), None);
        buf.set_cursor(0, 2);
        assert_eq!(buf.delete_forward(), None);
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_selection_clamped() {
        let mut buf = buffer_with("abc");
        buf.set_selection(100, 5);
        assert_eq!(buf.selection(), (3, 0));
        buf.set_selection(1, 100);
        assert_eq!(buf.selection(), (1, 2));
    }

    #[test]
    fn test_clear() {
        let mut buf = buffer_with("ab\ncd");
        buf.set_cursor(1, 1);
        buf.clear();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor(), (0, 0));
    }
}
