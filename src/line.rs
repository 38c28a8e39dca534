//! Line representation - text content plus per-byte foreground colors

use crate::palette::Rgb;

/// A single line of text in a buffer
///
/// Carries one foreground color per text byte, kept in lockstep with the
/// content by every mutation. Bytes of a multi-byte character share one
/// color; the renderer reads the color at the character's first byte.
#[derive(Debug, Clone)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
    /// Foreground color per byte, same length as `text`
    colors: Vec<Rgb>,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self {
            text: String::new(),
            colors: Vec::new(),
        }
    }

    /// Create a line from a string, all bytes in the default color
    pub fn from_string(s: String) -> Self {
        let colors = vec![Rgb::default(); s.len()];
        Self { text: s, colors }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the foreground color at a byte position
    pub fn color_at(&self, byte_pos: usize) -> Rgb {
        self.colors.get(byte_pos).copied().unwrap_or_default()
    }

    /// Paint a byte range with one color, clamped to the line length
    pub fn paint(&mut self, start: usize, end: usize, color: Rgb) {
        let end = end.min(self.colors.len());
        if start >= end {
            return;
        }
        for c in &mut self.colors[start..end] {
            *c = color;
        }
    }

    /// Insert a character at byte position
    pub fn insert_char(&mut self, byte_pos: usize, ch: char) {
        self.text.insert(byte_pos, ch);
        for _ in 0..ch.len_utf8() {
            self.colors.insert(byte_pos, Rgb::default());
        }
    }

    /// Delete a range of bytes and return the deleted text
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let deleted: String = self.text[start..end].to_string();
        self.text.replace_range(start..end, "");
        self.colors.drain(start..end);
        deleted
    }

    /// Split the line at byte position, returning the remainder
    pub fn split_off(&mut self, byte_pos: usize) -> Line {
        let text = self.text.split_off(byte_pos);
        let colors = self.colors.split_off(byte_pos);
        Line { text, colors }
    }

    /// Append another line's content to this line
    pub fn append(&mut self, other: Line) {
        self.text.push_str(&other.text);
        self.colors.extend(other.colors);
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_track_edits() {
        let mut line = Line::from("abc");
        assert_eq!(line.len(), 3);
        line.paint(0, 3, Rgb::new(1, 2, 3));
        assert_eq!(line.color_at(1), Rgb::new(1, 2, 3));

        line.insert_char(1, 'x');
        assert_eq!(line.text(), "axbc");
        assert_eq!(line.color_at(1), Rgb::default());
        assert_eq!(line.color_at(2), Rgb::new(1, 2, 3));

        line.delete_range(0, 2);
        assert_eq!(line.text(), "bc");
        assert_eq!(line.color_at(0), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_multibyte_insert() {
        let mut line = Line::from("ab");
        line.insert_char(1, 'é');
        assert_eq!(line.text(), "aéb");
        // Colors must stay byte-aligned with the text
        assert_eq!(line.len(), 4);
        line.paint(1, 3, Rgb::new(9, 9, 9));
        assert_eq!(line.color_at(1), Rgb::new(9, 9, 9));
        assert_eq!(line.color_at(3), Rgb::default());
    }

    #[test]
    fn test_split_and_append() {
        let mut line = Line::from("hello world");
        line.paint(0, 11, Rgb::new(5, 5, 5));
        let rest = line.split_off(5);
        assert_eq!(line.text(), "hello");
        assert_eq!(rest.text(), " world");
        assert_eq!(rest.color_at(0), Rgb::new(5, 5, 5));

        line.append(rest);
        assert_eq!(line.text(), "hello world");
        assert_eq!(line.len(), 11);
    }

    #[test]
    fn test_paint_clamps() {
        let mut line = Line::from("ab");
        line.paint(1, 100, Rgb::new(7, 7, 7));
        assert_eq!(line.color_at(0), Rgb::default());
        assert_eq!(line.color_at(1), Rgb::new(7, 7, 7));
        // Out-of-range start is a no-op
        line.paint(5, 9, Rgb::new(8, 8, 8));
        assert_eq!(line.color_at(1), Rgb::new(7, 7, 7));
    }

    #[test]
    fn test_empty() {
        let line = Line::new();
        assert!(line.is_empty());
        assert_eq!(line.len(), 0);
        assert_eq!(line.color_at(0), Rgb::default());
    }
}
