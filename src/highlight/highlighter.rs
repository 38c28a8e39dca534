//! The incremental Lua highlighter
//!
//! Two entry points: a full-buffer pass for file loads, tab switches, and
//! theme changes, and a line-scoped pass cheap enough to run on every
//! keystroke. Both are guarded by a re-entrancy flag: coloring a range
//! may synchronously raise a change notification in some hosts, and a
//! nested invocation must be a no-op rather than a recursion.

use crate::palette::{Palette, Rgb};

use super::host::HighlightHost;
use super::rules::{self, Rule, TokenClass};

/// Regex-driven syntax highlighter for Lua source
pub struct LuaHighlighter {
    palette: Palette,
    full_rules: Vec<Rule>,
    line_rules: Vec<Rule>,
    /// True while a pass is issuing color commands
    highlighting: bool,
}

impl LuaHighlighter {
    /// Create a highlighter using the given palette
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            full_rules: rules::full_rules(),
            line_rules: rules::line_rules(),
            highlighting: false,
        }
    }

    /// The active palette
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the palette
    ///
    /// Does not re-highlight; callers run `highlight_all` afterward so
    /// every line picks up the new colors at once.
    pub fn update_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Re-classify and re-color the entire document
    pub fn highlight_all(&mut self, host: &mut impl HighlightHost) {
        if self.highlighting {
            return;
        }
        self.highlighting = true;

        let (sel_start, sel_len) = host.selection();
        let text = host.text();

        // Baseline: everything in the default text color, so stale
        // colors never survive a pass
        host.set_color(0, text.len(), self.palette.text);

        for span in rules::scan(&self.full_rules, &text) {
            host.set_color(span.start, span.end - span.start, self.color_for(span.class));
        }

        host.set_selection(sel_start, sel_len);
        self.highlighting = false;
    }

    /// Re-classify and re-color a single line
    ///
    /// An out-of-range index is a silent no-op, tolerant of stale
    /// indices from in-flight UI recalculation.
    pub fn highlight_line(&mut self, host: &mut impl HighlightHost, index: usize) {
        if self.highlighting {
            return;
        }
        let Some((line, line_start)) = host.line(index) else {
            return;
        };
        self.highlighting = true;

        let (sel_start, sel_len) = host.selection();

        host.set_color(line_start, line.len(), self.palette.text);

        for span in rules::scan(&self.line_rules, &line) {
            host.set_color(
                line_start + span.start,
                span.end - span.start,
                self.color_for(span.class),
            );
        }

        host.set_selection(sel_start, sel_len);
        self.highlighting = false;
    }

    /// Palette color for a token class
    fn color_for(&self, class: TokenClass) -> Rgb {
        match class {
            TokenClass::Keyword => self.palette.syntax_keyword,
            TokenClass::Builtin => self.palette.syntax_function,
            TokenClass::String => self.palette.syntax_string,
            TokenClass::Comment => self.palette.syntax_comment,
            TokenClass::Number => self.palette.syntax_number,
            TokenClass::Operator => self.palette.syntax_operator,
            TokenClass::Default => self.palette.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sentinel no palette uses, so "never colored" is detectable
    const UNSET: Rgb = Rgb::new(1, 2, 3);

    /// A test host over plain lines
    ///
    /// Models the awkward kind of host the selection protocol exists
    /// for: `set_color` moves the selection onto the colored range, the
    /// way select-then-color rich-text widgets do.
    struct TestHost {
        lines: Vec<String>,
        colors: Vec<Rgb>,
        selection: (usize, usize),
    }

    impl TestHost {
        fn new(text: &str) -> Self {
            let len = text.len();
            Self {
                lines: text.split('\n').map(str::to_string).collect(),
                colors: vec![UNSET; len],
                selection: (0, 0),
            }
        }

        fn color_at(&self, offset: usize) -> Rgb {
            self.colors[offset]
        }

        fn colors_in(&self, start: usize, end: usize) -> &[Rgb] {
            &self.colors[start..end]
        }
    }

    impl HighlightHost for TestHost {
        fn text(&self) -> String {
            self.lines.join("\n")
        }

        fn line_count(&self) -> usize {
            self.lines.len()
        }

        fn line(&self, index: usize) -> Option<(String, usize)> {
            if index >= self.lines.len() {
                return None;
            }
            let start = self.lines[..index].iter().map(|l| l.len() + 1).sum();
            Some((self.lines[index].clone(), start))
        }

        fn selection(&self) -> (usize, usize) {
            self.selection
        }

        fn set_selection(&mut self, start: usize, len: usize) {
            self.selection = (start, len);
        }

        fn set_color(&mut self, start: usize, len: usize, color: Rgb) {
            let end = (start + len).min(self.colors.len());
            for c in &mut self.colors[start..end] {
                *c = color;
            }
            self.selection = (start, len);
        }
    }

    fn dark() -> Palette {
        Palette::default_dark()
    }

    #[test]
    fn test_idempotence() {
        let mut hl = LuaHighlighter::new(dark());
        let mut host = TestHost::new("local x = \"end\" -- note\nreturn 0x1F");
        hl.highlight_all(&mut host);
        let first = host.colors.clone();
        hl.highlight_all(&mut host);
        assert_eq!(host.colors, first);
    }

    #[test]
    fn test_full_coverage() {
        let mut hl = LuaHighlighter::new(dark());
        let mut host = TestHost::new("if x then\n  y = 1\nend");
        hl.highlight_all(&mut host);
        assert!(host.colors.iter().all(|c| *c != UNSET));
    }

    #[test]
    fn test_string_wins_over_keyword() {
        // local x = "end"
        // 0123456789012345
        let mut hl = LuaHighlighter::new(dark());
        let mut host = TestHost::new("local x = \"end\"");
        hl.highlight_all(&mut host);

        let p = dark();
        for offset in 0..5 {
            assert_eq!(host.color_at(offset), p.syntax_keyword);
        }
        // `x` is plain text
        assert_eq!(host.color_at(6), p.text);
        // the quotes and the quoted `end` are all string-colored
        for offset in 10..15 {
            assert_eq!(host.color_at(offset), p.syntax_string);
        }
    }

    #[test]
    fn test_word_boundary_not_keyword() {
        // Blue Purple gives every syntax class a distinct color
        let p = Palette::blue_purple();
        let mut hl = LuaHighlighter::new(p);
        let mut host = TestHost::new("endless = 1");
        hl.highlight_all(&mut host);

        assert!(host.colors_in(0, 7).iter().all(|c| *c == p.text));
        assert_eq!(host.color_at(8), p.syntax_operator);
        assert_eq!(host.color_at(10), p.syntax_number);
    }

    #[test]
    fn test_selection_preserved() {
        let mut hl = LuaHighlighter::new(dark());
        let mut host = TestHost::new("local x = 42");
        host.set_selection(5, 3);
        hl.highlight_all(&mut host);
        assert_eq!(host.selection(), (5, 3));

        hl.highlight_line(&mut host, 0);
        assert_eq!(host.selection(), (5, 3));
    }

    #[test]
    fn test_line_pass_matches_full_pass() {
        let text = "local x = 42 + y\nprint(\"hi\")";
        let mut hl = LuaHighlighter::new(dark());

        let mut full = TestHost::new(text);
        hl.highlight_all(&mut full);

        let mut by_line = TestHost::new(text);
        hl.highlight_line(&mut by_line, 0);
        hl.highlight_line(&mut by_line, 1);

        let (line0, start0) = full.line(0).unwrap();
        assert_eq!(
            full.colors_in(start0, start0 + line0.len()),
            by_line.colors_in(start0, start0 + line0.len())
        );
        let (line1, start1) = full.line(1).unwrap();
        assert_eq!(
            full.colors_in(start1, start1 + line1.len()),
            by_line.colors_in(start1, start1 + line1.len())
        );
    }

    #[test]
    fn test_palette_swap_propagates() {
        let mut hl = LuaHighlighter::new(dark());
        let mut host = TestHost::new("local x = 1");
        hl.highlight_all(&mut host);
        assert_eq!(host.color_at(0), dark().syntax_keyword);

        let p2 = Palette::blue_purple();
        hl.update_palette(p2);
        // update_palette alone must not touch the host
        assert_eq!(host.color_at(0), dark().syntax_keyword);

        hl.highlight_all(&mut host);
        for offset in 0..5 {
            assert_eq!(host.color_at(offset), p2.syntax_keyword);
        }
        assert_eq!(host.color_at(6), p2.text);
    }

    #[test]
    fn test_out_of_range_line_is_noop() {
        let mut hl = LuaHighlighter::new(dark());
        let mut host = TestHost::new("x = 1\ny = 2");
        assert_eq!(host.line_count(), 2);

        hl.highlight_line(&mut host, 2);
        hl.highlight_line(&mut host, usize::MAX);
        assert!(host.colors.iter().all(|c| *c == UNSET));
    }

    #[test]
    fn test_hex_number_single_span() {
        let p = Palette::blue_purple();
        let mut hl = LuaHighlighter::new(p);
        let mut host = TestHost::new("n = 0x1F");
        hl.highlight_all(&mut host);

        for offset in 4..8 {
            assert_eq!(host.color_at(offset), p.syntax_number);
        }
    }

    #[test]
    fn test_line_pass_offsets_shifted() {
        let mut hl = LuaHighlighter::new(dark());
        let mut host = TestHost::new("first\nlocal x");
        hl.highlight_line(&mut host, 1);

        let p = dark();
        // line 0 untouched
        assert!(host.colors_in(0, 5).iter().all(|c| *c == UNSET));
        // "local" at absolute offset 6
        for offset in 6..11 {
            assert_eq!(host.color_at(offset), p.syntax_keyword);
        }
    }

    #[test]
    fn test_multiline_comment_full_pass_only() {
        let text = "--[[\nend\n]]";
        let mut hl = LuaHighlighter::new(dark());
        let mut host = TestHost::new(text);
        hl.highlight_all(&mut host);

        let p = dark();
        // every byte including the inner `end` is comment-colored
        for offset in 0..text.len() {
            if text.as_bytes()[offset] != b'\n' {
                assert_eq!(host.color_at(offset), p.syntax_comment);
            }
        }
    }

    #[test]
    fn test_update_palette_getter() {
        let mut hl = LuaHighlighter::new(dark());
        assert_eq!(hl.palette().name, "Default Dark");
        hl.update_palette(Palette::ocean_blue());
        assert_eq!(hl.palette().name, "Ocean Blue");
    }
}
