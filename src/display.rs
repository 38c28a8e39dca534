//! Display rendering
//!
//! Draws the tab strip, line-number gutter, highlighted text, and the
//! status/message line, all colored from the active palette.

use unicode_width::UnicodeWidthChar;

use crate::config::Config;
use crate::editor::Prompt;
use crate::error::Result;
use crate::palette::Palette;
use crate::tabs::ScriptTab;
use crate::terminal::Terminal;

/// Display state
pub struct Display {
    /// Message shown in the status line until replaced
    message: Option<String>,
}

impl Display {
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Set the status line message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the status line message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Number of text rows between the tab strip and the status line
    pub fn text_rows(term: &Terminal) -> usize {
        term.rows().saturating_sub(2) as usize
    }

    /// Redraw the whole screen
    pub fn render(
        &mut self,
        term: &mut Terminal,
        tabs: &[ScriptTab],
        current: usize,
        palette: &Palette,
        config: &Config,
        prompt: Option<&Prompt>,
    ) -> Result<()> {
        let cols = term.cols() as usize;
        let text_rows = Self::text_rows(term);

        term.set_cursor_visible(false)?;
        self.render_tab_strip(term, tabs, current, palette, cols)?;

        let tab = &tabs[current];
        let gutter = if config.show_line_numbers {
            gutter_width(tab.buffer.line_count())
        } else {
            0
        };

        for row in 0..text_rows {
            let line_idx = tab.top_line + row;
            term.move_cursor(row as u16 + 1, 0)?;

            if gutter > 0 {
                term.set_background(palette.background_medium)?;
                term.set_foreground(palette.text_secondary)?;
                if line_idx < tab.buffer.line_count() {
                    term.write_str(&format!("{:>width$} ", line_idx + 1, width = gutter - 1))?;
                } else {
                    term.write_str(&" ".repeat(gutter))?;
                }
            }

            term.set_background(palette.background_dark)?;
            if line_idx < tab.buffer.line_count() {
                self.render_line(term, tab, line_idx, cols.saturating_sub(gutter))?;
            }
            term.clear_to_eol()?;
        }

        self.render_status(term, tab, palette, prompt, cols)?;

        // Park the terminal cursor on the caret
        let (cursor_line, cursor_byte) = tab.buffer.cursor();
        if prompt.is_none() && cursor_line >= tab.top_line && cursor_line < tab.top_line + text_rows
        {
            let row = (cursor_line - tab.top_line + 1) as u16;
            let col = gutter + display_col(tab, cursor_line, cursor_byte);
            if col < cols {
                term.move_cursor(row, col as u16)?;
                term.set_cursor_visible(true)?;
            }
        }

        term.flush()?;
        Ok(())
    }

    fn render_tab_strip(
        &mut self,
        term: &mut Terminal,
        tabs: &[ScriptTab],
        current: usize,
        palette: &Palette,
        cols: usize,
    ) -> Result<()> {
        term.move_cursor(0, 0)?;
        term.set_background(palette.background_medium)?;
        term.clear_to_eol()?;

        let mut used = 0;
        for (idx, tab) in tabs.iter().enumerate() {
            let label = format!(" {} ", tab.display_title());
            if used + label.len() >= cols {
                break;
            }
            if idx == current {
                term.set_background(palette.tab_active)?;
                term.set_foreground(palette.text)?;
            } else {
                term.set_background(palette.tab_inactive)?;
                term.set_foreground(palette.text_secondary)?;
            }
            term.write_str(&label)?;
            used += label.len();

            term.set_background(palette.background_medium)?;
            term.write_str(" ")?;
            used += 1;
        }
        Ok(())
    }

    fn render_line(
        &mut self,
        term: &mut Terminal,
        tab: &ScriptTab,
        line_idx: usize,
        width: usize,
    ) -> Result<()> {
        let Some(line) = tab.buffer.get_line(line_idx) else {
            return Ok(());
        };

        let mut current_color = None;
        let mut used = 0;
        for (byte_idx, ch) in line.text().char_indices() {
            let ch_width = ch.width().unwrap_or(1);
            if used + ch_width > width {
                break;
            }
            let color = line.color_at(byte_idx);
            if current_color != Some(color) {
                term.set_foreground(color)?;
                current_color = Some(color);
            }
            term.write_str(&ch.to_string())?;
            used += ch_width;
        }
        Ok(())
    }

    fn render_status(
        &mut self,
        term: &mut Terminal,
        tab: &ScriptTab,
        palette: &Palette,
        prompt: Option<&Prompt>,
        cols: usize,
    ) -> Result<()> {
        let row = term.rows().saturating_sub(1);
        term.move_cursor(row, 0)?;
        term.set_background(palette.background_light)?;
        term.clear_to_eol()?;

        if let Some(prompt) = prompt {
            term.set_foreground(palette.accent)?;
            term.write_str(&truncate(&format!("{}{}", prompt.label, prompt.input), cols))?;
            return Ok(());
        }

        let (line, byte) = tab.buffer.cursor();
        let mut left = format!(" {}  Ln {}, Col {}", tab.display_title(), line + 1, byte + 1);
        if let Some(msg) = &self.message {
            left.push_str("  ");
            left.push_str(msg);
            term.set_foreground(palette.accent)?;
        } else {
            term.set_foreground(palette.text)?;
        }
        term.write_str(&truncate(&left, cols))?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Gutter width for a line count: digits plus a trailing space
fn gutter_width(line_count: usize) -> usize {
    let digits = line_count.max(1).to_string().len();
    digits.max(3) + 1
}

/// Display column of a byte position within a line
fn display_col(tab: &ScriptTab, line_idx: usize, byte_pos: usize) -> usize {
    tab.buffer
        .get_line(line_idx)
        .map(|line| {
            line.text()[..byte_pos.min(line.len())]
                .chars()
                .map(|ch| ch.width().unwrap_or(1))
                .sum()
        })
        .unwrap_or(0)
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}
