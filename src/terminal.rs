//! Terminal abstraction using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::palette::Rgb;

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Terminal wrapper for cross-platform terminal I/O
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance and enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { cols, rows })
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Get terminal height
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Set the foreground color
    pub fn set_foreground(&mut self, color: Rgb) -> Result<()> {
        queue!(io::stdout(), SetForegroundColor(color.into()))?;
        Ok(())
    }

    /// Set the background color
    pub fn set_background(&mut self, color: Rgb) -> Result<()> {
        queue!(io::stdout(), SetBackgroundColor(color.into()))?;
        Ok(())
    }

    /// Reset colors to the terminal defaults
    pub fn reset_colors(&mut self) -> Result<()> {
        queue!(io::stdout(), ResetColor)?;
        Ok(())
    }

    /// Set cursor visibility
    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(io::stdout(), cursor::Show)?;
        } else {
            queue!(io::stdout(), cursor::Hide)?;
        }
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    /// Read a key event (blocking), tracking resizes
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(key_event),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                }
                _ => {
                    // Ignore other events (mouse, focus, etc.)
                }
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = execute!(io::stdout(), ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
