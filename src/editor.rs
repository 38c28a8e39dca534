//! Editor state and main loop

use std::path::{Path, PathBuf};

use crate::buffer::Buffer;
use crate::config::Config;
use crate::display::Display;
use crate::error::{EditorError, Result};
use crate::highlight::LuaHighlighter;
use crate::input::{self, EditorKey};
use crate::palette::{all_palettes, palette_by_name, Palette};
use crate::tabs::TabStrip;
use crate::terminal::Terminal;

/// What happens when a minibuffer prompt is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptAction {
    OpenFile,
    SaveAs,
}

/// An active minibuffer prompt
#[derive(Debug)]
pub struct Prompt {
    /// Prompt label shown before the input ("Open file: ")
    pub label: String,
    /// Text typed so far
    pub input: String,
    action: PromptAction,
}

/// Main editor state
pub struct EditorState {
    pub tabs: TabStrip,
    pub terminal: Terminal,
    pub display: Display,
    pub config: Config,
    pub highlighter: LuaHighlighter,
    prompt: Option<Prompt>,
    running: bool,
    /// Set after a quit attempt with unsaved changes; a second attempt
    /// quits anyway
    quit_pending: bool,
}

impl EditorState {
    /// Create the editor with one fresh tab
    pub fn new(terminal: Terminal, config: Config) -> Self {
        let palette = palette_by_name(&config.theme).unwrap_or_else(Palette::default_dark);
        let mut editor = Self {
            tabs: TabStrip::new(),
            terminal,
            display: Display::new(),
            config,
            highlighter: LuaHighlighter::new(palette),
            prompt: None,
            running: true,
            quit_pending: false,
        };
        editor.rehighlight_all();
        editor
    }

    /// Open a file, reusing the active tab if it is still untouched
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let buffer = Buffer::from_file(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EditorError::FileNotFound(path.display().to_string())
            } else {
                EditorError::Io(e)
            }
        })?;
        let title = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let reuse = {
            let tab = self.tabs.current();
            !tab.buffer.is_modified() && tab.buffer.line_count() == 1 && tab.buffer.text_len() == 0
        };
        let tab = if reuse {
            self.tabs.current_mut()
        } else {
            self.tabs.add()
        };
        tab.buffer = buffer;
        tab.title = title;
        tab.top_line = 0;

        self.rehighlight_all();
        Ok(())
    }

    /// Point the active tab at a file that does not exist yet; Ctrl-S
    /// will create it
    pub fn adopt_new_file(&mut self, path: &Path) {
        let title = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let tab = self.tabs.current_mut();
        tab.buffer.set_filename(path.to_path_buf());
        tab.title = title;
        self.display.set_message(format!("New file: {}", path.display()));
    }

    /// Run the editor until quit
    pub fn run(&mut self) -> Result<()> {
        while self.running {
            self.ensure_cursor_visible();
            self.display.render(
                &mut self.terminal,
                self.tabs.tabs(),
                self.tabs.current_index(),
                self.highlighter.palette(),
                &self.config,
                self.prompt.as_ref(),
            )?;

            let event = self.terminal.read_key()?;
            if let Some(key) = input::translate(event) {
                self.handle_key(key)?;
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: EditorKey) -> Result<()> {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return Ok(());
        }

        if !matches!(key, EditorKey::Ctrl('q')) {
            self.quit_pending = false;
        }

        match key {
            EditorKey::Ctrl('q') => self.quit(),
            EditorKey::Ctrl('n') => {
                self.tabs.add();
                self.rehighlight_all();
            }
            EditorKey::Ctrl('w') => {
                self.tabs.close_current();
                self.rehighlight_all();
            }
            EditorKey::Ctrl('t') => {
                self.tabs.next();
                self.rehighlight_all();
            }
            EditorKey::Ctrl('o') => self.start_prompt("Open file: ", PromptAction::OpenFile),
            EditorKey::Ctrl('s') => self.save_current(),
            EditorKey::Ctrl('l') => {
                self.tabs.current_mut().buffer.clear();
                self.rehighlight_all();
            }
            EditorKey::Function(5) => self
                .display
                .set_message("Execute: no script runtime is wired up in this build"),
            EditorKey::Function(6) => self
                .display
                .set_message("Attach: process attachment is not available in this build"),
            EditorKey::Function(7) => self
                .display
                .set_message("Kill: there is no running script to terminate"),
            EditorKey::Function(8) => self.cycle_theme(),

            EditorKey::Char(ch) => self.insert_char(ch),
            EditorKey::Tab => {
                for _ in 0..self.config.tab_width {
                    self.tabs.current_mut().buffer.insert_char(' ');
                }
                self.rehighlight_cursor_line();
            }
            EditorKey::Enter => {
                self.tabs.current_mut().buffer.insert_newline();
                let (line, _) = self.tabs.current().buffer.cursor();
                // Both halves of the split changed
                self.rehighlight_line(line.saturating_sub(1));
                self.rehighlight_line(line);
            }
            EditorKey::Backspace => {
                if let Some(line) = self.tabs.current_mut().buffer.delete_backward() {
                    self.rehighlight_line(line);
                }
            }
            EditorKey::Delete => {
                if let Some(line) = self.tabs.current_mut().buffer.delete_forward() {
                    self.rehighlight_line(line);
                }
            }

            EditorKey::Up => self.move_vertical(-1),
            EditorKey::Down => self.move_vertical(1),
            EditorKey::PageUp => self.move_vertical(-(Display::text_rows(&self.terminal) as isize)),
            EditorKey::PageDown => self.move_vertical(Display::text_rows(&self.terminal) as isize),
            EditorKey::Left => self.move_horizontal(-1),
            EditorKey::Right => self.move_horizontal(1),
            EditorKey::Home => {
                let (line, _) = self.tabs.current().buffer.cursor();
                self.tabs.current_mut().buffer.set_cursor(line, 0);
            }
            EditorKey::End => {
                let (line, _) = self.tabs.current().buffer.cursor();
                let len = self
                    .tabs
                    .current()
                    .buffer
                    .get_line(line)
                    .map(|l| l.len())
                    .unwrap_or(0);
                self.tabs.current_mut().buffer.set_cursor(line, len);
            }
            EditorKey::Escape => self.display.clear_message(),
            EditorKey::Ctrl(_) | EditorKey::Function(_) => {}
        }
        Ok(())
    }

    fn handle_prompt_key(&mut self, key: EditorKey) {
        match key {
            EditorKey::Char(ch) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.input.push(ch);
                }
            }
            EditorKey::Backspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.input.pop();
                }
            }
            EditorKey::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.finish_prompt(prompt);
                }
            }
            EditorKey::Escape | EditorKey::Ctrl('g') => {
                self.prompt = None;
                self.display.set_message("Aborted");
            }
            _ => {}
        }
    }

    fn start_prompt(&mut self, label: &str, action: PromptAction) {
        self.prompt = Some(Prompt {
            label: label.to_string(),
            input: String::new(),
            action,
        });
    }

    fn finish_prompt(&mut self, prompt: Prompt) {
        if prompt.input.is_empty() {
            self.display.set_message("Aborted");
            return;
        }
        let path = PathBuf::from(prompt.input);
        match prompt.action {
            PromptAction::OpenFile => {
                if let Err(e) = self.open_file(&path) {
                    self.display.set_message(format!("Error opening file: {}", e));
                }
            }
            PromptAction::SaveAs => self.save_current_to(&path),
        }
    }

    fn save_current(&mut self) {
        if self.tabs.current().buffer.filename().is_some() {
            let result = self.tabs.current_mut().buffer.save();
            match result {
                Ok(()) => self.display.set_message("Saved"),
                Err(e) => self.display.set_message(format!("Error saving file: {}", e)),
            }
        } else {
            self.start_prompt("Save as: ", PromptAction::SaveAs);
        }
    }

    fn save_current_to(&mut self, path: &Path) {
        let result = self.tabs.current_mut().buffer.save_to(path);
        match result {
            Ok(()) => {
                let title = path
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.tabs.current_mut().title = title;
                self.display.set_message("Saved");
            }
            Err(e) => self.display.set_message(format!("Error saving file: {}", e)),
        }
    }

    fn insert_char(&mut self, ch: char) {
        self.tabs.current_mut().buffer.insert_char(ch);
        self.rehighlight_cursor_line();
    }

    /// Switch to the next palette, persist the choice, repaint everything
    fn cycle_theme(&mut self) {
        let palettes = all_palettes();
        let idx = palettes
            .iter()
            .position(|p| p.name == self.highlighter.palette().name)
            .unwrap_or(0);
        let next = palettes[(idx + 1) % palettes.len()];

        self.highlighter.update_palette(next);
        self.rehighlight_all();

        self.config.theme = next.name.to_string();
        let _ = self.config.save();
        self.display.set_message(format!("Theme: {}", next.name));
    }

    fn quit(&mut self) {
        let any_modified = self.tabs.tabs().iter().any(|t| t.buffer.is_modified());
        if any_modified && !self.quit_pending {
            self.quit_pending = true;
            self.display
                .set_message("Unsaved changes; press Ctrl-Q again to quit");
        } else {
            self.running = false;
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let buffer = &mut self.tabs.current_mut().buffer;
        let (line, byte) = buffer.cursor();
        let target = line.saturating_add_signed(delta).min(buffer.line_count() - 1);
        let max_byte = buffer.get_line(target).map(|l| l.len()).unwrap_or(0);
        buffer.set_cursor(target, byte.min(max_byte));
    }

    fn move_horizontal(&mut self, delta: isize) {
        let buffer = &mut self.tabs.current_mut().buffer;
        let (line, byte) = buffer.cursor();
        if delta < 0 {
            if byte > 0 {
                let prev = buffer.get_line(line).map(|l| {
                    l.text()[..byte]
                        .chars()
                        .last()
                        .map(|ch| byte - ch.len_utf8())
                        .unwrap_or(0)
                });
                buffer.set_cursor(line, prev.unwrap_or(0));
            } else if line > 0 {
                let len = buffer.get_line(line - 1).map(|l| l.len()).unwrap_or(0);
                buffer.set_cursor(line - 1, len);
            }
        } else {
            let len = buffer.get_line(line).map(|l| l.len()).unwrap_or(0);
            if byte < len {
                let next = buffer
                    .get_line(line)
                    .and_then(|l| l.text()[byte..].chars().next())
                    .map(|ch| byte + ch.len_utf8())
                    .unwrap_or(len);
                buffer.set_cursor(line, next);
            } else if line + 1 < buffer.line_count() {
                buffer.set_cursor(line + 1, 0);
            }
        }
    }

    fn ensure_cursor_visible(&mut self) {
        let rows = Display::text_rows(&self.terminal).max(1);
        let tab = self.tabs.current_mut();
        let (line, _) = tab.buffer.cursor();
        if line < tab.top_line {
            tab.top_line = line;
        } else if line >= tab.top_line + rows {
            tab.top_line = line + 1 - rows;
        }
    }

    fn rehighlight_cursor_line(&mut self) {
        let (line, _) = self.tabs.current().buffer.cursor();
        self.rehighlight_line(line);
    }

    fn rehighlight_line(&mut self, index: usize) {
        let tab = self.tabs.current_mut();
        self.highlighter.highlight_line(&mut tab.buffer, index);
    }

    fn rehighlight_all(&mut self) {
        let tab = self.tabs.current_mut();
        self.highlighter.highlight_all(&mut tab.buffer);
    }
}
