//! Input handling - crossterm key events to editor keys

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key the editor acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Char(char),
    Ctrl(char),
    Function(u8),
    Enter,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
}

/// Translate a crossterm key event; returns None for events the editor
/// ignores (key releases, bare modifiers, unbound combinations)
pub fn translate(event: KeyEvent) -> Option<EditorKey> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    match event.code {
        KeyCode::Char(ch) if ctrl => Some(EditorKey::Ctrl(ch.to_ascii_lowercase())),
        KeyCode::Char(ch) => Some(EditorKey::Char(ch)),
        KeyCode::F(n) => Some(EditorKey::Function(n)),
        KeyCode::Enter => Some(EditorKey::Enter),
        KeyCode::Tab => Some(EditorKey::Tab),
        KeyCode::Backspace => Some(EditorKey::Backspace),
        KeyCode::Delete => Some(EditorKey::Delete),
        KeyCode::Up => Some(EditorKey::Up),
        KeyCode::Down => Some(EditorKey::Down),
        KeyCode::Left => Some(EditorKey::Left),
        KeyCode::Right => Some(EditorKey::Right),
        KeyCode::Home => Some(EditorKey::Home),
        KeyCode::End => Some(EditorKey::End),
        KeyCode::PageUp => Some(EditorKey::PageUp),
        KeyCode::PageDown => Some(EditorKey::PageDown),
        KeyCode::Esc => Some(EditorKey::Escape),
        _ => None,
    }
}
