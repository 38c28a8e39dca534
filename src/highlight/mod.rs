//! Lua syntax highlighting
//!
//! The highlighter reads text from a host (the editor buffer), classifies
//! it with a priority-ordered rule scanner, and writes foreground colors
//! back through the host's `set_color`. It never mutates text.

mod highlighter;
mod host;
mod rules;

pub use highlighter::LuaHighlighter;
pub use host::HighlightHost;
pub use rules::{Span, TokenClass, BUILTINS, KEYWORDS};
