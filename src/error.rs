//! Error types for luapad

use thiserror::Error;

/// Result type alias for luapad operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {0}")]
    FileNotFound(String),
}
