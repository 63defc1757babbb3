//! Error types shared across the panel

use thiserror::Error;

/// Errors that can occur while running the panel
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Failed to parse message: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Message is not a JSON object")]
    NotAnObject,

    #[error("WebSocket error: {0}")]
    Socket(#[from] tungstenite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Control identifier is empty")]
    EmptyControlId,

    #[error("Control '{0}' is declared more than once")]
    DuplicateControl(String),
}
