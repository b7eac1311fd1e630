use thiserror::Error;

pub mod commands;
pub mod dictionary;

// Re-export for convenience
pub use commands::{convert_new_commands, settings_from_lines};
pub use dictionary::{combine_dictionaries, combine_lines};

#[derive(Error, Debug)]
pub enum LtexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no braced command name on line {line}: {text:?}")]
    NoCommandName { line: usize, text: String },
}
