//! Error types for compile-db.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileDbError {
    /// No `compile_commands.json` in the start directory or any parent
    #[error("no compilation database found above {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed compilation database {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An entry has neither `command` nor `arguments`
    #[error("entry for {0} has no command")]
    MissingCommand(String),

    #[error("unterminated quote in command: {0}")]
    UnterminatedQuote(String),
}
