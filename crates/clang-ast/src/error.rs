//! Error types for clang-ast.

use thiserror::Error;

/// Errors raised while acquiring or parsing a translation unit.
#[derive(Debug, Error)]
pub enum AstError {
    /// The front-end library could not be loaded or initialized
    #[error("front-end unavailable: {0}")]
    FrontEndUnavailable(String),

    /// The index handle could not be created
    #[error("failed to create index")]
    IndexCreation,

    /// The front-end returned no translation unit
    #[error("failed to parse translation unit for '{0}'")]
    ParseFailed(String),

    /// A path or argument could not be handed to the front-end
    #[error("invalid argument for front-end: {0}")]
    InvalidArgument(String),
}
