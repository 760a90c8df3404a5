use std::path::PathBuf;

use clang_ast::AstError;
use compile_db::CompileDbError;
use thiserror::Error;

use crate::location::LocationError;

/// Why a query produced nothing. Never crosses the C boundary; the query
/// layer turns it into `{}` or `[]`.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Ast(#[from] AstError),

    #[error(transparent)]
    CompileDb(#[from] CompileDbError),

    #[error("failed to read unsaved buffer {path}: {source}")]
    UnsavedBuffer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
