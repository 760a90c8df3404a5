//! # compile-db
//!
//! Compiler flags for a source file, taken from a `compile_commands.json`
//! compilation database.
//!
//! ```no_run
//! use compile_db::CompilationDatabase;
//! use std::path::Path;
//!
//! let file = Path::new("/work/src/main.cpp");
//! let db = CompilationDatabase::for_file(file)?;
//! if let Some(command) = db.get(file) {
//!     println!("{}", command.compiler_flags_line());
//! }
//! # Ok::<(), compile_db::CompileDbError>(())
//! ```

mod database;
mod error;
mod shell;

pub use database::{CompilationDatabase, CompileCommand, DATABASE_FILE};
pub use error::CompileDbError;
pub use shell::join;
