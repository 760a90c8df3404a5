//! Source-code intelligence for C and C++ buffers, answered in a format vim
//! evaluates directly.
//!
//! Every query takes a location string such as
//! `src/main.cpp#/tmp/buf.cpp:-std=c++17:12:5`, parses the file with
//! libclang, and returns a vimson literal. Unresolvable input is answered
//! with `{}` or `[]`, never with an error.
//!
//! ```
//! use clang_vim::{FileRequest, LocationRequest};
//!
//! let request: LocationRequest = "a.cpp#/tmp/x.cpp:-Wall:3:7".parse().unwrap();
//! assert_eq!((request.line, request.column), (3, 7));
//! assert_eq!(request.target.args, vec!["-Wall".to_string()]);
//!
//! let file: FileRequest = "a.cpp:".parse().unwrap();
//! assert!(file.unsaved.is_none());
//! ```

pub mod config;
mod error;
#[cfg(feature = "libclang")]
pub mod ffi;
mod location;
pub mod logging;
mod session;
mod stringize;
pub mod usecase;

pub use config::{CommentStyle, Config, UserConfig};
pub use error::QueryError;
pub use location::{FileRequest, LocationError, LocationRequest};
pub use usecase::{ExtentKind, Jump, Queries};
