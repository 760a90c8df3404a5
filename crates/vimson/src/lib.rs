//! # vimson
//!
//! Writer for the literal format handed to the vim side of libclang-vim.
//!
//! The format looks like a dynamic-language literal built from three shapes:
//!
//! - record: `{'key':value,'key2':value2,}`, empty as `{}`
//! - sequence: `[elem,elem,]`, empty as `[]`
//! - string scalar: a vim string literal, see [`quote`]
//!
//! Integers are written bare. Every record entry and every sequence element is
//! followed by a comma, so the output of two identical builds is byte-identical
//! and the consumer can `eval()` it directly.
//!
//! ## Example
//!
//! ```
//! use vimson::{List, Record};
//!
//! let mut start = Record::new();
//! start.int("line", 1).int("column", 13);
//!
//! let mut extent = Record::new();
//! extent.record("start", &start);
//!
//! let mut all = List::new();
//! all.push_record(&extent);
//!
//! assert_eq!(all.to_string(), "[{'start':{'line':1,'column':13,},},]");
//! ```

mod quote;
mod value;

pub use quote::quote;
pub use value::{List, Record};

/// Serialized form of a lookup that found nothing.
pub const EMPTY_RECORD: &str = "{}";

/// Serialized form of an enumeration that matched nothing.
pub const EMPTY_LIST: &str = "[]";
