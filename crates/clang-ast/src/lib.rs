//! # clang-ast
//!
//! A small, owned view of a C/C++ translation unit for editor queries.
//!
//! ## Overview
//!
//! - [`FrontEnd`] creates an index, parses one file and hands back a unit.
//! - [`Ast`] is read access to that unit: cursors, types, diagnostics and
//!   code completion.
//! - [`navigation`] walks cursors up through semantic parents and down
//!   through children.
//! - [`deduction`] finds the concrete type behind `auto`.
//!
//! Two front-ends ship with the crate. `Clang` (feature `libclang`, on by
//! default) loads libclang at runtime. [`MemoryFrontEnd`] answers parses
//! from units assembled with [`MemoryAst::builder`] and counts the handles it
//! gives out.
//!
//! ## Example
//!
//! ```
//! use clang_ast::{Ast, CursorKind, MemoryAst};
//!
//! let mut b = MemoryAst::builder("main.cpp");
//! let root = b.root();
//! b.node(root, CursorKind::FunctionDecl, "main")
//!     .span((1, 1, 0), (1, 14, 13));
//! let ast = b.build();
//!
//! let cursor = ast.cursor_at(1, 6);
//! assert_eq!(ast.kind(cursor), CursorKind::FunctionDecl);
//! assert_eq!(ast.spelling(cursor), "main");
//! ```

mod ast;
pub mod deduction;
mod error;
mod kind;
#[cfg(feature = "libclang")]
mod libclang;
mod memory;
pub mod navigation;
mod source;

pub use ast::{Ast, ChildVisit, FrontEnd, ParseOptions, ParseRequest, UnsavedFile};
pub use error::AstError;
pub use kind::{CursorCategory, CursorKind, TypeKind};
#[cfg(feature = "libclang")]
pub use libclang::{Clang, ClangUnit};
pub use memory::{
    HandleCounters, MemoryAst, MemoryAstBuilder, MemoryCursor, MemoryFrontEnd, MemoryType,
    NodeId, NodeMut, TypeId, TypeMut,
};
pub use source::{CompletionCandidate, Diagnostic, Extent, FixIt, Severity, SourceLocation};
