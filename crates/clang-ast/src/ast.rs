//! The seam between the query code and a compiler front-end.

use std::fmt::Debug;

use crate::error::AstError;
use crate::kind::{CursorKind, TypeKind};
use crate::source::{CompletionCandidate, Diagnostic, Extent, SourceLocation};

/// What a child visitor wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildVisit {
    /// Stop the whole visitation
    Break,
    /// Go on with the next sibling
    Continue,
    /// Descend into this cursor's children, then go on with siblings
    Recurse,
}

/// Editor-held buffer content parsed in place of the file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsavedFile {
    /// Logical filename the content is registered under
    pub filename: String,
    pub contents: String,
}

/// Flags controlling index creation and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep going past unresolved includes and errors
    pub incomplete: bool,
    /// Record inclusion directives and macros as cursors
    pub detailed_preprocessing_record: bool,
    pub exclude_pch_declarations: bool,
    pub display_diagnostics: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            incomplete: true,
            detailed_preprocessing_record: false,
            exclude_pch_declarations: true,
            display_diagnostics: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseRequest {
    /// The logical main file
    pub file: String,
    pub args: Vec<String>,
    pub unsaved: Option<UnsavedFile>,
    pub options: ParseOptions,
}

impl ParseRequest {
    pub fn new(file: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            file: file.into(),
            args,
            unsaved: None,
            options: ParseOptions::default(),
        }
    }
}

/// A compiler front-end able to produce parsed units.
pub trait FrontEnd {
    type Unit: Ast;

    /// Create an index and parse `request` into a unit owning both.
    ///
    /// Dropping the unit releases the translation unit, then the index. When
    /// parsing fails the index is released before the error is returned.
    fn parse(&self, request: &ParseRequest) -> Result<Self::Unit, AstError>;

    /// Human readable version string of the front-end.
    fn version(&self) -> String;
}

/// Read access to one parsed translation unit.
///
/// Cursors and types are handles that only mean something while the unit that
/// produced them is alive; every query goes through `&self`.
pub trait Ast {
    type Cursor: Copy + Debug;
    type Type: Copy + Debug;

    /// The file the unit was parsed for.
    fn main_file(&self) -> &str;

    /// Cursor at a 1-based position in the main file.
    fn cursor_at(&self, line: u32, column: u32) -> Self::Cursor;

    /// The root cursor of the unit.
    fn root(&self) -> Self::Cursor;

    fn null_cursor(&self) -> Self::Cursor;

    fn kind(&self, cursor: Self::Cursor) -> CursorKind;

    fn kind_spelling(&self, cursor: Self::Cursor) -> String {
        self.kind(cursor).spelling().into_owned()
    }

    fn spelling(&self, cursor: Self::Cursor) -> String;

    fn semantic_parent(&self, cursor: Self::Cursor) -> Self::Cursor;

    fn lexical_parent(&self, cursor: Self::Cursor) -> Self::Cursor;

    fn referenced(&self, cursor: Self::Cursor) -> Self::Cursor;

    fn definition(&self, cursor: Self::Cursor) -> Self::Cursor;

    /// The canonical (first) declaration of the entity.
    fn canonical_cursor(&self, cursor: Self::Cursor) -> Self::Cursor;

    /// The template a specialization or instantiation was made from.
    fn specialized_template(&self, cursor: Self::Cursor) -> Self::Cursor;

    fn location(&self, cursor: Self::Cursor) -> Option<SourceLocation>;

    fn extent(&self, cursor: Self::Cursor) -> Option<Extent>;

    fn is_definition(&self, cursor: Self::Cursor) -> bool;

    fn cursor_type(&self, cursor: Self::Cursor) -> Self::Type;

    /// Result type of a function-like cursor; invalid for anything else.
    fn result_type(&self, cursor: Self::Cursor) -> Self::Type;

    fn type_kind(&self, ty: Self::Type) -> TypeKind;

    fn type_kind_spelling(&self, ty: Self::Type) -> String {
        self.type_kind(ty).spelling().into_owned()
    }

    fn type_spelling(&self, ty: Self::Type) -> String;

    fn canonical_type(&self, ty: Self::Type) -> Self::Type;

    fn is_const_qualified(&self, ty: Self::Type) -> bool;

    /// Declaration of a named type; a null cursor for builtin types.
    fn type_declaration(&self, ty: Self::Type) -> Self::Cursor;

    fn brief_comment(&self, cursor: Self::Cursor) -> Option<String>;

    fn raw_comment(&self, cursor: Self::Cursor) -> Option<String>;

    /// Path of the file named by an inclusion directive.
    fn included_file(&self, cursor: Self::Cursor) -> Option<String>;

    /// Visit the direct children of `parent` in source order.
    ///
    /// Returns `true` when the visitor stopped the walk with
    /// [`ChildVisit::Break`].
    fn visit_children(
        &self,
        parent: Self::Cursor,
        visitor: &mut dyn FnMut(Self::Cursor) -> ChildVisit,
    ) -> bool;

    /// Snapshot of the unit's diagnostics.
    fn diagnostics(&self) -> Vec<Diagnostic>;

    /// Code completion at a 1-based position in the main file.
    fn complete_at(&self, line: u32, column: u32) -> Vec<CompletionCandidate>;

    fn is_null(&self, cursor: Self::Cursor) -> bool {
        self.kind(cursor).is_invalid()
    }
}
