//! Rendering of cursors, types, ranges, diagnostics and completion results
//! as vimson records.

use clang_ast::{Ast, CompletionCandidate, CursorKind, Diagnostic, Extent, FixIt, SourceLocation};
use vimson::{List, Record};

pub fn location(loc: &SourceLocation) -> Record {
    let mut record = Record::new();
    record
        .int("line", loc.line.into())
        .int("column", loc.column.into())
        .int("offset", loc.offset.into())
        .str("file", &loc.file);
    record
}

/// `'start':{…},'end':{…}` with nothing after `end`.
pub fn extent(extent: &Extent) -> Record {
    let mut record = Record::new();
    record
        .record("start", &location(&extent.start))
        .record("end", &location(&extent.end))
        .trim_trailing_separator();
    record
}

pub fn type_fields<A: Ast>(ast: &A, ty: A::Type) -> Record {
    let mut record = Record::new();
    record
        .str("type", &ast.type_spelling(ty))
        .str("type_kind", &ast.type_kind_spelling(ty));
    if ast.is_const_qualified(ty) {
        record.flag("is_const_qualified");
    }
    record
}

/// Type fields followed by `'canonical':{…}`.
pub fn type_with_canonical<A: Ast>(ast: &A, ty: A::Type) -> Record {
    let mut record = type_fields(ast, ty);
    record.record("canonical", &type_fields(ast, ast.canonical_type(ty)));
    record
}

fn cursor_brief<A: Ast>(ast: &A, cursor: A::Cursor) -> Record {
    let mut record = Record::new();
    record
        .str("spell", &ast.spelling(cursor))
        .str("kind", &ast.kind_spelling(cursor));
    record
}

/// Everything known about a cursor, starting with its spelling and type.
pub fn cursor<A: Ast>(ast: &A, cursor: A::Cursor) -> Record {
    let kind = ast.kind(cursor);
    let mut record = Record::new();
    record
        .str("spell", &ast.spelling(cursor))
        .extend(&type_fields(ast, ast.cursor_type(cursor)))
        .str("kind", &kind.spelling())
        .str("kind_type", kind.category().as_str());
    if ast.is_definition(cursor) {
        record.flag("is_definition");
    }
    if let Some(loc) = ast.location(cursor) {
        record.record("location", &location(&loc));
    }
    if let Some(range) = ast.extent(cursor) {
        record.record("extent", &extent(&range));
    }
    let parent = ast.semantic_parent(cursor);
    if !ast.is_null(parent) {
        record.record("semantic_parent", &cursor_brief(ast, parent));
    }
    record
}

fn fixit(fixit: &FixIt) -> Record {
    let mut record = Record::new();
    record.str("replacement", &fixit.replacement);
    if let Some(range) = &fixit.range {
        record.record("range", &extent(range));
    }
    record
}

pub fn diagnostic(diagnostic: &Diagnostic) -> Record {
    let mut record = Record::new();
    record
        .str("severity", diagnostic.severity.as_str())
        .str("message", &diagnostic.message);
    if let Some(loc) = &diagnostic.location {
        record.record("location", &location(loc));
    }
    let fixits: List = diagnostic.fixits.iter().map(fixit).collect();
    record.list("fixits", &fixits);
    record
}

/// Single-letter kind used by vim's completion menu.
fn completion_kind(kind: CursorKind) -> &'static str {
    use CursorKind::*;
    match kind {
        FunctionDecl | CXXMethod | Constructor | Destructor | ConversionFunction
        | FunctionTemplate => "f",
        VarDecl | ParmDecl => "v",
        FieldDecl | EnumConstantDecl => "m",
        StructDecl | UnionDecl | ClassDecl | EnumDecl | TypedefDecl | TypeAliasDecl
        | ClassTemplate | ClassTemplatePartialSpecialization | Namespace | NamespaceAlias => "t",
        MacroDefinition => "d",
        _ => "",
    }
}

/// A vim complete-item.
pub fn completion(candidate: &CompletionCandidate) -> Record {
    let mut record = Record::new();
    record
        .str("word", &candidate.typed_text)
        .str("abbr", &candidate.display)
        .str("menu", &candidate.result_type)
        .str("info", candidate.brief.as_deref().unwrap_or_default())
        .str("kind", completion_kind(candidate.kind));
    record
}
