//! In-memory translation units standing in for the files under `qa/data`.

use std::path::Path;

use clang_ast::{
    CompletionCandidate, CursorKind, Diagnostic, MemoryAst, MemoryAstBuilder, MemoryFrontEnd,
    NodeId, Severity, SourceLocation, TypeKind,
};

use super::Queries;
use crate::config::Config;

pub const ALL_EXTENTS: &str = "qa/data/all-extents.cpp";
pub const CURRENT_FUNCTION: &str = "qa/data/current-function.cpp";

/// Add a statement or expression whose semantic and lexical parent is the
/// enclosing declaration `decl`, the way libclang reports them.
fn inner(
    b: &mut MemoryAstBuilder,
    parent: NodeId,
    decl: NodeId,
    kind: CursorKind,
    spelling: &str,
    start: (u32, u32, u32),
    end: (u32, u32, u32),
) -> NodeId {
    b.node(parent, kind, spelling)
        .span(start, end)
        .semantic_parent(decl)
        .lexical_parent(decl)
        .id()
}

/// ```cpp
/// auto main() {
/// 	int x{0};
/// 	return x;
/// }
/// ```
///
/// Indented with tabs, one byte per column.
pub fn all_extents(file: &str) -> MemoryAst {
    let mut b = MemoryAst::builder(file);
    let int = b.ty(TypeKind::Int, "int").id();
    let proto = b.ty(TypeKind::FunctionProto, "int ()").id();
    let root = b.root();

    let main = b
        .node(root, CursorKind::FunctionDecl, "main")
        .span((1, 1, 0), (4, 2, 37))
        .location(SourceLocation::new(file, 1, 6, 5))
        .ty(proto)
        .result_type(int)
        .is_definition()
        .id();
    let body = inner(&mut b, main, main, CursorKind::CompoundStmt, "", (1, 13, 12), (4, 2, 37));
    let decl = inner(&mut b, body, main, CursorKind::DeclStmt, "", (2, 2, 15), (2, 11, 24));
    let x = b
        .node(decl, CursorKind::VarDecl, "x")
        .span((2, 2, 15), (2, 10, 23))
        .location(SourceLocation::new(file, 2, 6, 19))
        .ty(int)
        .semantic_parent(main)
        .lexical_parent(main)
        .is_definition()
        .id();
    let lit = inner(&mut b, x, x, CursorKind::IntegerLiteral, "", (2, 8, 21), (2, 9, 22));
    b.edit(lit).ty(int);
    let ret = inner(&mut b, body, main, CursorKind::ReturnStmt, "", (3, 2, 26), (3, 10, 34));
    let cast = inner(&mut b, ret, main, CursorKind::UnexposedExpr, "x", (3, 9, 33), (3, 10, 34));
    b.edit(cast).ty(int);
    let read = inner(&mut b, cast, main, CursorKind::DeclRefExpr, "x", (3, 9, 33), (3, 10, 34));
    b.edit(read).ty(int).references(x).definition(x);
    b.build()
}

/// ```cpp
/// #include <vector>
/// namespace ns {
///
/// int func();
///
/// // Sample
///
/// /// Does the work.
/// int func() {
///     int y = 42;
///     y += 420;
///     return y;
/// }
///
/// /// The user's widget.
/// /// Holds parts.
/// struct widget {
///     int size() const;
/// };
/// auto make() { return widget{}; }
/// void use() {
///     auto w = make();
/// }
/// }
/// ```
///
/// The inclusion directive only exists with the detailed preprocessing
/// record, as with libclang.
pub fn current_function(file: &str, detailed_preprocessing_record: bool) -> MemoryAst {
    let at = |line, column, offset| SourceLocation::new(file, line, column, offset);
    let mut b = MemoryAst::builder(file);
    let int = b.ty(TypeKind::Int, "int").id();
    let void = b.ty(TypeKind::Void, "void").id();
    let auto = b.ty(TypeKind::Auto, "auto").id();
    let int_fn = b.ty(TypeKind::FunctionProto, "int ()").id();
    let void_fn = b.ty(TypeKind::FunctionProto, "void ()").id();
    let auto_fn = b.ty(TypeKind::FunctionProto, "auto ()").id();
    let const_fn = b.ty(TypeKind::FunctionProto, "int () const").id();
    let root = b.root();

    if detailed_preprocessing_record {
        b.node(root, CursorKind::InclusionDirective, "vector")
            .span((1, 1, 0), (1, 18, 17))
            .includes("/usr/include/c++/13/vector");
    }

    let ns = b
        .node(root, CursorKind::Namespace, "ns")
        .span((2, 1, 18), (24, 2, 288))
        .location(at(2, 11, 28))
        .is_definition()
        .id();

    let forward = b
        .node(ns, CursorKind::FunctionDecl, "func")
        .span((4, 1, 34), (4, 11, 44))
        .location(at(4, 5, 38))
        .ty(int_fn)
        .result_type(int)
        .id();
    let func = b
        .node(ns, CursorKind::FunctionDecl, "func")
        .span((9, 1, 77), (13, 2, 135))
        .location(at(9, 5, 81))
        .ty(int_fn)
        .result_type(int)
        .is_definition()
        .canonical(forward)
        .brief_comment("Does the work.")
        .raw_comment("/// Does the work.")
        .id();
    b.edit(forward).canonical(forward).definition(func);
    b.edit(func).definition(func);
    let body = inner(&mut b, func, func, CursorKind::CompoundStmt, "", (9, 12, 88), (13, 2, 135));

    let decl_y = inner(&mut b, body, func, CursorKind::DeclStmt, "", (10, 5, 94), (10, 16, 105));
    let y = b
        .node(decl_y, CursorKind::VarDecl, "y")
        .span((10, 5, 94), (10, 15, 104))
        .location(at(10, 9, 98))
        .ty(int)
        .semantic_parent(func)
        .lexical_parent(func)
        .is_definition()
        .id();
    let forty_two = inner(&mut b, y, y, CursorKind::IntegerLiteral, "", (10, 13, 102), (10, 15, 104));
    b.edit(forty_two).ty(int);

    let add = inner(&mut b, body, func, CursorKind::CompoundAssignOperator, "", (11, 5, 110), (11, 13, 118));
    b.edit(add).ty(int);
    let lhs = inner(&mut b, add, func, CursorKind::DeclRefExpr, "y", (11, 5, 110), (11, 6, 111));
    b.edit(lhs).ty(int).references(y).definition(y);
    let rhs = inner(&mut b, add, func, CursorKind::IntegerLiteral, "", (11, 10, 115), (11, 13, 118));
    b.edit(rhs).ty(int);

    let ret = inner(&mut b, body, func, CursorKind::ReturnStmt, "", (12, 5, 124), (12, 13, 132));
    let cast = inner(&mut b, ret, func, CursorKind::UnexposedExpr, "y", (12, 12, 131), (12, 13, 132));
    b.edit(cast).ty(int);
    let read = inner(&mut b, cast, func, CursorKind::DeclRefExpr, "y", (12, 12, 131), (12, 13, 132));
    b.edit(read).ty(int).references(y).definition(y);

    let widget = b
        .node(ns, CursorKind::StructDecl, "widget")
        .span((17, 1, 177), (19, 2, 216))
        .location(at(17, 8, 184))
        .is_definition()
        .brief_comment("The user's widget. Holds parts.")
        .raw_comment("/// The user's widget.\n/// Holds parts.")
        .id();
    let widget_ty = b
        .ty(TypeKind::Record, "ns::widget")
        .declared_by(widget)
        .id();
    b.edit(widget).ty(widget_ty);
    b.node(widget, CursorKind::CXXMethod, "size")
        .span((18, 5, 197), (18, 21, 213))
        .location(at(18, 9, 201))
        .ty(const_fn)
        .result_type(int);

    let make = b
        .node(ns, CursorKind::FunctionDecl, "make")
        .span((20, 1, 218), (20, 33, 250))
        .location(at(20, 6, 223))
        .ty(auto_fn)
        .result_type(auto)
        .is_definition()
        .id();
    let make_body = inner(&mut b, make, make, CursorKind::CompoundStmt, "", (20, 13, 230), (20, 33, 250));
    let make_ret = inner(&mut b, make_body, make, CursorKind::ReturnStmt, "", (20, 15, 232), (20, 30, 247));
    let temp = inner(&mut b, make_ret, make, CursorKind::UnexposedExpr, "", (20, 22, 239), (20, 30, 247));
    b.edit(temp).ty(widget_ty);

    let user = b
        .node(ns, CursorKind::FunctionDecl, "use")
        .span((21, 1, 251), (23, 2, 286))
        .location(at(21, 6, 256))
        .ty(void_fn)
        .result_type(void)
        .is_definition()
        .id();
    let use_body = inner(&mut b, user, user, CursorKind::CompoundStmt, "", (21, 12, 262), (23, 2, 286));
    let decl_w = inner(&mut b, use_body, user, CursorKind::DeclStmt, "", (22, 5, 268), (22, 21, 284));
    let w = b
        .node(decl_w, CursorKind::VarDecl, "w")
        .span((22, 5, 268), (22, 20, 283))
        .location(at(22, 10, 273))
        .ty(auto)
        .semantic_parent(user)
        .lexical_parent(user)
        .is_definition()
        .id();
    let call = inner(&mut b, w, w, CursorKind::CallExpr, "make", (22, 14, 277), (22, 20, 283));
    b.edit(call).ty(widget_ty).references(make).definition(make);
    let callee = inner(&mut b, call, w, CursorKind::UnexposedExpr, "make", (22, 14, 277), (22, 18, 281));
    b.edit(callee).ty(auto_fn);
    let name = inner(&mut b, callee, w, CursorKind::DeclRefExpr, "make", (22, 14, 277), (22, 18, 281));
    b.edit(name).ty(auto_fn).references(make).definition(make);

    b.diagnostic(Diagnostic {
        severity: Severity::Warning,
        message: "unused variable 'w'".to_string(),
        location: Some(at(22, 10, 273)),
        fixits: Vec::new(),
    });
    for (word, display, result, kind, priority, brief) in [
        ("make", "make()", "auto", CursorKind::FunctionDecl, 50, None),
        ("size", "size() const", "int", CursorKind::CXXMethod, 34, Some("Number of parts.")),
        ("func", "func()", "int", CursorKind::FunctionDecl, 50, Some("Does the work.")),
        ("y", "y", "int", CursorKind::VarDecl, 12, None),
    ] {
        b.completion(CompletionCandidate {
            typed_text: word.to_string(),
            display: display.to_string(),
            result_type: result.to_string(),
            kind,
            brief: brief.map(str::to_string),
            priority,
        });
    }
    b.build()
}

/// Front-end knowing the two fixture files by base name. Anything else
/// fails to parse.
pub fn front_end() -> MemoryFrontEnd {
    MemoryFrontEnd::new(|request| {
        let name = Path::new(&request.file).file_name()?.to_str()?;
        match name {
            "all-extents.cpp" => Some(all_extents(&request.file)),
            "current-function.cpp" => Some(current_function(
                &request.file,
                request.options.detailed_preprocessing_record,
            )),
            _ => None,
        }
    })
}

pub fn queries() -> Queries<MemoryFrontEnd> {
    queries_with(Config::default())
}

pub fn queries_with(config: Config) -> Queries<MemoryFrontEnd> {
    Queries::new(front_end(), config)
}
