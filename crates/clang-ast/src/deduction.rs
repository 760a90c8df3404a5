//! Finding the real type behind `auto` and other types the front-end leaves
//! unresolved.

use crate::ast::Ast;
use crate::kind::CursorKind;
use crate::navigation::{find_map_children, find_map_descendants, Probe};

const PLACEHOLDER: &str = "auto";

/// Whether a type spelling mentions the `auto` placeholder as a standalone
/// token.
///
/// `const auto&` and `decltype(auto)` match, `my_autoType` and `autos` do not.
pub fn is_placeholder_type(spelling: &str) -> bool {
    let bytes = spelling.as_bytes();
    spelling.match_indices(PLACEHOLDER).any(|(pos, _)| {
        let before = pos.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(pos + PLACEHOLDER.len()).copied();
        !before.is_some_and(is_identifier_byte) && !after.is_some_and(is_identifier_byte)
    })
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A type is concrete when it is valid and not spelled with a placeholder.
pub fn is_concrete_type<A: Ast>(ast: &A, ty: A::Type) -> bool {
    !ast.type_kind(ty).is_invalid() && !is_placeholder_type(&ast.type_spelling(ty))
}

/// The type of `cursor`, looking through placeholders.
///
/// A concrete declared type is returned as is. Otherwise the children are
/// tried depth-first in visitation order and the first one whose own deduced
/// type is concrete wins; the walk stops right there. `None` when the whole
/// subtree yields nothing concrete.
pub fn deduce_type<A: Ast>(ast: &A, cursor: A::Cursor) -> Option<A::Type> {
    let ty = ast.cursor_type(cursor);
    if is_concrete_type(ast, ty) {
        return Some(ty);
    }
    find_map_children(ast, cursor, |child| deduce_type(ast, child))
}

/// Return type of a function-like cursor.
///
/// A placeholder result type is resolved from the first `return` statement
/// whose value has a concrete type. Returns inside nested lambdas belong to
/// the lambda and are not considered.
pub fn deduce_return_type<A: Ast>(ast: &A, function: A::Cursor) -> Option<A::Type> {
    let declared = ast.result_type(function);
    if is_concrete_type(ast, declared) {
        return Some(declared);
    }
    find_map_descendants(ast, function, |child| match ast.kind(child) {
        CursorKind::LambdaExpr => Probe::Skip,
        CursorKind::ReturnStmt => match find_map_children(ast, child, |v| deduce_type(ast, v)) {
            Some(ty) => Probe::Found(ty),
            None => Probe::Skip,
        },
        _ => Probe::Descend,
    })
}
