//! Walking the AST: up through semantic parents, down through children.

use tracing::warn;

use crate::ast::{Ast, ChildVisit};

/// Bound on the semantic-parent walk.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Answer of a probe passed to [`find_map_descendants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    /// Stop the walk and yield this value
    Found(T),
    /// Look inside this cursor next
    Descend,
    /// Leave this cursor's subtree alone
    Skip,
}

/// Nearest cursor on the semantic-parent chain of `cursor` (itself included)
/// that satisfies `predicate`.
///
/// Returns `None` once the chain reaches an invalid cursor, which is what the
/// front-end answers above the translation unit.
pub fn search_upward<A: Ast>(
    ast: &A,
    cursor: A::Cursor,
    predicate: impl FnMut(A::Cursor) -> bool,
) -> Option<A::Cursor> {
    search_upward_within(ast, cursor, DEFAULT_MAX_DEPTH, predicate)
}

/// [`search_upward`] giving up after `max_depth` steps.
pub fn search_upward_within<A: Ast>(
    ast: &A,
    cursor: A::Cursor,
    max_depth: usize,
    mut predicate: impl FnMut(A::Cursor) -> bool,
) -> Option<A::Cursor> {
    let mut current = cursor;
    for _ in 0..max_depth {
        if ast.is_null(current) {
            return None;
        }
        if predicate(current) {
            return Some(current);
        }
        current = ast.semantic_parent(current);
    }
    warn!(max_depth, "semantic parent chain did not terminate");
    None
}

/// Depth-first pre-order walk below `cursor`, steered by `visitor`.
///
/// Returns `true` when the visitor broke out of the walk.
pub fn search_downward<A: Ast>(
    ast: &A,
    cursor: A::Cursor,
    visitor: &mut dyn FnMut(A::Cursor) -> ChildVisit,
) -> bool {
    ast.visit_children(cursor, visitor)
}

/// First value a probe yields while walking below `cursor` in pre-order.
pub fn find_map_descendants<A: Ast, T>(
    ast: &A,
    cursor: A::Cursor,
    mut probe: impl FnMut(A::Cursor) -> Probe<T>,
) -> Option<T> {
    let mut found = None;
    search_downward(ast, cursor, &mut |child| match probe(child) {
        Probe::Found(value) => {
            found = Some(value);
            ChildVisit::Break
        }
        Probe::Descend => ChildVisit::Recurse,
        Probe::Skip => ChildVisit::Continue,
    });
    found
}

/// First direct child for which `f` yields a value.
pub fn find_map_children<A: Ast, T>(
    ast: &A,
    cursor: A::Cursor,
    mut f: impl FnMut(A::Cursor) -> Option<T>,
) -> Option<T> {
    find_map_descendants(ast, cursor, |child| match f(child) {
        Some(value) => Probe::Found(value),
        None => Probe::Skip,
    })
}

/// First descendant of `cursor` in pre-order satisfying `predicate`.
pub fn find_descendant<A: Ast>(
    ast: &A,
    cursor: A::Cursor,
    mut predicate: impl FnMut(A::Cursor) -> bool,
) -> Option<A::Cursor> {
    find_map_descendants(ast, cursor, |child| {
        if predicate(child) {
            Probe::Found(child)
        } else {
            Probe::Descend
        }
    })
}

/// Every descendant of `cursor`, in pre-order.
pub fn descendants<A: Ast>(ast: &A, cursor: A::Cursor) -> Vec<A::Cursor> {
    let mut all = Vec::new();
    search_downward(ast, cursor, &mut |child| {
        all.push(child);
        ChildVisit::Recurse
    });
    all
}
