use clang_ast::deduction::{deduce_return_type, deduce_type};
use clang_ast::navigation::search_upward_within;
use clang_ast::{Ast, CursorKind, FrontEnd, ParseOptions};
use vimson::EMPTY_RECORD;

use super::Queries;
use crate::stringize;

/// Deduced type of a variable, or return type of a function.
fn deduce_declared<A: Ast>(ast: &A, decl: A::Cursor) -> Option<A::Type> {
    if ast.kind(decl) == CursorKind::VarDecl {
        deduce_type(ast, decl)
    } else {
        deduce_return_type(ast, decl)
    }
}

impl<F: FrontEnd> Queries<F> {
    fn deduce_upward<P>(&self, query: &'static str, input: &str, predicate: P) -> String
    where
        P: Fn(CursorKind) -> bool,
    {
        let max_depth = self.config().max_parent_depth;
        self.at_location(query, input, ParseOptions::default(), EMPTY_RECORD, |ast, cursor| {
            let decl = search_upward_within(ast, cursor, max_depth, |c| predicate(ast.kind(c)))?;
            let ty = deduce_declared(ast, decl)?;
            Some(stringize::type_with_canonical(ast, ty).to_string())
        })
    }

    /// Type of the nearest enclosing variable declaration, looking through
    /// `auto`.
    pub fn deduce_var_decl_type(&self, input: &str) -> String {
        self.deduce_upward("deduce_var_decl_type", input, |kind| kind == CursorKind::VarDecl)
    }

    /// Return type of the nearest enclosing function, deduced from its
    /// `return` statements when declared `auto`.
    pub fn deduce_func_return_type(&self, input: &str) -> String {
        self.deduce_upward("deduce_func_return_type", input, CursorKind::is_function)
    }

    /// Whichever of variable type or function return type is closest.
    pub fn deduce_func_or_var_decl(&self, input: &str) -> String {
        self.deduce_upward("deduce_func_or_var_decl", input, |kind| {
            kind == CursorKind::VarDecl || kind.is_function()
        })
    }

    /// Type of the cursor at the position itself.
    pub fn type_at(&self, input: &str) -> String {
        self.at_location("type_at", input, ParseOptions::default(), EMPTY_RECORD, |ast, cursor| {
            let ty = deduce_type(ast, cursor)?;
            Some(stringize::type_with_canonical(ast, ty).to_string())
        })
    }

    /// Where the deduced type of the variable or expression at the position
    /// is declared.
    pub fn deduced_declaration(&self, input: &str) -> String {
        let max_depth = self.config().max_parent_depth;
        self.at_location("deduced_declaration", input, ParseOptions::default(), EMPTY_RECORD, |ast, cursor| {
            let ty = deduce_type(ast, cursor).or_else(|| {
                let var = search_upward_within(ast, cursor, max_depth, |c| {
                    ast.kind(c) == CursorKind::VarDecl
                })?;
                deduce_type(ast, var)
            })?;
            let decl = ast.type_declaration(ty);
            if ast.is_null(decl) {
                return None;
            }
            let location = ast.location(decl)?;
            Some(stringize::location(&location).to_string())
        })
    }
}
