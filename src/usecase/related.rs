use clang_ast::{Ast, FrontEnd, ParseOptions};
use vimson::EMPTY_RECORD;

use super::Queries;
use crate::stringize;

/// A jump from the cursor at a position to a related node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Jump {
    Definition,
    /// The entity a reference or expression refers to
    Referenced,
    /// The canonical, first, declaration
    Declaration,
    SemanticParent,
    LexicalParent,
    /// The template a specialization was instantiated from
    SpecializedTemplate,
}

impl Jump {
    fn apply<A: Ast>(self, ast: &A, cursor: A::Cursor) -> A::Cursor {
        match self {
            Jump::Definition => ast.definition(cursor),
            Jump::Referenced => ast.referenced(cursor),
            Jump::Declaration => ast.canonical_cursor(cursor),
            Jump::SemanticParent => ast.semantic_parent(cursor),
            Jump::LexicalParent => ast.lexical_parent(cursor),
            Jump::SpecializedTemplate => ast.specialized_template(cursor),
        }
    }
}

impl<F: FrontEnd> Queries<F> {
    /// Cursor record of the node `jump` leads to from the position.
    pub fn related_node(&self, jump: Jump, input: &str) -> String {
        self.at_location("related_node", input, ParseOptions::default(), EMPTY_RECORD, |ast, cursor| {
            if ast.is_null(cursor) {
                return None;
            }
            let target = jump.apply(ast, cursor);
            (!ast.is_null(target)).then(|| stringize::cursor(ast, target).to_string())
        })
    }
}
