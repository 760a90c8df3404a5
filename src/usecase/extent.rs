use clang_ast::navigation::{descendants, search_upward_within};
use clang_ast::{Ast, CursorKind, FrontEnd, ParseOptions};
use vimson::{List, EMPTY_LIST, EMPTY_RECORD};

use super::{list_or_none, Queries};
use crate::stringize;

/// Which enclosing node an extent query looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtentKind {
    /// The node at the position itself
    Node,
    Expression,
    Statement,
    /// Functions, methods, constructors, destructors, conversions, function
    /// templates and lambdas
    Function,
    /// Structs, classes, unions and class templates
    Class,
    Namespace,
    Parameter,
}

impl ExtentKind {
    pub fn matches(self, kind: CursorKind) -> bool {
        match self {
            ExtentKind::Node => !kind.is_invalid(),
            ExtentKind::Expression => kind.is_expression(),
            ExtentKind::Statement => kind.is_statement(),
            ExtentKind::Function => kind.is_function(),
            ExtentKind::Class => kind.is_class(),
            ExtentKind::Namespace => kind == CursorKind::Namespace,
            ExtentKind::Parameter => kind == CursorKind::ParmDecl,
        }
    }
}

impl<F: FrontEnd> Queries<F> {
    /// Extent of the cursor at the position followed by the extents of all
    /// its descendants, in pre-order.
    pub fn all_extents(&self, input: &str) -> String {
        self.at_location("all_extents", input, ParseOptions::default(), EMPTY_LIST, |ast, cursor| {
            let mut extents = List::new();
            for node in std::iter::once(cursor).chain(descendants(ast, cursor)) {
                if let Some(range) = ast.extent(node) {
                    extents.push_record(&stringize::extent(&range));
                }
            }
            list_or_none(extents)
        })
    }

    /// Extent of the nearest node matching `kind`, walking up through
    /// semantic parents from the cursor at the position.
    pub fn extent_of(&self, kind: ExtentKind, input: &str) -> String {
        let max_depth = self.config().max_parent_depth;
        self.at_location("extent_of", input, ParseOptions::default(), EMPTY_RECORD, |ast, cursor| {
            let found = search_upward_within(ast, cursor, max_depth, |c| kind.matches(ast.kind(c)))?;
            let range = ast.extent(found)?;
            Some(stringize::extent(&range).to_string())
        })
    }
}
