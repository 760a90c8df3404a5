use clang_ast::navigation::search_upward_within;
use clang_ast::{Ast, CursorKind, FrontEnd, ParseOptions};
use vimson::{Record, EMPTY_RECORD};

use super::Queries;
use crate::config::CommentStyle;
use crate::stringize;

impl<F: FrontEnd> Queries<F> {
    /// Cursor record of the node at the position plus its canonical type.
    pub fn location_information(&self, input: &str) -> String {
        self.at_location("location_information", input, ParseOptions::default(), EMPTY_RECORD, |ast, cursor| {
            if ast.is_null(cursor) {
                return None;
            }
            let mut record = stringize::cursor(ast, cursor);
            let canonical = ast.canonical_type(ast.cursor_type(cursor));
            record.record("canonical", &stringize::type_fields(ast, canonical));
            Some(record.to_string())
        })
    }

    /// Name of the function enclosing the position.
    pub fn current_function(&self, input: &str) -> String {
        let max_depth = self.config().max_parent_depth;
        self.at_location("current_function", input, ParseOptions::default(), EMPTY_RECORD, |ast, cursor| {
            let function = search_upward_within(ast, cursor, max_depth, |c| ast.kind(c).is_function())?;
            let mut record = Record::new();
            record.str("name", &ast.spelling(function));
            Some(record.to_string())
        })
    }

    /// Documentation comment of the entity referenced at the position, or of
    /// the declaration at the position.
    pub fn comment_at(&self, input: &str) -> String {
        let style = self.config().comment_style;
        self.at_location("comment_at", input, ParseOptions::default(), EMPTY_RECORD, |ast, cursor| {
            let referenced = ast.referenced(cursor);
            let target = if ast.is_null(referenced) { cursor } else { referenced };
            let text = match style {
                CommentStyle::Brief => ast.brief_comment(target),
                CommentStyle::Raw => ast.raw_comment(target),
            }?;
            let mut record = Record::new();
            record.str(style.key(), &text);
            Some(record.to_string())
        })
    }

    /// File named by the inclusion directive at the position.
    pub fn include_at(&self, input: &str) -> String {
        let options = ParseOptions {
            detailed_preprocessing_record: true,
            ..ParseOptions::default()
        };
        self.at_location("include_at", input, options, EMPTY_RECORD, |ast, cursor| {
            if ast.kind(cursor) != CursorKind::InclusionDirective {
                return None;
            }
            let file = ast.included_file(cursor)?;
            let mut record = Record::new();
            record.str("file", &file);
            Some(record.to_string())
        })
    }

    /// Version of the front-end.
    pub fn version(&self) -> String {
        let mut record = Record::new();
        record.str("version", &self.front().version());
        record.to_string()
    }
}
