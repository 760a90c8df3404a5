use clang_ast::{Ast, FrontEnd};
use vimson::{List, EMPTY_LIST};

use super::{list_or_none, Queries};
use crate::stringize;

impl<F: FrontEnd> Queries<F> {
    /// Diagnostics of the file named by `input`, `file[#unsaved]:args…`.
    pub fn diagnostics(&self, input: &str) -> String {
        self.on_file("diagnostics", input, EMPTY_LIST, |ast| {
            let items: List = ast.diagnostics().iter().map(stringize::diagnostic).collect();
            list_or_none(items)
        })
    }
}
