//! The C ABI loaded by the vim plugin.
//!
//! Every `vim_clang_*` function takes a NUL-terminated UTF-8 string and
//! returns a NUL-terminated vimson string. The returned pointer is owned by
//! this module and stays valid until the next call into it on the same
//! thread. Null or non-UTF-8 input is treated as malformed and answered with
//! `{}` or `[]`.
//!
//! # Safety
//!
//! Callers pass either null or a pointer to a NUL-terminated string that
//! stays valid for the duration of the call.

#![allow(clippy::missing_safety_doc)]

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::panic::{catch_unwind, AssertUnwindSafe};

use clang_ast::Clang;
use tracing::{debug, error, warn};
use vimson::{EMPTY_LIST, EMPTY_RECORD};

use crate::config;
use crate::error::QueryError;
use crate::logging;
use crate::usecase::{self, ExtentKind, Jump, Queries};

thread_local! {
    static RESPONSE: RefCell<CString> = RefCell::new(CString::default());
}

unsafe fn input<'a>(ptr: *const c_char) -> Result<&'a str, QueryError> {
    if ptr.is_null() {
        return Err(QueryError::InvalidInput("null pointer"));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| QueryError::InvalidInput("not valid UTF-8"))
}

/// Park `text` in the thread's response buffer and hand out a pointer to it.
fn respond(text: String) -> *const c_char {
    let text = CString::new(text.replace('\0', "")).unwrap_or_default();
    RESPONSE.with(|cell| {
        let mut slot = cell.borrow_mut();
        *slot = text;
        slot.as_ptr()
    })
}

fn answer(name: &str, empty: &'static str, query: impl FnOnce() -> String) -> *const c_char {
    logging::init_from_env();
    let text = catch_unwind(AssertUnwindSafe(query)).unwrap_or_else(|_| {
        error!(query = name, "query panicked");
        empty.to_string()
    });
    respond(text)
}

/// [`answer`] for a query taking the string at `request`.
unsafe fn answer_request(
    name: &str,
    empty: &'static str,
    request: *const c_char,
    query: impl FnOnce(&str) -> String,
) -> *const c_char {
    match unsafe { input(request) } {
        Ok(input) => answer(name, empty, || query(input)),
        Err(e) => answer(name, empty, || {
            debug!(query = name, "{}", e);
            empty.to_string()
        }),
    }
}

fn queries() -> Queries<Clang> {
    Queries::new(Clang, config::current())
}

macro_rules! export {
    ($($(#[$meta:meta])* fn $name:ident($empty:expr) = |$q:ident, $input:ident| $body:expr;)*) => {
        $(
            $(#[$meta])*
            #[no_mangle]
            pub unsafe extern "C" fn $name(request: *const c_char) -> *const c_char {
                unsafe {
                    answer_request(stringify!($name), $empty, request, |$input| {
                        let $q = queries();
                        $body
                    })
                }
            }
        )*
    };
}

export! {
    /// Cursor record and canonical type at `file:args…:line:column`.
    fn vim_clang_get_location_information(EMPTY_RECORD) = |q, s| q.location_information(s);
    fn vim_clang_get_all_extents_at(EMPTY_LIST) = |q, s| q.all_extents(s);
    fn vim_clang_get_extent_of_node_at_specific_location(EMPTY_RECORD) = |q, s| q.extent_of(ExtentKind::Node, s);
    fn vim_clang_get_expression_extent_at(EMPTY_RECORD) = |q, s| q.extent_of(ExtentKind::Expression, s);
    fn vim_clang_get_statement_extent_at(EMPTY_RECORD) = |q, s| q.extent_of(ExtentKind::Statement, s);
    fn vim_clang_get_function_extent_at(EMPTY_RECORD) = |q, s| q.extent_of(ExtentKind::Function, s);
    fn vim_clang_get_class_extent_at(EMPTY_RECORD) = |q, s| q.extent_of(ExtentKind::Class, s);
    fn vim_clang_get_namespace_extent_at(EMPTY_RECORD) = |q, s| q.extent_of(ExtentKind::Namespace, s);
    fn vim_clang_get_parameter_extent_at(EMPTY_RECORD) = |q, s| q.extent_of(ExtentKind::Parameter, s);
    fn vim_clang_get_definition_at(EMPTY_RECORD) = |q, s| q.related_node(Jump::Definition, s);
    fn vim_clang_get_referenced_at(EMPTY_RECORD) = |q, s| q.related_node(Jump::Referenced, s);
    fn vim_clang_get_declaration_at(EMPTY_RECORD) = |q, s| q.related_node(Jump::Declaration, s);
    fn vim_clang_get_semantic_parent_at(EMPTY_RECORD) = |q, s| q.related_node(Jump::SemanticParent, s);
    fn vim_clang_get_lexical_parent_at(EMPTY_RECORD) = |q, s| q.related_node(Jump::LexicalParent, s);
    fn vim_clang_get_specialized_template_at(EMPTY_RECORD) = |q, s| q.related_node(Jump::SpecializedTemplate, s);
    fn vim_clang_deduce_var_decl_type(EMPTY_RECORD) = |q, s| q.deduce_var_decl_type(s);
    fn vim_clang_deduce_func_return_type(EMPTY_RECORD) = |q, s| q.deduce_func_return_type(s);
    fn vim_clang_deduce_func_or_var_decl(EMPTY_RECORD) = |q, s| q.deduce_func_or_var_decl(s);
    fn vim_clang_get_type_with_deduction_at(EMPTY_RECORD) = |q, s| q.type_at(s);
    fn vim_clang_get_current_function_at(EMPTY_RECORD) = |q, s| q.current_function(s);
    fn vim_clang_get_comment_at(EMPTY_RECORD) = |q, s| q.comment_at(s);
    fn vim_clang_get_deduced_declaration_at(EMPTY_RECORD) = |q, s| q.deduced_declaration(s);
    fn vim_clang_get_include_at(EMPTY_RECORD) = |q, s| q.include_at(s);
    fn vim_clang_get_completion_at(EMPTY_LIST) = |q, s| q.completion_at(s);
    /// Diagnostics for `file[#unsaved]:args…`.
    fn vim_clang_get_diagnostics(EMPTY_LIST) = |q, s| q.diagnostics(s);
}

/// Compiler flags for a file path from the nearest compilation database.
#[no_mangle]
pub unsafe extern "C" fn vim_clang_get_compile_commands(file: *const c_char) -> *const c_char {
    unsafe {
        answer_request("vim_clang_get_compile_commands", EMPTY_RECORD, file, usecase::compile_commands)
    }
}

#[no_mangle]
pub extern "C" fn vim_clang_version() -> *const c_char {
    answer("vim_clang_version", EMPTY_RECORD, || queries().version())
}

/// Replace the configuration with camelCase JSON. Returns 0 on success and
/// -1 when the JSON is rejected, leaving the previous configuration.
#[no_mangle]
pub unsafe extern "C" fn vim_clang_configure(json: *const c_char) -> c_int {
    logging::init_from_env();
    let json = match unsafe { input(json) } {
        Ok(json) => json,
        Err(e) => {
            warn!("rejected configuration: {}", e);
            return -1;
        }
    };
    match config::configure_from_json(json) {
        Ok(()) => 0,
        Err(e) => {
            warn!("rejected configuration: {}", e);
            -1
        }
    }
}
