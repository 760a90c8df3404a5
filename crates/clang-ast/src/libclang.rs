//! [`FrontEnd`] backed by libclang, loaded at runtime through `clang-sys`.

use std::any::Any;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_uint, c_ulong};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::ptr;

use clang_sys::*;
use tracing::{debug, trace};

use crate::ast::{Ast, ChildVisit, FrontEnd, ParseOptions, ParseRequest, UnsavedFile};
use crate::error::AstError;
use crate::kind::{CursorKind, TypeKind};
use crate::source::{
    CompletionCandidate, Diagnostic, Extent, FixIt, Severity, SourceLocation,
};

/// libclang is loaded per thread in runtime mode.
fn ensure_loaded() -> Result<(), AstError> {
    if !clang_sys::is_loaded() {
        clang_sys::load().map_err(AstError::FrontEndUnavailable)?;
        debug!("loaded libclang");
    }
    Ok(())
}

fn c_string(value: &str) -> Result<CString, AstError> {
    CString::new(value).map_err(|_| AstError::InvalidArgument(value.to_string()))
}

/// Take ownership of a `CXString`, copy it out and dispose it.
fn into_string(s: CXString) -> String {
    unsafe {
        let raw = clang_getCString(s);
        let out = if raw.is_null() {
            String::new()
        } else {
            CStr::from_ptr(raw).to_string_lossy().into_owned()
        };
        clang_disposeString(s);
        out
    }
}

fn file_name(file: CXFile) -> String {
    if file.is_null() {
        return String::new();
    }
    into_string(unsafe { clang_getFileName(file) })
}

fn spelling_location(location: CXSourceLocation) -> Option<SourceLocation> {
    let mut file: CXFile = ptr::null_mut();
    let (mut line, mut column, mut offset): (c_uint, c_uint, c_uint) = (0, 0, 0);
    unsafe {
        clang_getSpellingLocation(location, &mut file, &mut line, &mut column, &mut offset);
    }
    if file.is_null() && line == 0 {
        return None;
    }
    Some(SourceLocation::new(file_name(file), line, column, offset))
}

fn range_extent(range: CXSourceRange) -> Option<Extent> {
    if unsafe { clang_Range_isNull(range) } != 0 {
        return None;
    }
    let start = spelling_location(unsafe { clang_getRangeStart(range) })?;
    let end = spelling_location(unsafe { clang_getRangeEnd(range) })?;
    Some(Extent::new(start, end))
}

struct Index(CXIndex);

impl Index {
    fn new(options: &ParseOptions) -> Result<Self, AstError> {
        let raw = unsafe {
            clang_createIndex(
                options.exclude_pch_declarations as c_int,
                options.display_diagnostics as c_int,
            )
        };
        if raw.is_null() {
            return Err(AstError::IndexCreation);
        }
        Ok(Index(raw))
    }
}

impl Drop for Index {
    fn drop(&mut self) {
        trace!("disposing index");
        unsafe { clang_disposeIndex(self.0) }
    }
}

/// Unsaved buffer kept alive for the lifetime of the unit, since code
/// completion hands it to libclang again.
struct Unsaved {
    filename: CString,
    contents: CString,
    length: usize,
}

impl Unsaved {
    fn new(file: &UnsavedFile) -> Result<Self, AstError> {
        Ok(Self {
            filename: c_string(&file.filename)?,
            contents: c_string(&file.contents)?,
            length: file.contents.len(),
        })
    }

    fn raw(&self) -> CXUnsavedFile {
        CXUnsavedFile {
            Filename: self.filename.as_ptr(),
            Contents: self.contents.as_ptr(),
            Length: self.length as c_ulong,
        }
    }
}

fn parse_flags(options: &ParseOptions) -> CXTranslationUnit_Flags {
    let mut flags = CXTranslationUnit_None;
    if options.incomplete {
        flags |= CXTranslationUnit_Incomplete;
    }
    if options.detailed_preprocessing_record {
        flags |= CXTranslationUnit_DetailedPreprocessingRecord;
    }
    flags
}

/// The libclang front-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clang;

impl Clang {
    /// Load libclang on the calling thread.
    pub fn load() -> Result<Self, AstError> {
        ensure_loaded()?;
        Ok(Clang)
    }
}

impl FrontEnd for Clang {
    type Unit = ClangUnit;

    #[tracing::instrument(level = "debug", skip(self, request), fields(file = %request.file))]
    fn parse(&self, request: &ParseRequest) -> Result<ClangUnit, AstError> {
        ensure_loaded()?;
        let index = Index::new(&request.options)?;
        let file = c_string(&request.file)?;
        let args = request
            .args
            .iter()
            .map(|arg| c_string(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let arg_ptrs: Vec<*const c_char> = args.iter().map(|arg| arg.as_ptr()).collect();
        let unsaved = request
            .unsaved
            .as_ref()
            .map(Unsaved::new)
            .transpose()?;
        let mut raw_unsaved: Vec<CXUnsavedFile> = unsaved.iter().map(Unsaved::raw).collect();

        let mut tu: CXTranslationUnit = ptr::null_mut();
        let code = unsafe {
            clang_parseTranslationUnit2(
                index.0,
                file.as_ptr(),
                arg_ptrs.as_ptr(),
                arg_ptrs.len() as c_int,
                raw_unsaved.as_mut_ptr(),
                raw_unsaved.len() as c_uint,
                parse_flags(&request.options),
                &mut tu,
            )
        };
        if code != CXError_Success || tu.is_null() {
            debug!(code, "parse failed");
            return Err(AstError::ParseFailed(request.file.clone()));
        }
        Ok(ClangUnit {
            tu,
            file: request.file.clone(),
            unsaved,
            _index: index,
        })
    }

    fn version(&self) -> String {
        match ensure_loaded() {
            Ok(()) => into_string(unsafe { clang_getClangVersion() }),
            Err(_) => String::new(),
        }
    }
}

/// A parsed translation unit together with the index that produced it.
///
/// The translation unit is disposed in `drop`; the index field is released
/// afterwards.
pub struct ClangUnit {
    tu: CXTranslationUnit,
    file: String,
    unsaved: Option<Unsaved>,
    _index: Index,
}

impl Drop for ClangUnit {
    fn drop(&mut self) {
        trace!(file = %self.file, "disposing translation unit");
        unsafe { clang_disposeTranslationUnit(self.tu) }
    }
}

impl std::fmt::Debug for ClangUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClangUnit").field("file", &self.file).finish()
    }
}

/// A visitor and the panic it raised. Unwinding must not cross libclang's
/// frames, so a panic is parked here and resumed once `clang_visitChildren`
/// has returned.
struct Visit<'a> {
    visitor: &'a mut dyn FnMut(CXCursor) -> ChildVisit,
    panic: Option<Box<dyn Any + Send>>,
}

extern "C" fn visit_trampoline(
    cursor: CXCursor,
    _parent: CXCursor,
    data: CXClientData,
) -> CXChildVisitResult {
    let visit = unsafe { &mut *(data as *mut Visit<'_>) };
    match catch_unwind(AssertUnwindSafe(|| (visit.visitor)(cursor))) {
        Ok(ChildVisit::Break) => CXChildVisit_Break,
        Ok(ChildVisit::Continue) => CXChildVisit_Continue,
        Ok(ChildVisit::Recurse) => CXChildVisit_Recurse,
        Err(payload) => {
            visit.panic = Some(payload);
            CXChildVisit_Break
        }
    }
}

fn completion_candidate(result: &CXCompletionResult) -> CompletionCandidate {
    let string = result.CompletionString;
    let mut candidate = CompletionCandidate {
        typed_text: String::new(),
        display: String::new(),
        result_type: String::new(),
        kind: CursorKind::from_raw(result.CursorKind),
        brief: None,
        priority: unsafe { clang_getCompletionPriority(string) },
    };
    let chunks = unsafe { clang_getNumCompletionChunks(string) };
    for i in 0..chunks {
        let kind = unsafe { clang_getCompletionChunkKind(string, i) };
        let text = into_string(unsafe { clang_getCompletionChunkText(string, i) });
        match kind {
            CXCompletionChunk_ResultType => candidate.result_type = text,
            CXCompletionChunk_Informative | CXCompletionChunk_Optional => {}
            CXCompletionChunk_TypedText => {
                candidate.display.push_str(&text);
                candidate.typed_text = text;
            }
            _ => candidate.display.push_str(&text),
        }
    }
    let brief = into_string(unsafe { clang_getCompletionBriefComment(string) });
    if !brief.is_empty() {
        candidate.brief = Some(brief);
    }
    candidate
}

impl Ast for ClangUnit {
    type Cursor = CXCursor;
    type Type = CXType;

    fn main_file(&self) -> &str {
        &self.file
    }

    fn cursor_at(&self, line: u32, column: u32) -> CXCursor {
        if line == 0 || column == 0 {
            return self.null_cursor();
        }
        let Ok(name) = c_string(&self.file) else {
            return self.null_cursor();
        };
        unsafe {
            let file = clang_getFile(self.tu, name.as_ptr());
            if file.is_null() {
                return clang_getNullCursor();
            }
            let location = clang_getLocation(self.tu, file, line, column);
            clang_getCursor(self.tu, location)
        }
    }

    fn root(&self) -> CXCursor {
        unsafe { clang_getTranslationUnitCursor(self.tu) }
    }

    fn null_cursor(&self) -> CXCursor {
        unsafe { clang_getNullCursor() }
    }

    fn kind(&self, cursor: CXCursor) -> CursorKind {
        CursorKind::from_raw(unsafe { clang_getCursorKind(cursor) })
    }

    fn spelling(&self, cursor: CXCursor) -> String {
        into_string(unsafe { clang_getCursorSpelling(cursor) })
    }

    fn semantic_parent(&self, cursor: CXCursor) -> CXCursor {
        unsafe { clang_getCursorSemanticParent(cursor) }
    }

    fn lexical_parent(&self, cursor: CXCursor) -> CXCursor {
        unsafe { clang_getCursorLexicalParent(cursor) }
    }

    fn referenced(&self, cursor: CXCursor) -> CXCursor {
        unsafe { clang_getCursorReferenced(cursor) }
    }

    fn definition(&self, cursor: CXCursor) -> CXCursor {
        unsafe { clang_getCursorDefinition(cursor) }
    }

    fn canonical_cursor(&self, cursor: CXCursor) -> CXCursor {
        unsafe { clang_getCanonicalCursor(cursor) }
    }

    fn specialized_template(&self, cursor: CXCursor) -> CXCursor {
        unsafe { clang_getSpecializedCursorTemplate(cursor) }
    }

    fn location(&self, cursor: CXCursor) -> Option<SourceLocation> {
        spelling_location(unsafe { clang_getCursorLocation(cursor) })
    }

    fn extent(&self, cursor: CXCursor) -> Option<Extent> {
        range_extent(unsafe { clang_getCursorExtent(cursor) })
    }

    fn is_definition(&self, cursor: CXCursor) -> bool {
        unsafe { clang_isCursorDefinition(cursor) != 0 }
    }

    fn cursor_type(&self, cursor: CXCursor) -> CXType {
        unsafe { clang_getCursorType(cursor) }
    }

    fn result_type(&self, cursor: CXCursor) -> CXType {
        unsafe { clang_getCursorResultType(cursor) }
    }

    fn type_kind(&self, ty: CXType) -> TypeKind {
        TypeKind::from_raw(ty.kind)
    }

    fn type_spelling(&self, ty: CXType) -> String {
        into_string(unsafe { clang_getTypeSpelling(ty) })
    }

    fn canonical_type(&self, ty: CXType) -> CXType {
        unsafe { clang_getCanonicalType(ty) }
    }

    fn is_const_qualified(&self, ty: CXType) -> bool {
        unsafe { clang_isConstQualifiedType(ty) != 0 }
    }

    fn type_declaration(&self, ty: CXType) -> CXCursor {
        unsafe { clang_getTypeDeclaration(ty) }
    }

    fn brief_comment(&self, cursor: CXCursor) -> Option<String> {
        let text = into_string(unsafe { clang_Cursor_getBriefCommentText(cursor) });
        (!text.is_empty()).then_some(text)
    }

    fn raw_comment(&self, cursor: CXCursor) -> Option<String> {
        let text = into_string(unsafe { clang_Cursor_getRawCommentText(cursor) });
        (!text.is_empty()).then_some(text)
    }

    fn included_file(&self, cursor: CXCursor) -> Option<String> {
        let file = unsafe { clang_getIncludedFile(cursor) };
        (!file.is_null()).then(|| file_name(file))
    }

    fn visit_children(
        &self,
        parent: CXCursor,
        visitor: &mut dyn FnMut(CXCursor) -> ChildVisit,
    ) -> bool {
        let mut visit = Visit {
            visitor,
            panic: None,
        };
        let data = &mut visit as *mut Visit<'_> as CXClientData;
        let broke = unsafe { clang_visitChildren(parent, visit_trampoline, data) != 0 };
        if let Some(payload) = visit.panic {
            resume_unwind(payload);
        }
        broke
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        let count = unsafe { clang_getNumDiagnostics(self.tu) };
        (0..count)
            .map(|i| unsafe {
                let diag = clang_getDiagnostic(self.tu, i);
                let fixits = (0..clang_getDiagnosticNumFixIts(diag))
                    .map(|j| {
                        let mut range = clang_getNullRange();
                        let replacement = into_string(clang_getDiagnosticFixIt(diag, j, &mut range));
                        FixIt {
                            replacement,
                            range: range_extent(range),
                        }
                    })
                    .collect();
                let diagnostic = Diagnostic {
                    severity: Severity::from_raw(clang_getDiagnosticSeverity(diag)),
                    message: into_string(clang_getDiagnosticSpelling(diag)),
                    location: spelling_location(clang_getDiagnosticLocation(diag)),
                    fixits,
                };
                clang_disposeDiagnostic(diag);
                diagnostic
            })
            .collect()
    }

    fn complete_at(&self, line: u32, column: u32) -> Vec<CompletionCandidate> {
        if line == 0 || column == 0 {
            return Vec::new();
        }
        let Ok(name) = c_string(&self.file) else {
            return Vec::new();
        };
        let mut raw_unsaved: Vec<CXUnsavedFile> = self.unsaved.iter().map(Unsaved::raw).collect();
        unsafe {
            let options = clang_defaultCodeCompleteOptions() as CXCodeComplete_Flags
                | CXCodeComplete_IncludeBriefComments;
            let results = clang_codeCompleteAt(
                self.tu,
                name.as_ptr(),
                line,
                column,
                raw_unsaved.as_mut_ptr(),
                raw_unsaved.len() as c_uint,
                options,
            );
            if results.is_null() {
                return Vec::new();
            }
            let candidates = if (*results).Results.is_null() {
                Vec::new()
            } else {
                std::slice::from_raw_parts((*results).Results, (*results).NumResults as usize)
                    .iter()
                    .map(completion_candidate)
                    .collect()
            };
            clang_disposeCodeCompleteResults(results);
            candidates
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A unit parsed from an in-memory buffer, or `None` when libclang is
    /// not installed.
    fn parse(contents: &str) -> Option<ClangUnit> {
        let request = ParseRequest {
            file: "visit.cpp".to_string(),
            args: vec!["-std=c++14".to_string()],
            unsaved: Some(UnsavedFile {
                filename: "visit.cpp".to_string(),
                contents: contents.to_string(),
            }),
            options: ParseOptions::default(),
        };
        match Clang.parse(&request) {
            Err(AstError::FrontEndUnavailable(_)) => None,
            unit => Some(unit.unwrap()),
        }
    }

    #[test]
    fn test_visitor_panic_resurfaces_after_visit() {
        let Some(unit) = parse("int a; int b;") else {
            return;
        };
        let mut seen = 0;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            unit.visit_children(unit.root(), &mut |_| {
                seen += 1;
                panic!("visitor failed");
            })
        }));
        assert!(outcome.is_err());
        assert_eq!(seen, 1);

        // the unit stays usable
        let mut names = Vec::new();
        unit.visit_children(unit.root(), &mut |cursor| {
            names.push(unit.spelling(cursor));
            ChildVisit::Continue
        });
        assert!(names.ends_with(&["a".to_string(), "b".to_string()]));
    }
}
