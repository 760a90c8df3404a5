//! An in-memory AST and front-end.
//!
//! Units are assembled with [`MemoryAstBuilder`] and behave like a parsed
//! translation unit: cursors resolve by position, parents and references are
//! plain links, diagnostics and completion results are canned. The front-end
//! counts index and unit handles so callers can check that every parse is
//! torn down.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::ast::{Ast, ChildVisit, FrontEnd, ParseRequest};
use crate::error::AstError;
use crate::kind::{CursorKind, TypeKind};
use crate::source::{CompletionCandidate, Diagnostic, Extent, SourceLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

/// Cursor into a [`MemoryAst`]; `None` is the null cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryCursor(Option<NodeId>);

impl From<NodeId> for MemoryCursor {
    fn from(id: NodeId) -> Self {
        MemoryCursor(Some(id))
    }
}

/// Type handle; `None` is the invalid type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryType(Option<TypeId>);

#[derive(Debug, Clone)]
struct NodeData {
    kind: CursorKind,
    spelling: String,
    extent: Option<Extent>,
    location: Option<SourceLocation>,
    ty: Option<TypeId>,
    result_type: Option<TypeId>,
    parent: Option<NodeId>,
    semantic_parent: Option<NodeId>,
    lexical_parent: Option<NodeId>,
    children: Vec<NodeId>,
    referenced: Option<NodeId>,
    definition: Option<NodeId>,
    canonical: Option<NodeId>,
    template: Option<NodeId>,
    is_definition: bool,
    brief_comment: Option<String>,
    raw_comment: Option<String>,
    included_file: Option<String>,
}

impl NodeData {
    fn new(kind: CursorKind, spelling: &str, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            spelling: spelling.to_string(),
            extent: None,
            location: None,
            ty: None,
            result_type: None,
            parent,
            semantic_parent: parent,
            lexical_parent: parent,
            children: Vec::new(),
            referenced: None,
            definition: None,
            canonical: None,
            template: None,
            is_definition: false,
            brief_comment: None,
            raw_comment: None,
            included_file: None,
        }
    }
}

#[derive(Debug, Clone)]
struct TypeData {
    kind: TypeKind,
    spelling: String,
    canonical: Option<TypeId>,
    declaration: Option<NodeId>,
    is_const: bool,
}

/// Handles owned by a unit produced through [`MemoryFrontEnd`].
///
/// Fields drop in declaration order: the unit handle goes first, the index
/// after it.
#[derive(Debug)]
struct Lease {
    _unit: Handle,
    _index: Handle,
}

#[derive(Debug)]
struct Handle {
    live: Arc<AtomicUsize>,
}

impl Handle {
    fn acquire(live: &Arc<AtomicUsize>, created: &AtomicUsize) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        created.fetch_add(1, Ordering::SeqCst);
        Self { live: live.clone() }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A translation unit held entirely in memory.
#[derive(Debug)]
pub struct MemoryAst {
    file: String,
    nodes: Vec<NodeData>,
    types: Vec<TypeData>,
    diagnostics: Vec<Diagnostic>,
    completions: Vec<CompletionCandidate>,
    visited: Mutex<Vec<NodeId>>,
    lease: Option<Lease>,
}

impl MemoryAst {
    /// Start building a unit for `file`; the translation-unit node exists
    /// already.
    pub fn builder(file: impl Into<String>) -> MemoryAstBuilder {
        let file = file.into();
        let root = NodeData::new(CursorKind::TranslationUnit, &file, None);
        MemoryAstBuilder {
            ast: MemoryAst {
                file,
                nodes: vec![root],
                types: Vec::new(),
                diagnostics: Vec::new(),
                completions: Vec::new(),
                visited: Mutex::default(),
                lease: None,
            },
        }
    }

    /// Every child handed to a visitor so far, in visiting order.
    pub fn visited(&self) -> Vec<NodeId> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }

    fn node(&self, cursor: MemoryCursor) -> Option<&NodeData> {
        cursor.0.map(|id| &self.nodes[id.0])
    }

    fn link(&self, cursor: MemoryCursor, f: impl Fn(&NodeData) -> Option<NodeId>) -> MemoryCursor {
        MemoryCursor(self.node(cursor).and_then(f))
    }

    fn type_data(&self, ty: MemoryType) -> Option<&TypeData> {
        ty.0.map(|id| &self.types[id.0])
    }

    fn contains(&self, id: NodeId, line: u32, column: u32) -> bool {
        self.nodes[id.0]
            .extent
            .as_ref()
            .is_some_and(|e| e.start.file == self.file && e.contains(line, column))
    }

    fn visit(&self, parent: NodeId, visitor: &mut dyn FnMut(MemoryCursor) -> ChildVisit) -> bool {
        for &child in &self.nodes[parent.0].children {
            if let Ok(mut visited) = self.visited.lock() {
                visited.push(child);
            }
            match visitor(MemoryCursor::from(child)) {
                ChildVisit::Break => return true,
                ChildVisit::Continue => {}
                ChildVisit::Recurse => {
                    if self.visit(child, visitor) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

impl Ast for MemoryAst {
    type Cursor = MemoryCursor;
    type Type = MemoryType;

    fn main_file(&self) -> &str {
        &self.file
    }

    fn cursor_at(&self, line: u32, column: u32) -> MemoryCursor {
        if line == 0 || column == 0 {
            return MemoryCursor(None);
        }
        let mut current = NodeId(0);
        while let Some(&next) = self.nodes[current.0]
            .children
            .iter()
            .find(|&&child| self.contains(child, line, column))
        {
            current = next;
        }
        MemoryCursor::from(current)
    }

    fn root(&self) -> MemoryCursor {
        MemoryCursor::from(NodeId(0))
    }

    fn null_cursor(&self) -> MemoryCursor {
        MemoryCursor(None)
    }

    fn kind(&self, cursor: MemoryCursor) -> CursorKind {
        self.node(cursor)
            .map_or(CursorKind::InvalidFile, |n| n.kind)
    }

    fn spelling(&self, cursor: MemoryCursor) -> String {
        self.node(cursor)
            .map(|n| n.spelling.clone())
            .unwrap_or_default()
    }

    fn semantic_parent(&self, cursor: MemoryCursor) -> MemoryCursor {
        self.link(cursor, |n| n.semantic_parent)
    }

    fn lexical_parent(&self, cursor: MemoryCursor) -> MemoryCursor {
        self.link(cursor, |n| n.lexical_parent)
    }

    fn referenced(&self, cursor: MemoryCursor) -> MemoryCursor {
        self.link(cursor, |n| n.referenced)
    }

    fn definition(&self, cursor: MemoryCursor) -> MemoryCursor {
        self.link(cursor, |n| n.definition)
    }

    fn canonical_cursor(&self, cursor: MemoryCursor) -> MemoryCursor {
        match self.link(cursor, |n| n.canonical) {
            MemoryCursor(None) => cursor,
            canonical => canonical,
        }
    }

    fn specialized_template(&self, cursor: MemoryCursor) -> MemoryCursor {
        self.link(cursor, |n| n.template)
    }

    fn location(&self, cursor: MemoryCursor) -> Option<SourceLocation> {
        let node = self.node(cursor)?;
        node.location
            .clone()
            .or_else(|| node.extent.as_ref().map(|e| e.start.clone()))
    }

    fn extent(&self, cursor: MemoryCursor) -> Option<Extent> {
        self.node(cursor)?.extent.clone()
    }

    fn is_definition(&self, cursor: MemoryCursor) -> bool {
        self.node(cursor).is_some_and(|n| n.is_definition)
    }

    fn cursor_type(&self, cursor: MemoryCursor) -> MemoryType {
        MemoryType(self.node(cursor).and_then(|n| n.ty))
    }

    fn result_type(&self, cursor: MemoryCursor) -> MemoryType {
        MemoryType(self.node(cursor).and_then(|n| n.result_type))
    }

    fn type_kind(&self, ty: MemoryType) -> TypeKind {
        self.type_data(ty).map_or(TypeKind::Invalid, |t| t.kind)
    }

    fn type_spelling(&self, ty: MemoryType) -> String {
        self.type_data(ty)
            .map(|t| t.spelling.clone())
            .unwrap_or_default()
    }

    fn canonical_type(&self, ty: MemoryType) -> MemoryType {
        match self.type_data(ty).and_then(|t| t.canonical) {
            Some(canonical) => MemoryType(Some(canonical)),
            None => ty,
        }
    }

    fn is_const_qualified(&self, ty: MemoryType) -> bool {
        self.type_data(ty).is_some_and(|t| t.is_const)
    }

    fn type_declaration(&self, ty: MemoryType) -> MemoryCursor {
        MemoryCursor(self.type_data(ty).and_then(|t| t.declaration))
    }

    fn brief_comment(&self, cursor: MemoryCursor) -> Option<String> {
        self.node(cursor)?.brief_comment.clone()
    }

    fn raw_comment(&self, cursor: MemoryCursor) -> Option<String> {
        self.node(cursor)?.raw_comment.clone()
    }

    fn included_file(&self, cursor: MemoryCursor) -> Option<String> {
        self.node(cursor)?.included_file.clone()
    }

    fn visit_children(
        &self,
        parent: MemoryCursor,
        visitor: &mut dyn FnMut(MemoryCursor) -> ChildVisit,
    ) -> bool {
        match parent.0 {
            Some(id) => self.visit(id, visitor),
            None => false,
        }
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.clone()
    }

    fn complete_at(&self, line: u32, column: u32) -> Vec<CompletionCandidate> {
        if line == 0 || column == 0 {
            return Vec::new();
        }
        self.completions.clone()
    }
}

/// Builder for [`MemoryAst`].
#[derive(Debug)]
pub struct MemoryAstBuilder {
    ast: MemoryAst,
}

impl MemoryAstBuilder {
    /// The translation-unit node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child of `parent`. Semantic and lexical parent default to
    /// `parent`.
    pub fn node(&mut self, parent: NodeId, kind: CursorKind, spelling: &str) -> NodeMut<'_> {
        let id = NodeId(self.ast.nodes.len());
        self.ast
            .nodes
            .push(NodeData::new(kind, spelling, Some(parent)));
        self.ast.nodes[parent.0].children.push(id);
        NodeMut { builder: self, id }
    }

    /// Reopen an existing node.
    pub fn edit(&mut self, id: NodeId) -> NodeMut<'_> {
        NodeMut { builder: self, id }
    }

    pub fn ty(&mut self, kind: TypeKind, spelling: &str) -> TypeMut<'_> {
        let id = TypeId(self.ast.types.len());
        self.ast.types.push(TypeData {
            kind,
            spelling: spelling.to_string(),
            canonical: None,
            declaration: None,
            is_const: false,
        });
        TypeMut { builder: self, id }
    }

    pub fn edit_type(&mut self, id: TypeId) -> TypeMut<'_> {
        TypeMut { builder: self, id }
    }

    pub fn diagnostic(&mut self, diagnostic: Diagnostic) -> &mut Self {
        self.ast.diagnostics.push(diagnostic);
        self
    }

    pub fn completion(&mut self, candidate: CompletionCandidate) -> &mut Self {
        self.ast.completions.push(candidate);
        self
    }

    pub fn file(&self) -> &str {
        &self.ast.file
    }

    pub fn build(self) -> MemoryAst {
        self.ast
    }
}

/// Editing handle for one node.
#[derive(Debug)]
pub struct NodeMut<'a> {
    builder: &'a mut MemoryAstBuilder,
    id: NodeId,
}

impl NodeMut<'_> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&mut self) -> &mut NodeData {
        &mut self.builder.ast.nodes[self.id.0]
    }

    /// Set the extent from `(line, column, offset)` triples in the unit's
    /// main file.
    pub fn span(mut self, start: (u32, u32, u32), end: (u32, u32, u32)) -> Self {
        let file = self.builder.ast.file.clone();
        self.data().extent = Some(Extent::new(
            SourceLocation::new(file.clone(), start.0, start.1, start.2),
            SourceLocation::new(file, end.0, end.1, end.2),
        ));
        self
    }

    pub fn extent(mut self, extent: Extent) -> Self {
        self.data().extent = Some(extent);
        self
    }

    /// Set the cursor location; defaults to the extent start.
    pub fn location(mut self, location: SourceLocation) -> Self {
        self.data().location = Some(location);
        self
    }

    pub fn ty(mut self, ty: TypeId) -> Self {
        self.data().ty = Some(ty);
        self
    }

    pub fn result_type(mut self, ty: TypeId) -> Self {
        self.data().result_type = Some(ty);
        self
    }

    pub fn semantic_parent(mut self, parent: NodeId) -> Self {
        self.data().semantic_parent = Some(parent);
        self
    }

    pub fn lexical_parent(mut self, parent: NodeId) -> Self {
        self.data().lexical_parent = Some(parent);
        self
    }

    pub fn references(mut self, target: NodeId) -> Self {
        self.data().referenced = Some(target);
        self
    }

    pub fn definition(mut self, target: NodeId) -> Self {
        self.data().definition = Some(target);
        self
    }

    pub fn canonical(mut self, target: NodeId) -> Self {
        self.data().canonical = Some(target);
        self
    }

    pub fn template(mut self, target: NodeId) -> Self {
        self.data().template = Some(target);
        self
    }

    pub fn is_definition(mut self) -> Self {
        self.data().is_definition = true;
        self
    }

    pub fn brief_comment(mut self, text: &str) -> Self {
        self.data().brief_comment = Some(text.to_string());
        self
    }

    pub fn raw_comment(mut self, text: &str) -> Self {
        self.data().raw_comment = Some(text.to_string());
        self
    }

    pub fn includes(mut self, path: &str) -> Self {
        self.data().included_file = Some(path.to_string());
        self
    }
}

/// Editing handle for one type.
#[derive(Debug)]
pub struct TypeMut<'a> {
    builder: &'a mut MemoryAstBuilder,
    id: TypeId,
}

impl TypeMut<'_> {
    pub fn id(&self) -> TypeId {
        self.id
    }

    fn data(&mut self) -> &mut TypeData {
        &mut self.builder.ast.types[self.id.0]
    }

    pub fn canonical(mut self, canonical: TypeId) -> Self {
        self.data().canonical = Some(canonical);
        self
    }

    pub fn declared_by(mut self, node: NodeId) -> Self {
        self.data().declaration = Some(node);
        self
    }

    pub fn is_const(mut self) -> Self {
        self.data().is_const = true;
        self
    }
}

type Fixture = dyn Fn(&ParseRequest) -> Option<MemoryAst> + Send + Sync;

/// Live and total counts of the handles a [`MemoryFrontEnd`] handed out.
#[derive(Debug, Default)]
pub struct HandleCounters {
    live_indexes: Arc<AtomicUsize>,
    live_units: Arc<AtomicUsize>,
    indexes_created: AtomicUsize,
    units_created: AtomicUsize,
}

impl HandleCounters {
    pub fn live_indexes(&self) -> usize {
        self.live_indexes.load(Ordering::SeqCst)
    }

    pub fn live_units(&self) -> usize {
        self.live_units.load(Ordering::SeqCst)
    }

    pub fn indexes_created(&self) -> usize {
        self.indexes_created.load(Ordering::SeqCst)
    }

    pub fn units_created(&self) -> usize {
        self.units_created.load(Ordering::SeqCst)
    }
}

/// Front-end whose parses are answered by a fixture function.
///
/// The fixture returning `None` plays the part of a failed parse.
pub struct MemoryFrontEnd {
    fixture: Box<Fixture>,
    counters: Arc<HandleCounters>,
}

impl MemoryFrontEnd {
    pub fn new(
        fixture: impl Fn(&ParseRequest) -> Option<MemoryAst> + Send + Sync + 'static,
    ) -> Self {
        Self {
            fixture: Box::new(fixture),
            counters: Arc::new(HandleCounters::default()),
        }
    }

    pub fn counters(&self) -> Arc<HandleCounters> {
        self.counters.clone()
    }
}

impl std::fmt::Debug for MemoryFrontEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryFrontEnd")
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl FrontEnd for MemoryFrontEnd {
    type Unit = MemoryAst;

    fn parse(&self, request: &ParseRequest) -> Result<MemoryAst, AstError> {
        let counters = &self.counters;
        let index = Handle::acquire(&counters.live_indexes, &counters.indexes_created);
        let Some(mut ast) = (self.fixture)(request) else {
            return Err(AstError::ParseFailed(request.file.clone()));
        };
        let unit = Handle::acquire(&counters.live_units, &counters.units_created);
        ast.lease = Some(Lease {
            _unit: unit,
            _index: index,
        });
        Ok(ast)
    }

    fn version(&self) -> String {
        "in-memory front-end".to_string()
    }
}
