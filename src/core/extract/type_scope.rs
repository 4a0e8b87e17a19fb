//! Lexical lookup of type aliases and interfaces.
//!
//! A pre-pass over the module records every type declaration together with
//! the span of the block that declares it. A name is visible at a position
//! when the position lies inside that block; the innermost block wins.

use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{BlockStmt, Module, TsInterfaceDecl, TsModuleBlock, TsTypeAliasDecl};
use swc_ecma_visit::{Visit, VisitWith};

#[derive(Debug, Clone)]
pub enum ScopedDecl {
    Interface(TsInterfaceDecl),
    Alias(TsTypeAliasDecl),
}

impl ScopedDecl {
    pub fn name(&self) -> &str {
        match self {
            ScopedDecl::Interface(decl) => decl.id.sym.as_str(),
            ScopedDecl::Alias(decl) => decl.id.sym.as_str(),
        }
    }

    /// Identity of the declaration, used for cycle detection.
    pub fn position(&self) -> BytePos {
        match self {
            ScopedDecl::Interface(decl) => decl.span.lo,
            ScopedDecl::Alias(decl) => decl.span.lo,
        }
    }
}

#[derive(Debug)]
struct Entry {
    scope: Span,
    decl: ScopedDecl,
}

#[derive(Debug, Default)]
pub struct TypeScope {
    entries: Vec<Entry>,
}

impl TypeScope {
    pub fn collect(module: &Module) -> Self {
        let mut collector = ScopeCollector {
            scopes: vec![Span::new(BytePos(0), BytePos(u32::MAX))],
            entries: Vec::new(),
        };
        module.visit_with(&mut collector);
        Self {
            entries: collector.entries,
        }
    }

    /// Innermost declaration named `name` visible at `at`.
    pub fn lookup(&self, name: &str, at: BytePos) -> Option<&ScopedDecl> {
        self.entries
            .iter()
            .filter(|e| e.decl.name() == name && e.scope.lo <= at && at <= e.scope.hi)
            .min_by_key(|e| e.scope.hi.0 - e.scope.lo.0)
            .map(|e| &e.decl)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct ScopeCollector {
    scopes: Vec<Span>,
    entries: Vec<Entry>,
}

impl ScopeCollector {
    fn current(&self) -> Span {
        self.scopes
            .last()
            .copied()
            .unwrap_or_else(|| Span::new(BytePos(0), BytePos(u32::MAX)))
    }

    fn record(&mut self, decl: ScopedDecl) {
        let scope = self.current();
        self.entries.push(Entry { scope, decl });
    }
}

impl Visit for ScopeCollector {
    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.scopes.push(node.span());
        node.visit_children_with(self);
        self.scopes.pop();
    }

    fn visit_ts_module_block(&mut self, node: &TsModuleBlock) {
        self.scopes.push(node.span());
        node.visit_children_with(self);
        self.scopes.pop();
    }

    fn visit_ts_interface_decl(&mut self, node: &TsInterfaceDecl) {
        self.record(ScopedDecl::Interface(node.clone()));
        node.visit_children_with(self);
    }

    fn visit_ts_type_alias_decl(&mut self, node: &TsTypeAliasDecl) {
        self.record(ScopedDecl::Alias(node.clone()));
        node.visit_children_with(self);
    }
}
