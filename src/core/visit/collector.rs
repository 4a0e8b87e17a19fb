//! Per-file traversal state and node-kind dispatch.
//!
//! The collector walks one module with [`swc_ecma_visit::Visit`], converts
//! each handled node into a [`NodeEvent`] and routes it through
//! [`FileCollector::dispatch`]. Lexical nesting is tracked as a stack of
//! [`Frame`]s: named functions and value bindings push a frame under their
//! own name, anonymous functions push one named after their position.

use std::collections::HashSet;

use swc_common::{BytePos, Span};
use swc_ecma_ast::{
    ArrowExpr, CallExpr, ExportAll, ExportDecl, ExportDefaultDecl, ExportDefaultExpr, FnDecl,
    Function, ImportDecl, JSXElement, NamedExport, TsInterfaceDecl, TsTypeAliasDecl,
    VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::event::NodeEvent;
use super::prepass::ModuleFacts;
use crate::core::extract::TypeExtractor;
use crate::core::model::{
    EntityId, ExportForm, ExportKind, IdentityKey, ImportBinding, Location, Locator, VariableKind,
};
use crate::core::registry::Registry;
use crate::core::resolve::ModuleResolver;
use crate::error::{AnalysisError, AnalysisResult};

/// The registered variable a frame belongs to.
#[derive(Debug, Clone, Copy)]
pub(super) struct Owner {
    pub(super) id: EntityId,
    pub(super) kind: VariableKind,
    pub(super) loc: Location,
}

#[derive(Debug)]
pub(super) struct Frame {
    pub(super) name: String,
    /// `None` for anonymous functions and unregistered hook-named functions.
    pub(super) owner: Option<Owner>,
    pub(super) function: bool,
}

/// An export of a local binding, bound to an id once the file is walked.
#[derive(Debug)]
pub(super) struct LocalExport {
    pub(super) exported: String,
    pub(super) local: String,
    pub(super) kind: ExportKind,
    pub(super) form: ExportForm,
}

pub struct FileCollector<'a> {
    pub(super) registry: &'a mut Registry,
    pub(super) resolver: &'a ModuleResolver,
    pub(super) facts: &'a ModuleFacts,
    pub(super) locator: Locator<'a>,
    pub(super) types: TypeExtractor<'a>,
    pub(super) hook_prefix: &'a str,
    pub(super) file: String,
    pub(super) frames: Vec<Frame>,
    /// Start positions of functions already bound to a named frame.
    pub(super) named_fns: HashSet<BytePos>,
    pub(super) local_exports: Vec<LocalExport>,
    error: Option<AnalysisError>,
}

impl<'a> FileCollector<'a> {
    pub fn new(
        registry: &'a mut Registry,
        resolver: &'a ModuleResolver,
        facts: &'a ModuleFacts,
        locator: Locator<'a>,
        types: TypeExtractor<'a>,
        hook_prefix: &'a str,
        file: &str,
    ) -> Self {
        registry.begin_file(file);
        Self {
            registry,
            resolver,
            facts,
            locator,
            types,
            hook_prefix,
            file: file.to_string(),
            frames: Vec::new(),
            named_fns: HashSet::new(),
            local_exports: Vec::new(),
            error: None,
        }
    }

    /// Bind local exports and surface the first fatal error of the walk.
    pub fn finish(mut self) -> AnalysisResult<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.bind_local_exports();
        Ok(())
    }

    fn dispatch(&mut self, event: NodeEvent<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = match event {
            NodeEvent::Import(node) => self.on_import(node),
            NodeEvent::ExportNamed(node) => self.on_named_export(node),
            NodeEvent::ExportAll(node) => self.on_export_all(node),
            NodeEvent::ExportDecl(node) => self.on_export_decl(node),
            NodeEvent::ExportDefaultDecl(node) => self.on_export_default_decl(node),
            NodeEvent::ExportDefaultExpr(node) => self.on_export_default_expr(node),
            NodeEvent::FnDecl(node) => self.on_fn_decl(node),
            NodeEvent::VarDeclarator(node) => self.on_var_declarator(node),
            NodeEvent::JsxElement(node) => self.on_jsx_element(node),
            NodeEvent::Call(node) => self.on_call(node),
            NodeEvent::TypeAlias(node) => self.on_type_alias(node),
            NodeEvent::Interface(node) => self.on_interface(node),
        };
        if let Err(err) = result {
            tracing::debug!("{} handler failed in {}: {}", event.kind(), self.file, err);
            self.error = Some(err);
        }
    }

    /// Run `walk`, then drop every frame it pushed.
    fn scoped(&mut self, walk: impl FnOnce(&mut Self)) {
        let depth = self.frames.len();
        walk(self);
        self.frames.truncate(depth);
    }

    fn enter_function(&mut self, span: Span, walk: impl FnOnce(&mut Self)) {
        if self.named_fns.remove(&span.lo) {
            walk(self);
            return;
        }
        let loc = match self.locate(span, "function") {
            Ok(loc) => loc,
            Err(err) => {
                self.error.get_or_insert(err);
                return;
            }
        };
        self.scoped(|this| {
            this.frames.push(Frame {
                name: format!("@{loc}"),
                owner: None,
                function: true,
            });
            walk(this);
        });
    }

    // === Scope queries ===

    pub(super) fn locate(&self, span: Span, node: &'static str) -> AnalysisResult<Location> {
        self.locator.locate(span, node)
    }

    pub(super) fn in_function(&self) -> bool {
        self.frames.iter().any(|frame| frame.function)
    }

    /// Identity key of `name` declared at the current nesting.
    pub(super) fn key(&self, name: &str) -> IdentityKey {
        let mut qualified = String::new();
        for frame in &self.frames {
            qualified.push_str(&frame.name);
            qualified.push('.');
        }
        qualified.push_str(name);
        IdentityKey::new(qualified, self.file.as_str())
    }

    /// Keys `name` may denote from here, innermost scope first.
    pub(super) fn scoped_candidates(&self, name: &str) -> Vec<IdentityKey> {
        let mut candidates: Vec<IdentityKey> = (1..=self.frames.len())
            .rev()
            .map(|depth| {
                let path: Vec<&str> = self.frames[..depth].iter().map(|f| f.name.as_str()).collect();
                IdentityKey::new(format!("{}.{}", path.join("."), name), self.file.as_str())
            })
            .collect();
        candidates.push(IdentityKey::new(name, self.file.as_str()));
        candidates
    }

    /// Nearest enclosing registered variable.
    pub(super) fn nearest_owner(&self) -> Option<Owner> {
        self.frames.iter().rev().find_map(|frame| frame.owner)
    }

    /// Nearest enclosing component or hook.
    pub(super) fn logic_owner(&self) -> Option<Owner> {
        self.frames
            .iter()
            .rev()
            .filter_map(|frame| frame.owner)
            .find(|owner| matches!(owner.kind, VariableKind::Component | VariableKind::Hook))
    }

    pub(super) fn import_binding(&self, local: &str) -> Option<&ImportBinding> {
        self.registry
            .file(&self.file)
            .and_then(|file| file.imports.get(local))
    }

    /// Referenced names bound at module level, excluding the variable itself.
    pub(super) fn dependencies(&self, names: Vec<String>, own: &str) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| name != own && self.facts.module_names.contains(name))
            .collect()
    }
}

impl Visit for FileCollector<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        self.dispatch(NodeEvent::Import(node));
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        self.dispatch(NodeEvent::ExportNamed(node));
    }

    fn visit_export_all(&mut self, node: &ExportAll) {
        self.dispatch(NodeEvent::ExportAll(node));
    }

    fn visit_export_decl(&mut self, node: &ExportDecl) {
        self.dispatch(NodeEvent::ExportDecl(node));
        node.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        self.scoped(|this| {
            this.dispatch(NodeEvent::ExportDefaultDecl(node));
            node.visit_children_with(this);
        });
    }

    fn visit_export_default_expr(&mut self, node: &ExportDefaultExpr) {
        self.scoped(|this| {
            this.dispatch(NodeEvent::ExportDefaultExpr(node));
            node.visit_children_with(this);
        });
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        self.scoped(|this| {
            this.dispatch(NodeEvent::FnDecl(node));
            node.visit_children_with(this);
        });
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        self.scoped(|this| {
            this.dispatch(NodeEvent::VarDeclarator(node));
            node.visit_children_with(this);
        });
    }

    fn visit_function(&mut self, node: &Function) {
        self.enter_function(node.span, |this| node.visit_children_with(this));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.enter_function(node.span, |this| node.visit_children_with(this));
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        self.dispatch(NodeEvent::JsxElement(node));
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        self.dispatch(NodeEvent::Call(node));
        node.visit_children_with(self);
    }

    fn visit_ts_type_alias_decl(&mut self, node: &TsTypeAliasDecl) {
        self.dispatch(NodeEvent::TypeAlias(node));
    }

    fn visit_ts_interface_decl(&mut self, node: &TsInterfaceDecl) {
        self.dispatch(NodeEvent::Interface(node));
    }
}
