//! Module-level facts gathered before the main traversal.

use std::collections::HashSet;

use swc_ecma_ast::{
    ArrowExpr, Decl, DefaultDecl, ExportSpecifier, Expr, FnDecl, Function, ImportSpecifier,
    Module, ModuleDecl, ModuleItem, Stmt, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::extract::helpers::{export_name, extract_binding_names};

#[derive(Debug, Default)]
pub struct ModuleFacts {
    /// Local names exported from the module, under any exported name.
    pub exported: HashSet<String>,
    /// Names bound at module level: imports and top-level declarations.
    pub module_names: HashSet<String>,
    /// Names declared inside some function body. A tag outside this set can
    /// never be shadowed by a later, hoisted local definition.
    pub nested_names: HashSet<String>,
}

impl ModuleFacts {
    pub fn collect(module: &Module) -> Self {
        let mut facts = Self::default();
        for item in &module.body {
            match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    for spec in &import.specifiers {
                        let local = match spec {
                            ImportSpecifier::Named(named) => &named.local,
                            ImportSpecifier::Default(default) => &default.local,
                            ImportSpecifier::Namespace(ns) => &ns.local,
                        };
                        facts.module_names.insert(local.sym.to_string());
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    for name in decl_names(&export.decl) {
                        facts.exported.insert(name.clone());
                        facts.module_names.insert(name);
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(named)) if named.src.is_none() => {
                    for spec in &named.specifiers {
                        if let ExportSpecifier::Named(named) = spec {
                            facts.exported.insert(export_name(&named.orig));
                        }
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(default)) => {
                    if let Expr::Ident(ident) = &*default.expr {
                        facts.exported.insert(ident.sym.to_string());
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(default)) => {
                    let ident = match &default.decl {
                        DefaultDecl::Fn(f) => f.ident.as_ref(),
                        DefaultDecl::Class(c) => c.ident.as_ref(),
                        DefaultDecl::TsInterfaceDecl(_) => None,
                    };
                    if let Some(ident) = ident {
                        facts.module_names.insert(ident.sym.to_string());
                    }
                }
                ModuleItem::Stmt(Stmt::Decl(decl)) => {
                    facts.module_names.extend(decl_names(decl));
                }
                _ => {}
            }
        }
        let mut nested = NestedNames::default();
        module.visit_with(&mut nested);
        facts.nested_names = nested.names;
        facts
    }
}

#[derive(Default)]
struct NestedNames {
    depth: usize,
    names: HashSet<String>,
}

impl NestedNames {
    fn enter(&mut self, walk: impl FnOnce(&mut Self)) {
        self.depth += 1;
        walk(self);
        self.depth -= 1;
    }
}

impl Visit for NestedNames {
    fn visit_fn_decl(&mut self, node: &FnDecl) {
        if self.depth > 0 {
            self.names.insert(node.ident.sym.to_string());
        }
        node.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if self.depth > 0 {
            self.names.extend(extract_binding_names(&node.name));
        }
        node.visit_children_with(self);
    }

    fn visit_function(&mut self, node: &Function) {
        self.enter(|this| node.visit_children_with(this));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.enter(|this| node.visit_children_with(this));
    }
}

/// Names a declaration binds.
pub fn decl_names(decl: &Decl) -> Vec<String> {
    match decl {
        Decl::Fn(f) => vec![f.ident.sym.to_string()],
        Decl::Class(c) => vec![c.ident.sym.to_string()],
        Decl::Var(var) => var
            .decls
            .iter()
            .flat_map(|d| extract_binding_names(&d.name))
            .collect(),
        Decl::TsInterface(i) => vec![i.id.sym.to_string()],
        Decl::TsTypeAlias(a) => vec![a.id.sym.to_string()],
        Decl::TsEnum(e) => vec![e.id.sym.to_string()],
        _ => vec![],
    }
}
