//! Export handling.
//!
//! Local exports (`export const A`, `export { A as B }`, `export default A`)
//! are collected during the walk and bound to ids once the file is done, so
//! an export may precede its declaration. Re-exports reserve the id of the
//! target `(name, source)` key and alias it under this file.

use swc_ecma_ast::{
    Decl, DefaultDecl, ExportAll, ExportDecl, ExportDefaultDecl, ExportDefaultExpr,
    ExportSpecifier, Expr, Ident, NamedExport,
};

use super::collector::{FileCollector, LocalExport};
use super::declarations::FunctionSite;
use super::prepass::decl_names;
use crate::core::deferred::{Unresolved, UnresolvedKind};
use crate::core::extract::helpers::{IdentCollector, export_name, unwrap_ts_expr};
use crate::core::extract::{FnRef, unwrap_function};
use crate::core::model::{
    ComponentCategory, EntityId, ExportBinding, ExportForm, ExportKind, IdentityKey,
};
use crate::core::registry::DEFAULT_EXPORT;
use crate::error::AnalysisResult;

const NAMESPACE_KEY: &str = "*";

fn export_shape(exported: &str, type_only: bool) -> (ExportKind, ExportForm) {
    if type_only {
        (ExportKind::Type, ExportForm::Type)
    } else if exported == DEFAULT_EXPORT {
        (ExportKind::Value, ExportForm::Default)
    } else {
        (ExportKind::Value, ExportForm::Named)
    }
}

/// The identifier at the core of `memo(observer(Button))`.
fn wrapped_ident(expr: &Expr) -> Option<&Ident> {
    match unwrap_ts_expr(expr) {
        Expr::Ident(ident) => Some(ident),
        Expr::Call(call) => call
            .args
            .first()
            .filter(|arg| arg.spread.is_none())
            .and_then(|arg| wrapped_ident(&arg.expr)),
        _ => None,
    }
}

impl FileCollector<'_> {
    pub(super) fn insert_export(&mut self, key: String, export: ExportBinding) {
        if let Some(file) = self.registry.file_mut(&self.file) {
            if export.name == DEFAULT_EXPORT {
                file.default_export = Some(export.id);
            }
            file.exports.insert(key, export);
        }
    }

    pub(super) fn on_export_decl(&mut self, node: &ExportDecl) -> AnalysisResult<()> {
        let (kind, form) = match &node.decl {
            Decl::Class(_) => (ExportKind::Class, ExportForm::Named),
            Decl::TsInterface(_) | Decl::TsTypeAlias(_) => (ExportKind::Type, ExportForm::Type),
            _ => (ExportKind::Value, ExportForm::Named),
        };
        for name in decl_names(&node.decl) {
            self.local_exports.push(LocalExport {
                exported: name.clone(),
                local: name,
                kind,
                form,
            });
        }
        Ok(())
    }

    pub(super) fn on_named_export(&mut self, node: &NamedExport) -> AnalysisResult<()> {
        let source = node.src.as_deref().map(|src| {
            let specifier = src.value.to_string_lossy().to_string();
            self.resolver.resolve(&specifier, &self.file)
        });

        for spec in &node.specifiers {
            let (orig, exported, type_only) = match spec {
                ExportSpecifier::Named(named) => {
                    let orig = export_name(&named.orig);
                    let exported = named
                        .exported
                        .as_ref()
                        .map(export_name)
                        .unwrap_or_else(|| orig.clone());
                    (orig, exported, named.is_type_only)
                }
                ExportSpecifier::Default(default) => {
                    (DEFAULT_EXPORT.to_string(), default.exported.sym.to_string(), false)
                }
                ExportSpecifier::Namespace(ns) => {
                    let Some(source) = &source else {
                        continue;
                    };
                    let exported = export_name(&ns.name);
                    let id = self.registry.reserve(IdentityKey::new(NAMESPACE_KEY, source));
                    let id = self
                        .registry
                        .alias(IdentityKey::new(exported.as_str(), self.file.as_str()), id);
                    self.insert_export(
                        exported.clone(),
                        ExportBinding {
                            id,
                            name: exported,
                            kind: ExportKind::Value,
                            form: ExportForm::Namespace,
                            source: Some(source.clone()),
                        },
                    );
                    continue;
                }
            };

            let (kind, form) = export_shape(&exported, type_only || node.type_only);
            match &source {
                Some(source) => {
                    let id = self.registry.reserve(IdentityKey::new(orig, source));
                    let id = self
                        .registry
                        .alias(IdentityKey::new(exported.as_str(), self.file.as_str()), id);
                    self.insert_export(
                        exported.clone(),
                        ExportBinding {
                            id,
                            name: exported,
                            kind,
                            form,
                            source: Some(source.clone()),
                        },
                    );
                }
                None => self.local_exports.push(LocalExport {
                    exported,
                    local: orig,
                    kind,
                    form,
                }),
            }
        }
        Ok(())
    }

    /// `export * from './x'` is recorded but never expanded.
    pub(super) fn on_export_all(&mut self, node: &ExportAll) -> AnalysisResult<()> {
        let specifier = node.src.value.to_string_lossy().to_string();
        let source = self.resolver.resolve(&specifier, &self.file);
        let loc = self.locate(node.span, "export all")?;
        let id = self.registry.reserve(IdentityKey::new(NAMESPACE_KEY, source.as_str()));
        self.insert_export(
            format!("{NAMESPACE_KEY}:{source}"),
            ExportBinding {
                id,
                name: NAMESPACE_KEY.to_string(),
                kind: ExportKind::Value,
                form: ExportForm::Namespace,
                source: Some(source.clone()),
            },
        );
        tracing::debug!("not expanding 'export *' from {} in {}", source, self.file);
        self.registry.report_unresolved(Unresolved {
            kind: UnresolvedKind::ExportAll,
            name: NAMESPACE_KEY.to_string(),
            target: Some(source),
            file: self.file.clone(),
            loc,
        });
        Ok(())
    }

    pub(super) fn on_export_default_decl(&mut self, node: &ExportDefaultDecl) -> AnalysisResult<()> {
        match &node.decl {
            DefaultDecl::Fn(fn_expr) => {
                let function = FnRef::Function(&fn_expr.function);
                if !function.has_body() {
                    return Ok(());
                }
                let name = fn_expr
                    .ident
                    .as_ref()
                    .map_or_else(|| DEFAULT_EXPORT.to_string(), |ident| ident.sym.to_string());
                let loc = self.locate(fn_expr.function.span, "default export declaration")?;
                let dependencies =
                    self.dependencies(IdentCollector::collect(&*fn_expr.function), &name);
                self.register_function(FunctionSite {
                    name,
                    function,
                    category: ComponentCategory::Function,
                    wrappers: Vec::new(),
                    binding: None,
                    loc,
                    default_export: true,
                    dependencies,
                })
            }
            DefaultDecl::Class(class) => {
                let id = self
                    .registry
                    .reserve(IdentityKey::new(DEFAULT_EXPORT, self.file.as_str()));
                if let Some(ident) = &class.ident {
                    self.registry
                        .alias(IdentityKey::new(ident.sym.to_string(), self.file.as_str()), id);
                }
                self.insert_default(id, ExportKind::Class);
                Ok(())
            }
            DefaultDecl::TsInterfaceDecl(_) => {
                let id = self
                    .registry
                    .reserve(IdentityKey::new(DEFAULT_EXPORT, self.file.as_str()));
                self.insert_default(id, ExportKind::Type);
                Ok(())
            }
        }
    }

    pub(super) fn on_export_default_expr(&mut self, node: &ExportDefaultExpr) -> AnalysisResult<()> {
        if let Some(unwrapped) = unwrap_function(&node.expr) {
            let category = if unwrapped.wrappers.is_empty() {
                ComponentCategory::Expression
            } else {
                ComponentCategory::Wrapped
            };
            let loc = self.locate(node.span, "default export expression")?;
            let dependencies = self.dependencies(IdentCollector::collect(&*node.expr), DEFAULT_EXPORT);
            return self.register_function(FunctionSite {
                name: DEFAULT_EXPORT.to_string(),
                function: unwrapped.function,
                category,
                wrappers: unwrapped.wrappers,
                binding: None,
                loc,
                default_export: true,
                dependencies,
            });
        }

        if let Some(ident) = wrapped_ident(&node.expr) {
            self.local_exports.push(LocalExport {
                exported: DEFAULT_EXPORT.to_string(),
                local: ident.sym.to_string(),
                kind: ExportKind::Value,
                form: ExportForm::Default,
            });
            return Ok(());
        }

        let id = self
            .registry
            .reserve(IdentityKey::new(DEFAULT_EXPORT, self.file.as_str()));
        self.insert_default(id, ExportKind::Value);
        Ok(())
    }

    fn insert_default(&mut self, id: EntityId, kind: ExportKind) {
        self.insert_export(
            DEFAULT_EXPORT.to_string(),
            ExportBinding {
                id,
                name: DEFAULT_EXPORT.to_string(),
                kind,
                form: ExportForm::Default,
                source: None,
            },
        );
    }

    pub(super) fn bind_local_exports(&mut self) {
        for export in std::mem::take(&mut self.local_exports) {
            let key = IdentityKey::new(export.local.as_str(), self.file.as_str());
            let id = match self.registry.lookup(&key) {
                Some(id) => id,
                None => self.registry.reserve(key),
            };
            let id = if export.exported == export.local {
                id
            } else {
                self.registry
                    .alias(IdentityKey::new(export.exported.as_str(), self.file.as_str()), id)
            };
            let is_type = self
                .registry
                .file(&self.file)
                .is_some_and(|file| file.types.contains_key(&export.local));
            let (kind, form) = if is_type && export.form != ExportForm::Default {
                (ExportKind::Type, ExportForm::Type)
            } else {
                (export.kind, export.form)
            };
            self.insert_export(
                export.exported.clone(),
                ExportBinding {
                    id,
                    name: export.exported,
                    kind,
                    form,
                    source: None,
                },
            );
        }
    }
}
