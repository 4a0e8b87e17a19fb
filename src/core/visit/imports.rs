use swc_ecma_ast::{ImportDecl, ImportSpecifier};

use super::collector::FileCollector;
use crate::core::extract::helpers::export_name;
use crate::core::model::{ImportBinding, ImportKind};
use crate::error::AnalysisResult;

impl FileCollector<'_> {
    pub(super) fn on_import(&mut self, node: &ImportDecl) -> AnalysisResult<()> {
        let specifier = node.src.value.to_string_lossy().to_string();
        let is_dependency = self.resolver.is_dependency(&specifier);
        let source = self.resolver.resolve(&specifier, &self.file);

        for spec in &node.specifiers {
            let (local, imported, kind, type_only, span) = match spec {
                ImportSpecifier::Named(named) => {
                    let local = named.local.sym.to_string();
                    let imported = named
                        .imported
                        .as_ref()
                        .map(export_name)
                        .unwrap_or_else(|| local.clone());
                    (local, Some(imported), ImportKind::Named, named.is_type_only, named.span)
                }
                ImportSpecifier::Default(default) => (
                    default.local.sym.to_string(),
                    None,
                    ImportKind::Default,
                    false,
                    default.span,
                ),
                ImportSpecifier::Namespace(ns) => (
                    ns.local.sym.to_string(),
                    None,
                    ImportKind::Namespace,
                    false,
                    ns.span,
                ),
            };
            let loc = self.locate(span, "import specifier")?;
            let binding = ImportBinding {
                local_name: local.clone(),
                imported_name: imported,
                source: source.clone(),
                kind,
                is_type: node.type_only || type_only,
                is_dependency,
                loc,
            };
            if let Some(file) = self.registry.file_mut(&self.file) {
                file.imports.insert(local, binding);
            }
        }
        Ok(())
    }
}
