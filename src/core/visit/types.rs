use swc_ecma_ast::{TsInterfaceDecl, TsTypeAliasDecl};

use super::collector::FileCollector;
use crate::core::model::TypeDeclaration;
use crate::error::AnalysisResult;

// Only module-level declarations are part of the file record; local ones
// are still reachable through the type scope when props reference them.
impl FileCollector<'_> {
    pub(super) fn on_type_alias(&mut self, node: &TsTypeAliasDecl) -> AnalysisResult<()> {
        if self.in_function() {
            return Ok(());
        }
        let decl = self.types.alias(node, &self.locator)?;
        self.insert_type(decl);
        Ok(())
    }

    pub(super) fn on_interface(&mut self, node: &TsInterfaceDecl) -> AnalysisResult<()> {
        if self.in_function() {
            return Ok(());
        }
        let decl = self.types.interface(node, &self.locator)?;
        self.insert_type(decl);
        Ok(())
    }

    fn insert_type(&mut self, decl: TypeDeclaration) {
        if let Some(file) = self.registry.file_mut(&self.file) {
            file.types.insert(decl.name().to_string(), decl);
        }
    }
}
