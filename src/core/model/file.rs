//! Per-file record: imports, exports, type declarations and the top-level
//! variable tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::EntityId;
use super::location::Location;
use super::types::TypeDeclaration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    Default,
    Named,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBinding {
    pub local_name: String,
    /// `None` for default and namespace imports.
    pub imported_name: Option<String>,
    /// Resolved file key, or the literal specifier for externals.
    pub source: String,
    pub kind: ImportKind,
    pub is_type: bool,
    pub is_dependency: bool,
    pub loc: Location,
}

impl ImportBinding {
    /// Name under which the binding's target is registered in its source file.
    pub fn target_name(&self) -> &str {
        match self.kind {
            ImportKind::Default => "default",
            ImportKind::Named => self.imported_name.as_deref().unwrap_or(&self.local_name),
            ImportKind::Namespace => &self.local_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportKind {
    Value,
    Type,
    Component,
    Function,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportForm {
    Default,
    Named,
    Namespace,
    Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBinding {
    pub id: EntityId,
    pub name: String,
    pub kind: ExportKind,
    pub form: ExportForm,
    /// Re-export source file key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// The analysis-time record of one file. Variables are stored in the arena;
/// `variables` lists the top-level ids in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub path: String,
    pub imports: BTreeMap<String, ImportBinding>,
    pub exports: BTreeMap<String, ExportBinding>,
    pub default_export: Option<EntityId>,
    pub types: BTreeMap<String, TypeDeclaration>,
    pub variables: Vec<EntityId>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}
