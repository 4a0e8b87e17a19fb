//! The serialized analysis result.
//!
//! Every id in the document is canonical: ids unified during analysis are
//! rewritten to the surviving id.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::deferred::Unresolved;
use crate::core::edges::{DependencyEdge, build_edges};
use crate::core::model::{
    DeclarationKind, EntityId, ExportBinding, ImportBinding, Location, TypeDeclaration,
    VariableDetails,
};
use crate::core::registry::Registry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub src: String,
    pub files: BTreeMap<String, FileRecord>,
    pub edges: Vec<DependencyEdge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<Unresolved>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub imports: BTreeMap<String, ImportBinding>,
    pub exports: BTreeMap<String, ExportBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_export: Option<EntityId>,
    pub types: BTreeMap<String, TypeDeclaration>,
    pub variables: Vec<VariableNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableNode {
    pub id: EntityId,
    pub name: String,
    pub declaration: DeclarationKind,
    pub loc: Location,
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VariableNode>,
    pub details: VariableDetails,
}

impl Document {
    pub fn build(src: &str, registry: &Registry) -> Self {
        let files = registry
            .files()
            .iter()
            .map(|(path, file)| {
                let record = FileRecord {
                    imports: file.imports.clone(),
                    exports: file
                        .exports
                        .iter()
                        .map(|(name, export)| {
                            let mut export = export.clone();
                            export.id = registry.canonical(export.id);
                            (name.clone(), export)
                        })
                        .collect(),
                    default_export: file.default_export.map(|id| registry.canonical(id)),
                    types: file.types.clone(),
                    variables: file
                        .variables
                        .iter()
                        .filter_map(|&id| variable_node(registry, id))
                        .collect(),
                };
                (path.clone(), record)
            })
            .collect();

        Self {
            src: src.to_string(),
            files,
            edges: build_edges(registry),
            unresolved: registry.unresolved().to_vec(),
        }
    }

    pub fn component_count(&self) -> usize {
        self.count(|d| matches!(d, VariableDetails::Component(_)))
    }

    pub fn hook_count(&self) -> usize {
        self.count(|d| matches!(d, VariableDetails::Hook(_)))
    }

    fn count(&self, predicate: impl Fn(&VariableDetails) -> bool + Copy) -> usize {
        fn walk(nodes: &[VariableNode], predicate: impl Fn(&VariableDetails) -> bool + Copy) -> usize {
            nodes
                .iter()
                .map(|n| usize::from(predicate(&n.details)) + walk(&n.children, predicate))
                .sum()
        }
        self.files
            .values()
            .map(|file| walk(&file.variables, predicate))
            .sum()
    }

    /// Write the document as pretty-printed JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize graph")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}

fn variable_node(registry: &Registry, id: EntityId) -> Option<VariableNode> {
    let variable = registry.variable(id)?;
    let mut details = variable.details.clone();
    match &mut details {
        VariableDetails::Component(component) => {
            canonicalize_ids(registry, &mut component.hooks);
            for render in component.renders.values_mut() {
                render.target = registry.canonical(render.target);
            }
        }
        VariableDetails::Hook(hook) => canonicalize_ids(registry, &mut hook.hooks),
        VariableDetails::Data(data) => {
            for render in data.renders.values_mut() {
                render.target = registry.canonical(render.target);
            }
        }
    }
    Some(VariableNode {
        id: registry.canonical(variable.id),
        name: variable.name.clone(),
        declaration: variable.declaration,
        loc: variable.loc,
        dependencies: variable.dependencies.clone(),
        children: variable
            .children
            .iter()
            .filter_map(|&child| variable_node(registry, child))
            .collect(),
        details,
    })
}

fn canonicalize_ids(registry: &Registry, ids: &mut Vec<EntityId>) {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids.iter() {
        let id = registry.canonical(*id);
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    *ids = seen;
}
