//! Final pass producing the global render-edge list.
//!
//! A component's own renders become `render` edges (rendered → renderer).
//! Renders recorded on non-component variables nested inside a component
//! are attributed to the nearest enclosing component as `render2`.
//! External (dependency) renders never produce edges.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::model::{EntityId, VariableKind};
use crate::core::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeLabel {
    Render,
    Render2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: EntityId,
    pub to: EntityId,
    pub label: EdgeLabel,
}

pub fn build_edges(registry: &Registry) -> Vec<DependencyEdge> {
    let mut builder = EdgeBuilder {
        registry,
        edges: Vec::new(),
        seen: HashSet::new(),
    };
    for file in registry.files().values() {
        for &id in &file.variables {
            builder.walk(id, None);
        }
    }
    builder.edges
}

struct EdgeBuilder<'r> {
    registry: &'r Registry,
    edges: Vec<DependencyEdge>,
    seen: HashSet<DependencyEdge>,
}

impl EdgeBuilder<'_> {
    fn walk(&mut self, id: EntityId, component: Option<EntityId>) {
        let Some(variable) = self.registry.variable(id) else {
            return;
        };
        let own = self.registry.canonical(variable.id);
        let (owner, label) = match variable.kind() {
            VariableKind::Component => (Some(own), EdgeLabel::Render),
            _ => (component, EdgeLabel::Render2),
        };

        if let (Some(owner), Some(renders)) = (owner, variable.renders()) {
            for render in renders.values().filter(|r| !r.is_dependency) {
                self.push(DependencyEdge {
                    from: self.registry.canonical(render.target),
                    to: owner,
                    label,
                });
            }
        }

        let next = if variable.kind() == VariableKind::Component {
            Some(own)
        } else {
            component
        };
        for &child in &variable.children {
            self.walk(child, next);
        }
    }

    fn push(&mut self, edge: DependencyEdge) {
        if self.seen.insert(edge) {
            self.edges.push(edge);
        }
    }
}
