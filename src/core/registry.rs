//! The registry owns all shared analysis state: id generator, identity map,
//! variable arena, file table, deferred queue and unresolved diagnostics.
//!
//! Components and hooks are declared under `(name, file)` keys. Hook usage
//! and render edges go through [`Registry::attach_hook`] and
//! [`Registry::attach_render`], which apply immediately when the target is
//! already declared and otherwise defer to [`Registry::replay`].
//! [`Registry::defer_render`] always defers.

use std::collections::BTreeMap;

use crate::core::deferred::{
    DeferredQueue, HookUsage, PendingRender, PendingTask, Unresolved, UnresolvedKind,
};
use crate::core::model::{
    DeclarationKind, EntityId, ExportForm, ExportKind, IdGenerator, IdentityKey, IdentityMap,
    Location, RenderEdge, SourceFile, Variable, VariableArena, VariableKind,
};
use crate::error::AnalysisResult;

pub const DEFAULT_EXPORT: &str = "default";

#[derive(Debug, Default)]
pub struct Registry {
    ids: IdGenerator,
    identity: IdentityMap,
    arena: VariableArena,
    files: BTreeMap<String, SourceFile>,
    queue: DeferredQueue,
    unresolved: Vec<Unresolved>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    // === File table ===

    /// Create the record for a file about to be traversed.
    pub fn begin_file(&mut self, path: &str) {
        self.files
            .entry(path.to_string())
            .or_insert_with(|| SourceFile::new(path));
    }

    pub fn files(&self) -> &BTreeMap<String, SourceFile> {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&SourceFile> {
        self.files.get(path)
    }

    pub fn file_mut(&mut self, path: &str) -> Option<&mut SourceFile> {
        self.files.get_mut(path)
    }

    // === Identity ===

    pub fn identity(&self) -> &IdentityMap {
        &self.identity
    }

    pub fn canonical(&self, id: EntityId) -> EntityId {
        self.identity.canonical(id)
    }

    pub fn lookup(&self, key: &IdentityKey) -> Option<EntityId> {
        self.identity.lookup(key)
    }

    pub fn reserve(&mut self, key: IdentityKey) -> EntityId {
        self.identity.reserve(key, &mut self.ids)
    }

    pub fn alias(&mut self, key: IdentityKey, id: EntityId) -> EntityId {
        self.identity.alias(key, id)
    }

    /// Declare a component, hook or function under `key`.
    ///
    /// A default-exported declaration claims the id already handed out for
    /// the file's `default` key, so `import X from './x'` call sites that were
    /// seen first refer to the same entity.
    pub fn declare(&mut self, key: IdentityKey, default_export: bool) -> AnalysisResult<EntityId> {
        let default_key = IdentityKey::new(DEFAULT_EXPORT, key.file.clone());
        if !default_export || key == default_key {
            return self.identity.declare(key, &mut self.ids);
        }
        let id = match self.identity.lookup(&default_key) {
            Some(existing) => self.identity.declare_as(key, existing)?,
            None => self.identity.declare(key, &mut self.ids)?,
        };
        Ok(self.identity.alias(default_key, id))
    }

    /// Declare a plain binding. A second binding under an already declared
    /// key is registered under `name@line:col` instead.
    pub fn declare_binding(&mut self, key: IdentityKey, loc: Location) -> AnalysisResult<EntityId> {
        let key = if self.identity.is_declared(&key) {
            IdentityKey::new(format!("{}@{}", key.name, loc), key.file)
        } else {
            key
        };
        self.identity.declare(key, &mut self.ids)
    }

    // === Variables ===

    pub fn variable(&self, id: EntityId) -> Option<&Variable> {
        self.arena.get(id)
    }

    pub fn variable_mut(&mut self, id: EntityId) -> Option<&mut Variable> {
        self.arena.get_mut(id)
    }

    /// Store a variable under its parent, or at the top level of `file`.
    pub fn insert_variable(&mut self, file: &str, parent: Option<EntityId>, variable: Variable) {
        let id = variable.id;
        self.arena.insert(variable);
        match parent.and_then(|parent| self.arena.get_mut(parent)) {
            Some(parent) => parent.children.push(id),
            None => {
                if let Some(file) = self.files.get_mut(file) {
                    file.variables.push(id);
                }
            }
        }
    }

    // === Speculative attachments ===

    pub fn attach_hook(&mut self, usage: HookUsage) -> AnalysisResult<()> {
        match self.identity.resolve_any(&usage.candidates) {
            Some(target) => {
                self.apply_hook(usage.owner, target);
                Ok(())
            }
            None => self.queue.push(PendingTask::HookUsage(usage)),
        }
    }

    pub fn attach_render(&mut self, render: PendingRender) -> AnalysisResult<()> {
        match self.identity.resolve_any(&render.candidates) {
            Some(target) => {
                self.apply_render(&render, target, false);
                Ok(())
            }
            None => self.queue.push(PendingTask::Render(render)),
        }
    }

    /// Queue a render for replay regardless of what is declared now.
    pub fn defer_render(&mut self, render: PendingRender) -> AnalysisResult<()> {
        self.queue.push(PendingTask::Render(render))
    }

    /// Record a render of an external package's component. The target id is
    /// reserved under the package key and never needs resolution.
    pub fn attach_dependency_render(&mut self, render: PendingRender, target: IdentityKey) {
        let target = self.reserve(target);
        self.apply_render(&render, target, true);
    }

    fn apply_hook(&mut self, owner: EntityId, target: EntityId) {
        if let Some(hooks) = self.arena.get_mut(owner).and_then(Variable::hooks_mut)
            && !hooks.contains(&target)
        {
            hooks.push(target);
        }
    }

    fn apply_render(&mut self, render: &PendingRender, target: EntityId, is_dependency: bool) {
        let Some(renders) = self.arena.get_mut(render.owner).and_then(Variable::renders_mut) else {
            return;
        };
        renders.insert(
            render.loc.key(),
            RenderEdge {
                target,
                tag: render.tag.clone(),
                loc: render.loc,
                owner_loc: render.owner_loc,
                props: render.props.clone(),
                is_dependency,
            },
        );
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run every deferred task once against the completed identity map.
    ///
    /// Returns the number of tasks that resolved. Calling it again does nothing.
    pub fn replay(&mut self) -> AnalysisResult<usize> {
        let Some(tasks) = self.queue.begin_replay() else {
            return Ok(0);
        };
        let mut resolved = 0;
        for task in tasks {
            match task {
                PendingTask::HookUsage(usage) => {
                    match self.identity.resolve_any(&usage.candidates) {
                        Some(target) => {
                            self.apply_hook(usage.owner, target);
                            resolved += 1;
                        }
                        None => {
                            tracing::debug!("unresolved hook '{}' in {}", usage.name, usage.file);
                            self.unresolved.push(Unresolved {
                                kind: UnresolvedKind::Hook,
                                target: usage.candidates.first().map(|k| k.file.clone()),
                                name: usage.name,
                                file: usage.file,
                                loc: usage.loc,
                            });
                        }
                    }
                }
                PendingTask::Render(render) => match self.identity.resolve_any(&render.candidates) {
                    Some(target) => {
                        self.apply_render(&render, target, false);
                        resolved += 1;
                    }
                    None => {
                        tracing::debug!("unresolved render <{}> in {}", render.tag, render.file);
                        self.unresolved.push(Unresolved {
                            kind: UnresolvedKind::Render,
                            target: render.candidates.first().map(|k| k.file.clone()),
                            name: render.tag,
                            file: render.file,
                            loc: render.loc,
                        });
                    }
                },
            }
        }
        self.queue.finish_replay();
        Ok(resolved)
    }

    // === Diagnostics ===

    pub fn report_unresolved(&mut self, unresolved: Unresolved) {
        self.unresolved.push(unresolved);
    }

    pub fn unresolved(&self) -> &[Unresolved] {
        &self.unresolved
    }

    /// Report imports whose source is neither a dependency nor a scanned file.
    pub fn check_imports(&mut self) {
        let mut missing = Vec::new();
        for file in self.files.values() {
            for binding in file.imports.values() {
                if !binding.is_dependency && !self.files.contains_key(&binding.source) {
                    missing.push(Unresolved {
                        kind: UnresolvedKind::Import,
                        name: binding.local_name.clone(),
                        target: Some(binding.source.clone()),
                        file: file.path.clone(),
                        loc: binding.loc,
                    });
                }
            }
        }
        self.unresolved.extend(missing);
    }

    /// Replace provisional value export kinds with what the exported id
    /// turned out to denote.
    pub fn refine_exports(&mut self) {
        for file in self.files.values_mut() {
            for export in file.exports.values_mut() {
                if matches!(export.form, ExportForm::Type | ExportForm::Namespace)
                    || export.kind != ExportKind::Value
                {
                    continue;
                }
                let id = self.identity.canonical(export.id);
                export.kind = match self.arena.get(id) {
                    Some(v) if v.kind() == VariableKind::Component => ExportKind::Component,
                    Some(v) if v.declaration == DeclarationKind::Function => ExportKind::Function,
                    _ => ExportKind::Value,
                };
            }
        }
    }
}
