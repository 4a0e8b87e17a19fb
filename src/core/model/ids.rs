//! Identity assignment: the `(name, file) -> id` table used for every
//! cross-reference in the graph.
//!
//! Ids are handed out by an explicit [`IdGenerator`] owned by the analysis
//! context, so a given input tree always yields the same ids.
//!
//! A key can be in one of two states:
//! - **reserved**: something referred to the entity (an export, a re-export,
//!   an external package import) before or without declaring it;
//! - **declared**: the declaring visit ran. Declaring claims a reserved id.
//!
//! Declaring a key twice is a [`AnalysisError::DuplicateDeclaration`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Stable handle for a component, hook, variable, type or external entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sequential id source.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u32,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator {
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Identity key: entity name (qualified by its parent path for nested
/// declarations, e.g. `App.Row`) within a file key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityKey {
    pub name: String,
    pub file: String,
}

impl IdentityKey {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.name)
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    id: EntityId,
    declared: bool,
}

#[derive(Debug, Default)]
pub struct IdentityMap {
    slots: HashMap<IdentityKey, Slot>,
    /// Ids that turned out to denote the same entity point at the survivor.
    redirects: HashMap<EntityId, EntityId>,
    /// Canonical ids claimed by a declaration.
    declared: HashSet<EntityId>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow unification redirects to the surviving id.
    pub fn canonical(&self, mut id: EntityId) -> EntityId {
        while let Some(next) = self.redirects.get(&id) {
            id = *next;
        }
        id
    }

    pub fn lookup(&self, key: &IdentityKey) -> Option<EntityId> {
        self.slots.get(key).map(|slot| self.canonical(slot.id))
    }

    pub fn is_declared(&self, key: &IdentityKey) -> bool {
        self.slots.get(key).is_some_and(|slot| slot.declared)
    }

    /// The key's id, only if it denotes a declared entity (directly or
    /// through an alias).
    pub fn resolve(&self, key: &IdentityKey) -> Option<EntityId> {
        self.lookup(key).filter(|id| self.declared.contains(id))
    }

    pub fn resolve_any<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k IdentityKey>,
    ) -> Option<EntityId> {
        keys.into_iter().find_map(|key| self.resolve(key))
    }

    /// Return the key's id, reserving a fresh one if the key is unknown.
    pub fn reserve(&mut self, key: IdentityKey, ids: &mut IdGenerator) -> EntityId {
        if let Some(id) = self.lookup(&key) {
            return id;
        }
        let id = ids.next_id();
        self.slots.insert(key, Slot { id, declared: false });
        id
    }

    /// Declare the key, claiming its reserved id or assigning a new one.
    pub fn declare(&mut self, key: IdentityKey, ids: &mut IdGenerator) -> AnalysisResult<EntityId> {
        match self.slots.get(&key).copied() {
            Some(slot) if slot.declared => Err(duplicate(&key)),
            Some(slot) => {
                let id = self.canonical(slot.id);
                self.slots.insert(key, Slot { id, declared: true });
                self.declared.insert(id);
                Ok(id)
            }
            None => {
                let id = ids.next_id();
                self.slots.insert(key, Slot { id, declared: true });
                self.declared.insert(id);
                Ok(id)
            }
        }
    }

    /// Declare the key with a specific id (a default export claiming the id
    /// already handed out for `default`).
    pub fn declare_as(&mut self, key: IdentityKey, id: EntityId) -> AnalysisResult<EntityId> {
        let id = self.canonical(id);
        match self.slots.get(&key).copied() {
            Some(slot) if slot.declared => Err(duplicate(&key)),
            Some(slot) => {
                let id = self.unify(slot.id, id);
                self.slots.insert(key, Slot { id, declared: true });
                self.declared.insert(id);
                Ok(id)
            }
            None => {
                self.slots.insert(key, Slot { id, declared: true });
                self.declared.insert(id);
                Ok(id)
            }
        }
    }

    /// Make `key` another name for `id` without declaring it.
    ///
    /// If the key already maps to a different id, the two are unified.
    pub fn alias(&mut self, key: IdentityKey, id: EntityId) -> EntityId {
        let id = self.canonical(id);
        match self.slots.get(&key).copied() {
            Some(slot) => self.unify(slot.id, id),
            None => {
                self.slots.insert(key, Slot { id, declared: false });
                id
            }
        }
    }

    /// Merge two ids. `survivor` wins unless only `other` is declared.
    fn unify(&mut self, other: EntityId, survivor: EntityId) -> EntityId {
        let mut other = self.canonical(other);
        let mut survivor = self.canonical(survivor);
        if other == survivor {
            return survivor;
        }
        if self.declared.contains(&other) && !self.declared.contains(&survivor) {
            std::mem::swap(&mut other, &mut survivor);
        }
        self.redirects.insert(other, survivor);
        survivor
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn duplicate(key: &IdentityKey) -> AnalysisError {
    AnalysisError::DuplicateDeclaration {
        name: key.name.clone(),
        file: key.file.clone(),
    }
}
