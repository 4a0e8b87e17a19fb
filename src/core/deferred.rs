//! Deferred resolution of references whose target identity is not yet known.
//!
//! The queue moves through three phases exactly once:
//! `Collecting` (files are being streamed; tasks may be pushed),
//! `Replaying` (the single replay pass runs; pushing is an error) and
//! `Drained`. Replay hands out the tasks in enqueue order.

use serde::{Deserialize, Serialize};

use crate::core::model::{EntityId, IdentityKey, Location, PropBinding};
use crate::error::{AnalysisError, AnalysisResult};

/// A custom hook call whose hook was not registered yet.
#[derive(Debug, Clone, PartialEq)]
pub struct HookUsage {
    pub owner: EntityId,
    pub name: String,
    /// Identity keys to try, most specific first.
    pub candidates: Vec<IdentityKey>,
    pub file: String,
    pub loc: Location,
}

/// A markup element whose component was not registered yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRender {
    pub owner: EntityId,
    pub tag: String,
    pub candidates: Vec<IdentityKey>,
    pub file: String,
    pub loc: Location,
    pub owner_loc: Location,
    pub props: Vec<PropBinding>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PendingTask {
    HookUsage(HookUsage),
    Render(PendingRender),
}

impl PendingTask {
    pub fn name(&self) -> &str {
        match self {
            PendingTask::HookUsage(task) => &task.name,
            PendingTask::Render(task) => &task.tag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueuePhase {
    Collecting,
    Replaying,
    Drained,
}

#[derive(Debug)]
pub struct DeferredQueue {
    phase: QueuePhase,
    tasks: Vec<PendingTask>,
}

impl Default for DeferredQueue {
    fn default() -> Self {
        Self {
            phase: QueuePhase::Collecting,
            tasks: Vec::new(),
        }
    }
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> QueuePhase {
        self.phase
    }

    pub fn push(&mut self, task: PendingTask) -> AnalysisResult<()> {
        if self.phase != QueuePhase::Collecting {
            return Err(AnalysisError::QueueSealed {
                name: task.name().to_string(),
            });
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Seal the queue and take its tasks. Returns `None` once replay has
    /// already started, making a second replay a no-op.
    pub fn begin_replay(&mut self) -> Option<Vec<PendingTask>> {
        if self.phase != QueuePhase::Collecting {
            return None;
        }
        self.phase = QueuePhase::Replaying;
        Some(std::mem::take(&mut self.tasks))
    }

    pub fn finish_replay(&mut self) {
        self.phase = QueuePhase::Drained;
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnresolvedKind {
    Hook,
    Render,
    Import,
    ExportAll,
}

/// A reference that never materialized into the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unresolved {
    pub kind: UnresolvedKind,
    pub name: String,
    /// Module specifier or file key the reference pointed at, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub file: String,
    pub loc: Location,
}
