//! Fatal structural errors raised by the analysis engine.
//!
//! Recoverable conditions (parse failures, unresolved references, unsupported
//! type syntax) never surface here: they are logged and degraded at the point
//! where they occur. Everything in [`AnalysisError`] aborts the run.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A component, hook or function was declared twice under one identity key.
    #[error("duplicate declaration of '{name}' in {file}")]
    DuplicateDeclaration { name: String, file: String },

    /// A node that must carry a source position has none.
    #[error("{node} in {file} has no source location")]
    MissingLocation { node: &'static str, file: String },

    /// A deferred task was queued after replay started.
    #[error("deferred queue is sealed: cannot enqueue '{name}' during or after replay")]
    QueueSealed { name: String },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
