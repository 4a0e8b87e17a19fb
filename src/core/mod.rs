//! The analysis engine.
//!
//! Files are parsed and walked one at a time in sorted order. Each walk
//! mutates the [`registry::Registry`]; references whose target has not been
//! declared yet are queued in [`deferred`] and replayed once every file is
//! seen. The final [`document::Document`] is built from the registry.

pub mod analyzer;
pub mod context;
pub mod deferred;
pub mod document;
pub mod edges;
pub mod extract;
pub mod file_scanner;
pub mod model;
pub mod parsers;
pub mod registry;
pub mod resolve;
pub mod visit;

pub use analyzer::{AnalysisOutput, Analyzer, AnalyzerOptions, ParseFailure};
pub use context::AnalysisContext;
pub use document::Document;
