use std::path::PathBuf;

use crate::core::ParseFailure;

use super::super::exit_status::ExitStatus;

#[derive(Debug)]
pub enum CommandSummary {
    Analyze(AnalyzeSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct AnalyzeSummary {
    pub analyzed: usize,
    pub parse_failures: Vec<ParseFailure>,
    /// Paths the scanner could not access.
    pub inaccessible: usize,
    pub components: usize,
    pub hooks: usize,
    pub edges: usize,
    pub unresolved: usize,
    pub outputs: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a uigraph command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub status: ExitStatus,
}
