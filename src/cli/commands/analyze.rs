use anyhow::Result;

use super::{AnalyzeSummary, CommandResult, CommandSummary};
use crate::cli::{args::AnalyzeArgs, exit_status::ExitStatus};
use crate::core::AnalysisContext;

/// Run the pipeline and write the document to every output.
///
/// Parse failures do not abort the run; they downgrade the exit status.
pub fn analyze(args: AnalyzeArgs) -> Result<CommandResult> {
    let ctx = AnalysisContext::new(&args)?;
    let output = ctx.analyze()?;
    let outputs = ctx.write_outputs(&output.document)?;

    let document = &output.document;
    let status = if output.parse_failures.is_empty() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    };

    Ok(CommandResult {
        summary: CommandSummary::Analyze(AnalyzeSummary {
            analyzed: output.analyzed,
            inaccessible: ctx.skipped_count,
            components: document.component_count(),
            hooks: document.hook_count(),
            edges: document.edges.len(),
            unresolved: document.unresolved.len(),
            parse_failures: output.parse_failures,
            outputs,
        }),
        status,
    })
}
