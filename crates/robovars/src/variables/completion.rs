//
// variables/completion.rs
//
// Entry point for variable completion
//

use super::collector::{
    CompletionCandidate, CompletionCollector, UnresolvedVariableImport, VariablesCollector,
};
use super::document_scope::collect_document_variables;
use super::local_scope::collect_local_variables;
use super::matcher::RobotStringMatcher;
use crate::context::{Cancelled, CompletionContext};
use crate::perf::TimingGuard;

/// Run every resolver for `ctx` into `collector`: the local scope when the
/// cursor is on a variable reference, then the document scope.
pub fn collect_variables(
    ctx: &CompletionContext<'_>,
    collector: &mut dyn VariablesCollector,
    only_current_doc: bool,
) -> Result<(), Cancelled> {
    let _timing = TimingGuard::new("collect_variables");
    if let Some(info) = ctx.get_current_variable() {
        collect_local_variables(ctx, &info, collector)?;
    }
    collect_document_variables(ctx, collector, only_current_doc)
}

/// Candidates plus the variable imports that could not be resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub candidates: Vec<CompletionCandidate>,
    pub unresolved_imports: Vec<UnresolvedVariableImport>,
}

pub fn complete_with_diagnostics(
    ctx: &CompletionContext<'_>,
) -> Result<CompletionOutcome, Cancelled> {
    let Some(info) = ctx.get_current_variable() else {
        return Ok(CompletionOutcome::default());
    };
    // A variable being assigned only completes against its own document.
    let only_current_doc = info.is_assign;
    let matcher = RobotStringMatcher::new(&info.typed);
    let mut collector = CompletionCollector::new(ctx.line(), &info, matcher);
    collect_variables(ctx, &mut collector, only_current_doc)?;

    let (candidates, unresolved_imports) = collector.into_parts();
    log::debug!(
        "Variable completion at {}:{}:{} produced {} candidates",
        ctx.path().display(),
        ctx.line(),
        ctx.col(),
        candidates.len()
    );
    Ok(CompletionOutcome {
        candidates,
        unresolved_imports,
    })
}

/// Variable completion candidates at the cursor of `ctx`. Empty when the
/// cursor is not inside a variable reference.
pub fn complete(ctx: &CompletionContext<'_>) -> Result<Vec<CompletionCandidate>, Cancelled> {
    complete_with_diagnostics(ctx).map(|outcome| outcome.candidates)
}
