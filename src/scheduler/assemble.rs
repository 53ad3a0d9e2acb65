use super::{
    heuristic, optimizer, util::HoursLedger, GenerateOptions, GenerationReport, OptimizePath,
    Scheduler,
};
use crate::model::Schedule;
use tracing::debug;

/// États successifs d'une génération.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Reset,
    Optimize,
    SkipOptimize,
    HeuristicFill,
    Done,
}

/// RESET → (OPTIMIZE | SKIP_OPTIMIZE) → HEURISTIC_FILL → DONE.
///
/// Les heures passent par un `HoursLedger` et ne sont écrites dans le roster
/// qu'à l'état DONE.
pub(super) fn generate(scheduler: &mut Scheduler) -> (Schedule, GenerationReport) {
    let opts: GenerateOptions = scheduler.options;
    let mut schedule = Schedule::new();
    let mut ledger = HoursLedger::new(scheduler.roster.len());
    let mut path = OptimizePath::Skipped;
    let mut optimizer_filled = 0usize;
    let mut heuristic_filled = 0usize;

    let mut stage = Stage::Reset;
    loop {
        debug!(?stage, "schedule generation");
        stage = match stage {
            Stage::Reset => {
                scheduler.roster.reset_hours();
                match &scheduler.backend {
                    Some(_) if !scheduler.roster.is_empty() => Stage::Optimize,
                    _ => Stage::SkipOptimize,
                }
            }
            Stage::Optimize => {
                if let Some(backend) = scheduler.backend.as_deref() {
                    let (outcome, filled) = optimizer::optimize(
                        backend,
                        &scheduler.roster,
                        &mut schedule,
                        &mut ledger,
                        opts,
                    );
                    path = outcome;
                    optimizer_filled = filled;
                }
                Stage::HeuristicFill
            }
            Stage::SkipOptimize => Stage::HeuristicFill,
            Stage::HeuristicFill => {
                heuristic_filled =
                    heuristic::fill(&scheduler.roster, &mut schedule, &mut ledger, opts);
                Stage::Done
            }
            Stage::Done => break,
        };
    }

    let report = GenerationReport {
        path,
        optimizer_filled,
        heuristic_filled,
        coverage: schedule.coverage(),
        peak_hours: ledger.peak(),
    };
    scheduler.roster.commit_hours(&ledger.into_hours());
    debug!(?report, "schedule generated");

    (schedule, report)
}
