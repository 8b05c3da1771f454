pub mod blocks;
pub mod coverage;
pub mod error;
pub mod feasibility;
pub mod requirement;
pub mod validate;

pub use error::SolveError;
pub use feasibility::FeasibilityReport;
pub use requirement::{resolve, ResolvedRequirement};
pub use validate::ValidationError;

pub use types::{
    Block, ClassKind, Course, FacultyCourseAssignment, ProblemData, Room, ScheduleEntry, Section,
    SectionCourseRequirement, SolveParams, SolveResult, SolveStatus, Timeslot, TimeslotId,
};

/// The derived, read-only view of a `ProblemData` a solver driver needs:
/// dense timeslots, the week's blocks, and a feasibility report that has
/// already been confirmed error-free.
pub struct PreparedProblem<'a> {
    pub problem: &'a ProblemData,
    pub timeslots: Vec<Timeslot>,
    pub blocks: Vec<Block>,
    pub feasibility: FeasibilityReport,
}

/// Runs structural validation, derives timeslots and blocks, then runs the
/// feasibility pre-check. Returns `Err(SolveError::FeasibilityFailed)` if any
/// hard feasibility error was found — the caller must not attempt to build a
/// model in that case.
pub fn prepare(problem: &ProblemData) -> Result<PreparedProblem<'_>, SolveError> {
    validate::validate(problem)?;

    let timeslots = problem.build_timeslots();
    let blocks = blocks::build_blocks(&timeslots);
    let report = feasibility::check(problem, &timeslots, &blocks);

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "feasibility pre-check complete"
    );

    if !report.is_ok() {
        return Err(SolveError::FeasibilityFailed(report));
    }

    Ok(PreparedProblem {
        problem,
        timeslots,
        blocks,
        feasibility: report,
    })
}

/// Synchronous solve entry point. A single logical solve is synchronous and
/// single-threaded at this level; only the underlying search is internally
/// parallel via `SolveParams::workers`. Implemented by the MILP back end so
/// this crate stays free of any particular solver dependency.
pub trait Solver: Send + Sync {
    fn solve(
        &self,
        prepared: &PreparedProblem<'_>,
        params: &SolveParams,
    ) -> Result<SolveResult, SolveError>;
}
