//! Solver driver: builds the model, invokes HiGHS with a
//! wall-clock time limit, worker count, and fixed seed, then maps the
//! terminal state to `{OPTIMAL, FEASIBLE, INFEASIBLE}`.

use std::time::Instant;

use good_lp::solvers::highs::HighsModelStatus;
use good_lp::{default_solver, Expression, ProblemVariables, Solution, SolverModel};
use sched_core::{PreparedProblem, Solver, SolveError, SolveParams, SolveResult, SolveStatus};
use tracing::{info, warn};

use crate::constraints::{
    add_at_most_one_per_section_constraints, add_faculty_clash_constraints,
    add_first_period_cap_constraints, add_room_choice_constraints,
    add_room_exclusivity_constraints, add_room_stickiness_constraints,
    add_weekly_count_constraints, build_coverage_maps,
};
use crate::objective::{declare_occupancy, gap_objective, link_occupancy_constraints};
use crate::prep::Prep;
use crate::reconstruct::reconstruct;
use crate::vars::declare_variables;

pub struct MilpSolver;

impl MilpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MilpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for MilpSolver {
    fn solve(
        &self,
        prepared: &PreparedProblem<'_>,
        params: &SolveParams,
    ) -> Result<SolveResult, SolveError> {
        let prep = Prep::build(prepared);
        let coverage = build_coverage_maps(&prep, &prepared.blocks);

        info!(
            sections = prepared.problem.sections.len(),
            courses = prepared.problem.courses.len(),
            timeslots = prepared.timeslots.len(),
            optimize_gaps = params.optimize_gaps,
            "building MILP model"
        );

        let mut pvars = ProblemVariables::new();
        let vars = declare_variables(&prep, &prepared.blocks, &mut pvars);

        // `O`/gap variables must exist before `minimise` is called (the
        // objective expression references them), but the constraints that
        // link them can only be added once the model object itself exists.
        let occupancy = params
            .optimize_gaps
            .then(|| declare_occupancy(&prep, &prepared.blocks, &mut pvars));

        let objective = occupancy
            .as_ref()
            .map(|(occ, _)| gap_objective(occ))
            .unwrap_or_else(|| Expression::from(0.0));

        let mut model = pvars.minimise(objective.clone()).using(default_solver);
        model = model
            .set_option("threads", params.workers as i32)
            .set_option("random_seed", params.seed as i32)
            .set_option("time_limit", params.time_limit_sec as f64);

        model = add_weekly_count_constraints(model, &prep, &vars);
        model = add_at_most_one_per_section_constraints(model, &prep, &vars, &coverage);
        model = add_faculty_clash_constraints(model, &prep, &vars, &coverage);
        model = add_first_period_cap_constraints(model, &prep, &vars);
        model = add_room_choice_constraints(model, &prep, &vars);
        model = add_room_stickiness_constraints(model, &prep, &vars);
        model = add_room_exclusivity_constraints(model, &prep, &vars, &coverage);

        if let Some((occ, triples)) = &occupancy {
            model = link_occupancy_constraints(model, &prep, &vars, occ, triples, &coverage);
        }

        run(model, objective, &prep, &vars)
    }
}

fn run(
    model: impl SolverModel,
    objective: Expression,
    prep: &Prep,
    vars: &crate::vars::Vars,
) -> Result<SolveResult, SolveError> {
    let started = Instant::now();
    match model.solve() {
        Ok(solution) => {
            let elapsed = started.elapsed().as_secs_f64();
            let status = match solution.status() {
                HighsModelStatus::Optimal => SolveStatus::Optimal,
                other => {
                    warn!(
                        ?other,
                        elapsed, "HiGHS terminated short of optimal; reporting solution as feasible"
                    );
                    SolveStatus::Feasible
                }
            };
            let objective_value = solution.eval(objective.clone()).round() as i64;
            Ok(reconstruct(prep, vars, &solution, status, objective_value))
        }
        Err(e) => {
            warn!(error = %e, "solver returned no solution");
            Ok(SolveResult::infeasible())
        }
    }
}
