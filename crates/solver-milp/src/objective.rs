//! Optional gap-minimization objective. `good_lp`/HiGHS has
//! no CP-SAT-style `OnlyEnforceIf`, so the conditional "gap ⇒ empty middle
//! slot" rule is linearized as `O[t0] + G <= 1` instead of a reified
//! equality.

use std::collections::HashMap;

use good_lp::{variable, Expression, ProblemVariables, SolverModel, Variable};
use sched_core::Block;
use types::{SectionId, TimeslotId};

use crate::prep::Prep;
use crate::vars::Vars;

pub struct Occupancy {
    pub o: HashMap<(SectionId, TimeslotId), Variable>,
    pub gaps: Vec<Variable>,
}

/// Declares `O[s,t]` for every section/non-break-timeslot pair and a gap
/// indicator for every run of three period-consecutive non-break timeslots
/// within a block.
pub fn declare_occupancy(
    prep: &Prep,
    blocks: &[Block],
    vars: &mut ProblemVariables,
) -> (Occupancy, Vec<(TimeslotId, TimeslotId, TimeslotId)>) {
    let mut o = HashMap::new();
    for section in &prep.problem.sections {
        for &t in &prep.non_break_timeslots {
            o.insert(
                (section.section_id.clone(), t),
                vars.add(variable().binary()),
            );
        }
    }

    let mut triples = Vec::new();
    for block in blocks {
        for w in block.timeslot_ids.windows(3) {
            triples.push((w[0], w[1], w[2]));
        }
    }

    let mut gaps = Vec::new();
    for _ in &triples {
        for _section in &prep.problem.sections {
            gaps.push(vars.add(variable().binary()));
        }
    }

    (Occupancy { o, gaps }, triples)
}

/// Σ of the gap indicators — independent of the model, so it can be passed
/// to `ProblemVariables::minimise` before any constraint exists.
pub fn gap_objective(occ: &Occupancy) -> Expression {
    let mut objective = Expression::from(0.0);
    for &g in &occ.gaps {
        objective = objective + g;
    }
    objective
}

/// Links `O` to the lecture/lab terms that occupy it (`var <= O`,
/// `Σ terms >= O`) and adds the gap constraints.
pub fn link_occupancy_constraints<M: SolverModel>(
    mut model: M,
    prep: &Prep,
    vars: &Vars,
    occ: &Occupancy,
    triples: &[(TimeslotId, TimeslotId, TimeslotId)],
    coverage: &HashMap<u32, sched_core::coverage::CoverageMap>,
) -> M {
    for section in &prep.problem.sections {
        for &t in &prep.non_break_timeslots {
            let o_var = occ.o[&(section.section_id.clone(), t)];

            let mut terms: Vec<Variable> = Vec::new();
            for ((s, _c, ts), var) in &vars.x {
                if s == &section.section_id && *ts == t {
                    terms.push(*var);
                }
            }
            for ((s, c, start), var) in &vars.y {
                if s != &section.section_id {
                    continue;
                }
                if let Some(req) = prep.requirements.get(&(s.clone(), c.clone())) {
                    if let Some(map) = coverage.get(&req.lab_block_size) {
                        if let Some(starts) = map.get(&t) {
                            if starts.contains(start) {
                                terms.push(*var);
                            }
                        }
                    }
                }
            }

            for term in &terms {
                model = model.with((*term - o_var).leq(0.0));
            }
            let mut sum = Expression::from(0.0);
            for term in &terms {
                sum = sum + *term;
            }
            model = model.with((sum - o_var).geq(0.0));
        }
    }

    let mut gap_idx = 0;
    for &(t_minus, t0, t_plus) in triples {
        for section in &prep.problem.sections {
            let g = occ.gaps[gap_idx];
            gap_idx += 1;

            let o_minus = occ.o[&(section.section_id.clone(), t_minus)];
            let o0 = occ.o[&(section.section_id.clone(), t0)];
            let o_plus = occ.o[&(section.section_id.clone(), t_plus)];

            model = model.with((o_minus + o_plus - 1.0 - g).leq(0.0));
            model = model.with((o0 + g).leq(1.0));
        }
    }

    model
}
