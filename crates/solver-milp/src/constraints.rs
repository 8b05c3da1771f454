//! Hard constraints. Each function takes and returns the
//! solver model, mirroring the `model = model.with(...)` accumulation style
//! `good_lp` is built around.

use std::collections::HashMap;

use good_lp::{Expression, SolverModel};
use sched_core::coverage::{build_coverage, CoverageMap};
use sched_core::Block;

use crate::prep::Prep;
use crate::vars::Vars;

/// Builds one `covers(t, B)` map per distinct lab block size appearing in
/// the problem's requirements, built once.
pub fn build_coverage_maps(prep: &Prep, blocks: &[Block]) -> HashMap<u32, CoverageMap> {
    let mut maps = HashMap::new();
    for req in prep.requirements.values() {
        if req.has_labs() {
            maps.entry(req.lab_block_size)
                .or_insert_with(|| build_coverage(blocks, req.lab_block_size));
        }
    }
    maps
}

fn lecture_sum(vars: &Vars, section: &types::SectionId, course: &types::CourseId) -> Expression {
    let mut sum = Expression::from(0.0);
    for ((s, c, _t), var) in &vars.x {
        if s == section && c == course {
            sum = sum + *var;
        }
    }
    sum
}

fn lab_sum(vars: &Vars, section: &types::SectionId, course: &types::CourseId) -> Expression {
    let mut sum = Expression::from(0.0);
    for ((s, c, _start), var) in &vars.y {
        if s == section && c == course {
            sum = sum + *var;
        }
    }
    sum
}

/// 1. Weekly counts: Σ X = weekly_lectures, Σ Y = weekly_lab_sessions.
pub fn add_weekly_count_constraints<M: SolverModel>(mut model: M, prep: &Prep, vars: &Vars) -> M {
    for ((section_id, course_id), req) in &prep.requirements {
        if req.has_lectures() {
            let sum = lecture_sum(vars, section_id, course_id);
            model = model.with(sum.eq(req.weekly_lectures as f64));
        }
        if req.has_labs() {
            let sum = lab_sum(vars, section_id, course_id);
            model = model.with(sum.eq(req.weekly_lab_sessions as f64));
        }
    }
    model
}

/// 2. At most one class per section per timeslot, lab-covering terms
/// included via `covers(t, bs(c))`.
pub fn add_at_most_one_per_section_constraints<M: SolverModel>(
    mut model: M,
    prep: &Prep,
    vars: &Vars,
    coverage: &HashMap<u32, CoverageMap>,
) -> M {
    for section in &prep.problem.sections {
        for &t in &prep.non_break_timeslots {
            let mut sum = Expression::from(0.0);
            for ((s, c, ts), var) in &vars.x {
                if s == &section.section_id && *ts == t {
                    sum = sum + *var;
                    let _ = c;
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
                                sum = sum + *var;
                            }
                        }
                    }
                }
            }
            model = model.with(sum.leq(1.0));
        }
    }
    model
}

/// 3. Faculty clash: for each faculty and timeslot, at most one class among
/// everything mapped to that faculty via the assignment table.
pub fn add_faculty_clash_constraints<M: SolverModel>(
    mut model: M,
    prep: &Prep,
    vars: &Vars,
    coverage: &HashMap<u32, CoverageMap>,
) -> M {
    for faculty in &prep.problem.faculty {
        for &t in &prep.non_break_timeslots {
            let mut sum = Expression::from(0.0);
            for ((s, c, ts), var) in &vars.x {
                if *ts == t && is_assigned(prep, s, c, &faculty.faculty_id) {
                    sum = sum + *var;
                }
            }
            for ((s, c, start), var) in &vars.y {
                if !is_assigned(prep, s, c, &faculty.faculty_id) {
                    continue;
                }
                if let Some(req) = prep.requirements.get(&(s.clone(), c.clone())) {
                    if let Some(map) = coverage.get(&req.lab_block_size) {
                        if let Some(starts) = map.get(&t) {
                            if starts.contains(start) {
                                sum = sum + *var;
                            }
                        }
                    }
                }
            }
            model = model.with(sum.leq(1.0));
        }
    }
    model
}

/// 4. First-period cap: at most 3 classes per faculty per week with
/// `period_index == 1`, across lectures and lab starts alike.
pub fn add_first_period_cap_constraints<M: SolverModel>(mut model: M, prep: &Prep, vars: &Vars) -> M {
    const FIRST_PERIOD: u32 = 1;
    const CAP: f64 = 3.0;

    for faculty in &prep.problem.faculty {
        let mut sum = Expression::from(0.0);
        for ((s, c, t), var) in &vars.x {
            if is_assigned(prep, s, c, &faculty.faculty_id)
                && prep.ts_period_index.get(t) == Some(&FIRST_PERIOD)
            {
                sum = sum + *var;
            }
        }
        for ((s, c, start), var) in &vars.y {
            if is_assigned(prep, s, c, &faculty.faculty_id)
                && prep.ts_period_index.get(start) == Some(&FIRST_PERIOD)
            {
                sum = sum + *var;
            }
        }
        model = model.with(sum.leq(CAP));
    }
    model
}

/// 5. Room choice follows schedule: Σ_r RL = X, Σ_r RB = Y.
pub fn add_room_choice_constraints<M: SolverModel>(mut model: M, prep: &Prep, vars: &Vars) -> M {
    if prep.rooms.is_none() {
        return model;
    }
    for ((section_id, course_id, t), x_var) in &vars.x {
        let mut sum = Expression::from(0.0);
        for ((s, c, ts, _r), rl_var) in &vars.rl {
            if s == section_id && c == course_id && ts == t {
                sum = sum + *rl_var;
            }
        }
        model = model.with(sum.eq(*x_var));
    }
    for ((section_id, course_id, start), y_var) in &vars.y {
        let mut sum = Expression::from(0.0);
        for ((s, c, st, _r), rb_var) in &vars.rb {
            if s == section_id && c == course_id && st == start {
                sum = sum + *rb_var;
            }
        }
        model = model.with(sum.eq(*y_var));
    }
    model
}

/// 6. Room stickiness: one room per section per block, for every class
/// (lecture or lab) that falls in it.
pub fn add_room_stickiness_constraints<M: SolverModel>(mut model: M, prep: &Prep, vars: &Vars) -> M {
    if prep.rooms.is_none() {
        return model;
    }

    let mut br_by_section_block: HashMap<(types::SectionId, usize), Vec<types::RoomId>> =
        HashMap::new();
    for (section_id, block_id, room_id) in vars.br.keys() {
        br_by_section_block
            .entry((section_id.clone(), *block_id))
            .or_default()
            .push(room_id.clone());
    }
    for ((section_id, block_id), rooms) in &br_by_section_block {
        let mut sum = Expression::from(0.0);
        for room_id in rooms {
            if let Some(var) = vars.br.get(&(section_id.clone(), *block_id, room_id.clone())) {
                sum = sum + *var;
            }
        }
        model = model.with(sum.leq(1.0));
    }

    for ((section_id, _course_id, t, room_id), rl_var) in &vars.rl {
        if let Some(block_id) = prep.ts_block.get(t) {
            if let Some(br_var) = vars
                .br
                .get(&(section_id.clone(), *block_id, room_id.clone()))
            {
                model = model.with((*rl_var - *br_var).leq(0.0));
            }
        }
    }
    for ((section_id, _course_id, start, room_id), rb_var) in &vars.rb {
        if let Some(block_id) = prep.ts_block.get(start) {
            if let Some(br_var) = vars
                .br
                .get(&(section_id.clone(), *block_id, room_id.clone()))
            {
                model = model.with((*rb_var - *br_var).leq(0.0));
            }
        }
    }
    model
}

/// 7. Room exclusivity: at most one section occupies a room at any timeslot.
pub fn add_room_exclusivity_constraints<M: SolverModel>(
    mut model: M,
    prep: &Prep,
    vars: &Vars,
    coverage: &HashMap<u32, CoverageMap>,
) -> M {
    let Some(rooms) = prep.rooms else {
        return model;
    };
    for room in rooms {
        for &t in &prep.non_break_timeslots {
            let mut sum = Expression::from(0.0);
            for ((_s, _c, ts, r), var) in &vars.rl {
                if *ts == t && r == &room.room_id {
                    sum = sum + *var;
                }
            }
            for ((s, c, start, r) , var) in &vars.rb {
                if r != &room.room_id {
                    continue;
                }
                if let Some(req) = prep.requirements.get(&(s.clone(), c.clone())) {
                    if let Some(map) = coverage.get(&req.lab_block_size) {
                        if let Some(starts) = map.get(&t) {
                            if starts.contains(start) {
                                sum = sum + *var;
                            }
                        }
                    }
                }
            }
            model = model.with(sum.leq(1.0));
        }
    }
    model
}

fn is_assigned(
    prep: &Prep,
    section_id: &types::SectionId,
    course_id: &types::CourseId,
    faculty_id: &types::FacultyId,
) -> bool {
    prep.faculty_map
        .get(&(section_id.clone(), course_id.clone()))
        == Some(faculty_id)
}
