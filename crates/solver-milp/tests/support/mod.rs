//! Shared `ProblemData` builders for the end-to-end scenarios. These build
//! the domain model directly rather than through `loader`, since these
//! tests exercise the solver, not CSV ingestion.

use std::collections::HashMap;

use sched_core::SolveError;
use types::{
    ClassKind, Course, CourseId, DayPeriod, Faculty, FacultyCourseAssignment, FacultyId,
    ProblemData, Room, RoomId, Section, SectionCourseRequirement, SectionId, SolveParams,
    SolveResult, TimeslotId,
};

pub fn days(num_days: u32, periods_per_day: u32, breaks: &[(u32, u32)]) -> Vec<DayPeriod> {
    let mut rows = Vec::new();
    for day in 0..num_days {
        for period in 1..=periods_per_day {
            rows.push(DayPeriod {
                day_index: day,
                day_name: format!("Day{day}"),
                period_index: period,
                is_break: breaks.contains(&(day, period)),
            });
        }
    }
    rows
}

pub fn section(id: &str, num_students: u32) -> Section {
    Section {
        section_id: SectionId::from(id),
        name: id.to_string(),
        num_students,
    }
}

pub fn faculty(id: &str) -> Faculty {
    Faculty {
        faculty_id: FacultyId::from(id),
        name: id.to_string(),
    }
}

pub fn lecture_course(id: &str) -> Course {
    Course {
        course_id: CourseId::from(id),
        name: id.to_string(),
        is_lab: false,
        lecture_periods_per_week: 0,
        lab_sessions_per_week: 0,
        lab_block_size: 2,
    }
}

pub fn lab_course(id: &str, lab_block_size: u32) -> Course {
    Course {
        course_id: CourseId::from(id),
        name: id.to_string(),
        is_lab: true,
        lecture_periods_per_week: 0,
        lab_sessions_per_week: 0,
        lab_block_size,
    }
}

pub fn requirement(
    section_id: &str,
    course_id: &str,
    weekly_lectures: u32,
    weekly_lab_sessions: u32,
) -> SectionCourseRequirement {
    SectionCourseRequirement {
        section_id: SectionId::from(section_id),
        course_id: CourseId::from(course_id),
        weekly_lectures,
        weekly_lab_sessions,
        lab_block_size: None,
    }
}

pub fn assignment(faculty_id: &str, course_id: &str, section_id: &str) -> FacultyCourseAssignment {
    FacultyCourseAssignment {
        faculty_id: FacultyId::from(faculty_id),
        course_id: CourseId::from(course_id),
        section_id: SectionId::from(section_id),
    }
}

pub fn room(id: &str, capacity: u32, is_lab: bool) -> Room {
    Room {
        room_id: RoomId::from(id),
        name: id.to_string(),
        capacity,
        is_lab,
    }
}

/// Runs `prepare` + `MilpSolver::solve`, panicking (test failure) on any
/// `Invalid`/`Internal` error — a malformed test fixture, not a case under
/// test. `FeasibilityFailed`/`Infeasible` are legitimate outcomes callers
/// may assert on.
pub fn solve(problem: &ProblemData, params: &SolveParams) -> Result<SolveResult, SolveError> {
    let prepared = sched_core::prepare(problem)?;
    sched_core::Solver::solve(&solver_milp::MilpSolver::new(), &prepared, params)
}

pub fn default_params() -> SolveParams {
    SolveParams {
        time_limit_sec: 30,
        optimize_gaps: false,
        workers: 1,
        seed: 1,
    }
}

pub fn period_index_by_timeslot(problem: &ProblemData) -> HashMap<TimeslotId, u32> {
    problem
        .build_timeslots()
        .into_iter()
        .map(|t| (t.timeslot_id, t.period_index))
        .collect()
}

pub fn day_index_by_timeslot(problem: &ProblemData) -> HashMap<TimeslotId, u32> {
    problem
        .build_timeslots()
        .into_iter()
        .map(|t| (t.timeslot_id, t.day_index))
        .collect()
}

pub fn break_timeslots(problem: &ProblemData) -> Vec<TimeslotId> {
    problem
        .build_timeslots()
        .into_iter()
        .filter(|t| t.is_break)
        .map(|t| t.timeslot_id)
        .collect()
}

/// Flattens a per-section schedule into sorted `(section, timeslot, course,
/// faculty, room, kind)` tuples, for order-independent equality checks
/// between two solves.
pub fn section_entries(
    result: &SolveResult,
) -> Vec<(SectionId, TimeslotId, CourseId, FacultyId, Option<RoomId>, ClassKind)> {
    let mut out: Vec<_> = result
        .schedule_by_section
        .iter()
        .flat_map(|(section_id, by_ts)| {
            by_ts.iter().map(move |(ts, entry)| {
                (
                    section_id.clone(),
                    *ts,
                    entry.course_id.clone(),
                    entry.faculty_id.clone(),
                    entry.room_id.clone(),
                    entry.kind,
                )
            })
        })
        .collect();
    out.sort_by(|a, b| (a.0.to_string(), a.1).cmp(&(b.0.to_string(), b.1)));
    out
}
