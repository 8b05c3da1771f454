//! Result reconstructor: decodes the solved variable
//! assignment into per-section and per-faculty schedules plus free-resource
//! maps.

use std::collections::{HashMap, HashSet};

use good_lp::Solution;
use types::{ClassKind, FacultyId, RoomId, ScheduleEntry, SolveResult, SolveStatus, TimeslotId};

use crate::prep::Prep;
use crate::vars::Vars;

pub fn reconstruct(
    prep: &Prep,
    vars: &Vars,
    solution: &impl Solution,
    status: SolveStatus,
    objective_value: i64,
) -> SolveResult {
    let mut schedule_by_section: HashMap<types::SectionId, HashMap<TimeslotId, ScheduleEntry>> =
        HashMap::new();
    let mut schedule_by_faculty: HashMap<FacultyId, HashMap<TimeslotId, ScheduleEntry>> =
        HashMap::new();
    let mut occupied_rooms: HashMap<TimeslotId, HashSet<RoomId>> = HashMap::new();
    let mut occupied_faculty: HashMap<TimeslotId, HashSet<FacultyId>> = HashMap::new();

    for ((section_id, course_id, t), var) in &vars.x {
        if solution.value(*var) <= 0.5 {
            continue;
        }
        let Some(faculty_id) = prep
            .faculty_map
            .get(&(section_id.clone(), course_id.clone()))
            .cloned()
        else {
            continue;
        };
        let room_id = room_for_lecture(vars, solution, section_id, course_id, *t);

        record(
            &mut schedule_by_section,
            &mut schedule_by_faculty,
            &mut occupied_rooms,
            &mut occupied_faculty,
            section_id.clone(),
            faculty_id,
            room_id,
            course_id.clone(),
            ClassKind::Lecture,
            *t,
        );
    }

    for ((section_id, course_id, start), var) in &vars.y {
        if solution.value(*var) <= 0.5 {
            continue;
        }
        let Some(faculty_id) = prep
            .faculty_map
            .get(&(section_id.clone(), course_id.clone()))
            .cloned()
        else {
            continue;
        };
        let Some(req) = prep
            .requirements
            .get(&(section_id.clone(), course_id.clone()))
        else {
            continue;
        };
        let room_id = room_for_lab(vars, solution, section_id, course_id, *start);

        for k in 0..req.lab_block_size as usize {
            let t = start + k;
            record(
                &mut schedule_by_section,
                &mut schedule_by_faculty,
                &mut occupied_rooms,
                &mut occupied_faculty,
                section_id.clone(),
                faculty_id.clone(),
                room_id.clone(),
                course_id.clone(),
                ClassKind::Lab,
                t,
            );
        }
    }

    let available_rooms = prep.rooms.map(|rooms| {
        let all: Vec<RoomId> = rooms.iter().map(|r| r.room_id.clone()).collect();
        prep.non_break_timeslots
            .iter()
            .map(|&t| {
                let used = occupied_rooms.get(&t).cloned().unwrap_or_default();
                let free: Vec<RoomId> = all.iter().filter(|r| !used.contains(r)).cloned().collect();
                (t, free)
            })
            .collect()
    });

    let all_faculty: Vec<FacultyId> = prep
        .problem
        .faculty
        .iter()
        .map(|f| f.faculty_id.clone())
        .collect();
    let available_faculty = prep
        .non_break_timeslots
        .iter()
        .map(|&t| {
            let used = occupied_faculty.get(&t).cloned().unwrap_or_default();
            let free: Vec<FacultyId> = all_faculty
                .iter()
                .filter(|f| !used.contains(f))
                .cloned()
                .collect();
            (t, free)
        })
        .collect();

    SolveResult {
        status,
        objective_value: Some(objective_value),
        schedule_by_section,
        schedule_by_faculty,
        available_rooms,
        available_faculty,
    }
}

fn room_for_lecture(
    vars: &Vars,
    solution: &impl Solution,
    section_id: &types::SectionId,
    course_id: &types::CourseId,
    t: TimeslotId,
) -> Option<RoomId> {
    vars.rl
        .iter()
        .find(|((s, c, ts, _r), var)| {
            s == section_id && c == course_id && *ts == t && solution.value(**var) > 0.5
        })
        .map(|((_, _, _, r), _)| r.clone())
}

fn room_for_lab(
    vars: &Vars,
    solution: &impl Solution,
    section_id: &types::SectionId,
    course_id: &types::CourseId,
    start: TimeslotId,
) -> Option<RoomId> {
    vars.rb
        .iter()
        .find(|((s, c, st, _r), var)| {
            s == section_id && c == course_id && *st == start && solution.value(**var) > 0.5
        })
        .map(|((_, _, _, r), _)| r.clone())
}

#[allow(clippy::too_many_arguments)]
fn record(
    schedule_by_section: &mut HashMap<types::SectionId, HashMap<TimeslotId, ScheduleEntry>>,
    schedule_by_faculty: &mut HashMap<FacultyId, HashMap<TimeslotId, ScheduleEntry>>,
    occupied_rooms: &mut HashMap<TimeslotId, HashSet<RoomId>>,
    occupied_faculty: &mut HashMap<TimeslotId, HashSet<FacultyId>>,
    section_id: types::SectionId,
    faculty_id: FacultyId,
    room_id: Option<RoomId>,
    course_id: types::CourseId,
    kind: ClassKind,
    t: TimeslotId,
) {
    if let Some(room_id) = &room_id {
        occupied_rooms.entry(t).or_default().insert(room_id.clone());
    }
    occupied_faculty.entry(t).or_default().insert(faculty_id.clone());

    schedule_by_section
        .entry(section_id.clone())
        .or_default()
        .insert(
            t,
            ScheduleEntry {
                course_id: course_id.clone(),
                faculty_id: faculty_id.clone(),
                room_id: room_id.clone(),
                kind,
                section_id: None,
            },
        );

    schedule_by_faculty.entry(faculty_id.clone()).or_default().insert(
        t,
        ScheduleEntry {
            course_id,
            faculty_id,
            room_id,
            kind,
            section_id: Some(section_id),
        },
    );
}
