//! Cheap proof-of-infeasibility pass run before any decision variable is
//! created. All checks run to completion — no short-circuit — so a caller
//! can fix every problem in one pass.

use std::collections::HashMap;

use types::{Block, ProblemData, SectionId, Timeslot};

use crate::requirement::{resolve, ResolvedRequirement};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeasibilityReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FeasibilityReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn check(problem: &ProblemData, timeslots: &[Timeslot], blocks: &[Block]) -> FeasibilityReport {
    let mut report = FeasibilityReport::default();

    let non_break_count = timeslots.iter().filter(|t| !t.is_break).count() as u32;
    let req_map = problem.section_course_requirements_map();
    let faculty_map = problem.faculty_assignment_map();

    for section in &problem.sections {
        let mut total_required_periods: u32 = 0;
        let mut labs_by_block_size: HashMap<u32, u32> = HashMap::new();

        for course in &problem.courses {
            let resolved = resolve(&section.section_id, course, &req_map);
            if !resolved.has_lectures() && !resolved.has_labs() {
                continue;
            }

            total_required_periods +=
                resolved.weekly_lectures + resolved.weekly_lab_sessions * resolved.lab_block_size;

            // Check 3: faculty assignment for every nonzero requirement.
            if faculty_map
                .get(&(section.section_id.clone(), course.course_id.clone()))
                .is_none()
            {
                report.errors.push(format!(
                    "section {} has a requirement for course {} with no faculty assignment",
                    section.section_id, course.course_id
                ));
            }

            if resolved.has_labs() {
                // Check 4: any active lab must use block_size == 2.
                if !course.is_lab || resolved.lab_block_size != 2 {
                    report.errors.push(format!(
                        "section {} course {} has {} active lab session(s) but is not a 2-period lab course (is_lab={}, lab_block_size={})",
                        section.section_id,
                        course.course_id,
                        resolved.weekly_lab_sessions,
                        course.is_lab,
                        resolved.lab_block_size,
                    ));
                    continue;
                }
                *labs_by_block_size
                    .entry(resolved.lab_block_size)
                    .or_insert(0) += resolved.weekly_lab_sessions;
            }
        }

        // Check 1: total required periods fit within the week's non-break timeslots.
        if total_required_periods > non_break_count {
            report.errors.push(format!(
                "section {} requires {} periods/week but only {} non-break timeslots exist",
                section.section_id, total_required_periods, non_break_count
            ));
        }

        // Check 2: enough valid lab starts exist for the required session count.
        for (block_size, required_sessions) in labs_by_block_size {
            let valid_starts = crate::blocks::valid_lab_starts(blocks, block_size);
            if (valid_starts.len() as u32) < required_sessions {
                report.errors.push(format!(
                    "section {} needs {} lab session(s) of block size {} but only {} valid start(s) exist in the week",
                    section.section_id, required_sessions, block_size, valid_starts.len()
                ));
            }
        }
    }

    // Check 5: room capacity coverage, only when rooms are modeled.
    if let Some(rooms) = &problem.rooms {
        let max_lecture_students = max_students_needing(problem, &req_map, false);
        let max_lab_students = max_students_needing(problem, &req_map, true);

        if let Some(needed) = max_lecture_students {
            let has_room = rooms.iter().any(|r| !r.is_lab && r.capacity >= needed);
            if !has_room {
                report.errors.push(format!(
                    "no non-lab room has capacity >= {needed} for sections requiring lectures"
                ));
            }
        }
        if let Some(needed) = max_lab_students {
            let has_room = rooms.iter().any(|r| r.is_lab && r.capacity >= needed);
            if !has_room {
                report.errors.push(format!(
                    "no lab room has capacity >= {needed} for sections requiring labs"
                ));
            }
        }
    } else {
        report
            .warnings
            .push("no rooms supplied: room and stickiness constraints are not modeled".into());
    }

    report
}

/// Largest `num_students` among sections that need a lecture (or lab) room
/// at all, i.e. the tightest capacity bound check 5 must clear. `None` if no
/// section needs that kind of room.
fn max_students_needing(
    problem: &ProblemData,
    req_map: &HashMap<(SectionId, types::CourseId), &types::SectionCourseRequirement>,
    for_labs: bool,
) -> Option<u32> {
    let mut max_students = None;
    for section in &problem.sections {
        let needs = problem.courses.iter().any(|course| {
            let resolved: ResolvedRequirement = resolve(&section.section_id, course, req_map);
            if for_labs {
                resolved.has_labs()
            } else {
                resolved.has_lectures()
            }
        });
        if needs {
            max_students = Some(max_students.unwrap_or(0).max(section.num_students));
        }
    }
    max_students
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::build_blocks;
    use types::{Course, CourseId, Faculty, FacultyCourseAssignment, FacultyId, Room, RoomId, Section};

    fn make_problem(lab_block_size: u32, is_lab: bool) -> ProblemData {
        let section_id = SectionId::from("S1");
        let course_id = CourseId::from("C1");
        let faculty_id = FacultyId::from("F1");
        ProblemData {
            day_periods: vec![],
            sections: vec![Section {
                section_id: section_id.clone(),
                name: "Sec 1".into(),
                num_students: 30,
            }],
            faculty: vec![Faculty {
                faculty_id: faculty_id.clone(),
                name: "Prof".into(),
            }],
            courses: vec![Course {
                course_id: course_id.clone(),
                name: "Course 1".into(),
                is_lab,
                lecture_periods_per_week: 0,
                lab_sessions_per_week: 1,
                lab_block_size,
            }],
            section_requirements: vec![],
            faculty_courses: vec![FacultyCourseAssignment {
                faculty_id,
                course_id,
                section_id,
            }],
            rooms: None,
        }
    }

    fn five_by_five_timeslots() -> Vec<Timeslot> {
        let mut out = Vec::new();
        let mut id = 0;
        for day in 0..5 {
            for period in 0..5 {
                out.push(Timeslot {
                    day_index: day,
                    period_index: period,
                    timeslot_id: id,
                    is_break: false,
                });
                id += 1;
            }
        }
        out
    }

    #[test]
    fn rejects_active_lab_with_wrong_block_size() {
        let problem = make_problem(3, true);
        let timeslots = five_by_five_timeslots();
        let blocks = build_blocks(&timeslots);
        let report = check(&problem, &timeslots, &blocks);
        assert!(!report.is_ok());
        assert!(report.errors.iter().any(|e| e.contains("2-period")));
    }

    #[test]
    fn rejects_active_lab_on_non_lab_course() {
        let problem = make_problem(2, false);
        let timeslots = five_by_five_timeslots();
        let blocks = build_blocks(&timeslots);
        let report = check(&problem, &timeslots, &blocks);
        assert!(!report.is_ok());
    }

    #[test]
    fn accepts_well_formed_two_period_lab() {
        let problem = make_problem(2, true);
        let timeslots = five_by_five_timeslots();
        let blocks = build_blocks(&timeslots);
        let report = check(&problem, &timeslots, &blocks);
        assert!(report.is_ok(), "errors: {:?}", report.errors);
    }

    #[test]
    fn missing_faculty_assignment_is_an_error() {
        let mut problem = make_problem(2, true);
        problem.faculty_courses.clear();
        let timeslots = five_by_five_timeslots();
        let blocks = build_blocks(&timeslots);
        let report = check(&problem, &timeslots, &blocks);
        assert!(report.errors.iter().any(|e| e.contains("no faculty assignment")));
    }

    #[test]
    fn warns_when_no_rooms_supplied() {
        let problem = make_problem(2, true);
        let timeslots = five_by_five_timeslots();
        let blocks = build_blocks(&timeslots);
        let report = check(&problem, &timeslots, &blocks);
        assert!(report.warnings.iter().any(|w| w.contains("no rooms")));
    }

    #[test]
    fn rejects_insufficient_room_capacity() {
        let mut problem = make_problem(2, true);
        problem.rooms = Some(vec![Room {
            room_id: RoomId::from("R1"),
            name: "Lab 1".into(),
            capacity: 10,
            is_lab: true,
        }]);
        let timeslots = five_by_five_timeslots();
        let blocks = build_blocks(&timeslots);
        let report = check(&problem, &timeslots, &blocks);
        assert!(report.errors.iter().any(|e| e.contains("capacity")));
    }
}
