//! Precomputes every lookup the variable declarator and constraint builders
//! need so none of them re-derive it per-constraint.

use std::collections::HashMap;

use sched_core::{resolve, PreparedProblem, ResolvedRequirement};
use types::{Course, CourseId, Faculty, FacultyId, ProblemData, Room, RoomId, Section, SectionId};

pub struct Prep<'a> {
    pub problem: &'a ProblemData,
    pub course_by_id: HashMap<&'a CourseId, &'a Course>,
    pub section_by_id: HashMap<&'a SectionId, &'a Section>,
    pub faculty_by_id: HashMap<&'a FacultyId, &'a Faculty>,
    pub faculty_map: HashMap<(SectionId, CourseId), FacultyId>,
    pub non_break_timeslots: Vec<usize>,
    pub ts_period_index: HashMap<usize, u32>,
    pub ts_block: HashMap<usize, usize>,
    pub num_blocks: usize,
    /// `(section, course) -> ResolvedRequirement`, limited to pairs with a
    /// nonzero lecture or lab requirement.
    pub requirements: HashMap<(SectionId, CourseId), ResolvedRequirement>,
    pub rooms: Option<&'a [Room]>,
}

impl<'a> Prep<'a> {
    pub fn build(prepared: &'a PreparedProblem<'a>) -> Self {
        let problem = prepared.problem;
        let course_by_id = problem.course_by_id();
        let section_by_id = problem.section_by_id();
        let faculty_by_id: HashMap<&FacultyId, &Faculty> =
            problem.faculty.iter().map(|f| (&f.faculty_id, f)).collect();
        let faculty_map = problem.faculty_assignment_map();
        let req_map = problem.section_course_requirements_map();

        let non_break_timeslots: Vec<usize> = prepared
            .timeslots
            .iter()
            .filter(|t| !t.is_break)
            .map(|t| t.timeslot_id)
            .collect();
        let ts_period_index: HashMap<usize, u32> = prepared
            .timeslots
            .iter()
            .map(|t| (t.timeslot_id, t.period_index))
            .collect();

        let mut ts_block = HashMap::new();
        for block in &prepared.blocks {
            for &t in &block.timeslot_ids {
                ts_block.insert(t, block.block_id);
            }
        }

        let mut requirements = HashMap::new();
        for section in &problem.sections {
            for course in &problem.courses {
                let resolved = resolve(&section.section_id, course, &req_map);
                if resolved.has_lectures() || resolved.has_labs() {
                    requirements.insert(
                        (section.section_id.clone(), course.course_id.clone()),
                        resolved,
                    );
                }
            }
        }

        Prep {
            problem,
            course_by_id,
            section_by_id,
            faculty_by_id,
            faculty_map,
            non_break_timeslots,
            ts_period_index,
            ts_block,
            num_blocks: prepared.blocks.len(),
            requirements,
            rooms: problem.rooms.as_deref(),
        }
    }

    /// Candidate rooms for a lecture variable: capacity is the only filter,
    /// irrespective of `is_lab`. Lab rooms are valid lecture venues too;
    /// `is_lab` only distinguishes room *kind* for the feasibility
    /// pre-check's coverage proof, not room eligibility here.
    pub fn candidate_lecture_rooms(&self, section_id: &SectionId) -> Vec<RoomId> {
        self.candidate_rooms_by_capacity(section_id)
    }

    /// Candidate rooms for a lab-start variable: same capacity-only filter.
    pub fn candidate_lab_rooms(&self, section_id: &SectionId) -> Vec<RoomId> {
        self.candidate_rooms_by_capacity(section_id)
    }

    fn candidate_rooms_by_capacity(&self, section_id: &SectionId) -> Vec<RoomId> {
        let Some(rooms) = self.rooms else {
            return Vec::new();
        };
        let num_students = self
            .section_by_id
            .get(section_id)
            .map(|s| s.num_students)
            .unwrap_or(0);
        rooms
            .iter()
            .filter(|r| r.capacity >= num_students)
            .map(|r| r.room_id.clone())
            .collect()
    }
}
