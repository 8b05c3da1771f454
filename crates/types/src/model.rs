use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::{CourseId, FacultyId, RoomId, SectionId};

/// A single (day, period) row as produced by the loader, already carrying
/// the canonical `day_index` (see `types::day_order`).
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct DayPeriod {
    pub day_index: u32,
    pub day_name: String,
    pub period_index: u32,
    pub is_break: bool,
}

/// A dense, 0-based ordinal timeslot, derived deterministically from
/// `ProblemData::build_timeslots`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash)]
pub struct Timeslot {
    pub day_index: u32,
    pub period_index: u32,
    pub timeslot_id: usize,
    pub is_break: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct Section {
    pub section_id: SectionId,
    pub name: String,
    pub num_students: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct Faculty {
    pub faculty_id: FacultyId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct Course {
    pub course_id: CourseId,
    pub name: String,
    #[serde(default)]
    pub is_lab: bool,
    #[serde(default)]
    pub lecture_periods_per_week: u32,
    #[serde(default)]
    pub lab_sessions_per_week: u32,
    #[serde(default = "default_lab_block_size")]
    pub lab_block_size: u32,
}

fn default_lab_block_size() -> u32 {
    2
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct SectionCourseRequirement {
    pub section_id: SectionId,
    pub course_id: CourseId,
    #[serde(default)]
    pub weekly_lectures: u32,
    #[serde(default)]
    pub weekly_lab_sessions: u32,
    #[serde(default)]
    pub lab_block_size: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct FacultyCourseAssignment {
    pub faculty_id: FacultyId,
    pub course_id: CourseId,
    pub section_id: SectionId,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct Room {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub is_lab: bool,
}

/// A maximal contiguous run of non-break timeslots within a single day.
/// `block_id`s are assigned sequentially across the week in
/// `(day_index, block start period)` order.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct Block {
    pub block_id: usize,
    pub day_index: u32,
    pub timeslot_ids: Vec<usize>,
}

/// The fully loaded, immutable input to a solve.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct ProblemData {
    pub day_periods: Vec<DayPeriod>,
    pub sections: Vec<Section>,
    pub faculty: Vec<Faculty>,
    pub courses: Vec<Course>,
    pub section_requirements: Vec<SectionCourseRequirement>,
    pub faculty_courses: Vec<FacultyCourseAssignment>,
    #[serde(default)]
    pub rooms: Option<Vec<Room>>,
}

impl ProblemData {
    /// Sorts `day_periods` by `(day_index, period_index)` and assigns a
    /// dense 0-based `timeslot_id` in that order.
    pub fn build_timeslots(&self) -> Vec<Timeslot> {
        let mut rows: Vec<&DayPeriod> = self.day_periods.iter().collect();
        rows.sort_by_key(|r| (r.day_index, r.period_index));
        rows.into_iter()
            .enumerate()
            .map(|(timeslot_id, row)| Timeslot {
                day_index: row.day_index,
                period_index: row.period_index,
                timeslot_id,
                is_break: row.is_break,
            })
            .collect()
    }

    pub fn course_by_id(&self) -> HashMap<&CourseId, &Course> {
        self.courses.iter().map(|c| (&c.course_id, c)).collect()
    }

    pub fn section_by_id(&self) -> HashMap<&SectionId, &Section> {
        self.sections.iter().map(|s| (&s.section_id, s)).collect()
    }

    /// `(section_id, course_id) -> faculty_id`. A present `FacultyCourseAssignment`
    /// is required for any course with a nonzero requirement.
    pub fn faculty_assignment_map(&self) -> HashMap<(SectionId, CourseId), FacultyId> {
        self.faculty_courses
            .iter()
            .map(|a| {
                (
                    (a.section_id.clone(), a.course_id.clone()),
                    a.faculty_id.clone(),
                )
            })
            .collect()
    }

    pub fn section_course_requirements_map(
        &self,
    ) -> HashMap<(SectionId, CourseId), &SectionCourseRequirement> {
        self.section_requirements
            .iter()
            .map(|r| ((r.section_id.clone(), r.course_id.clone()), r))
            .collect()
    }
}
