use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::{CourseId, FacultyId, RoomId, SectionId};

/// Parameters the caller passes to a single `solve` invocation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct SolveParams {
    pub time_limit_sec: u64,
    #[serde(default)]
    pub optimize_gaps: bool,
    #[serde(default = "default_workers")]
    pub workers: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_workers() -> u32 {
    8
}

fn default_seed() -> u64 {
    1
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            time_limit_sec: 60,
            optimize_gaps: false,
            workers: default_workers(),
            seed: default_seed(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Lecture,
    Lab,
}

/// One occupied (section|faculty, timeslot) cell of a decoded schedule.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct ScheduleEntry {
    pub course_id: CourseId,
    /// The faculty teaching this entry (always present — §4.1 #3 makes it a
    /// feasibility precondition).
    pub faculty_id: FacultyId,
    /// `None` when `ProblemData.rooms` is absent.
    pub room_id: Option<RoomId>,
    pub kind: ClassKind,
    /// Present only in the per-faculty schedule view, where the section
    /// isn't otherwise implied by the map key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<SectionId>,
}

pub type TimeslotId = usize;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct SolveResult {
    pub status: SolveStatus,
    pub objective_value: Option<i64>,
    pub schedule_by_section: HashMap<SectionId, HashMap<TimeslotId, ScheduleEntry>>,
    pub schedule_by_faculty: HashMap<FacultyId, HashMap<TimeslotId, ScheduleEntry>>,
    /// Present only when `ProblemData.rooms` was supplied.
    pub available_rooms: Option<HashMap<TimeslotId, Vec<RoomId>>>,
    pub available_faculty: HashMap<TimeslotId, Vec<FacultyId>>,
}

impl SolveResult {
    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            objective_value: None,
            schedule_by_section: HashMap::new(),
            schedule_by_faculty: HashMap::new(),
            available_rooms: None,
            available_faculty: HashMap::new(),
        }
    }
}
