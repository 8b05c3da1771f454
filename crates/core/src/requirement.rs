//! Centralizes the "section requirement overrides course default; missing
//! fields inherit" precedence rule shared by the feasibility pre-check and
//! the model builder.

use std::collections::HashMap;

use types::{Course, SectionCourseRequirement, SectionId};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResolvedRequirement {
    pub weekly_lectures: u32,
    pub weekly_lab_sessions: u32,
    pub lab_block_size: u32,
}

impl ResolvedRequirement {
    pub fn has_lectures(&self) -> bool {
        self.weekly_lectures > 0
    }

    pub fn has_labs(&self) -> bool {
        self.weekly_lab_sessions > 0
    }
}

/// Resolves the effective weekly counts and lab block size for one
/// `(section, course)` pair.
///
/// A present requirement always wins for `weekly_lectures`/
/// `weekly_lab_sessions`; `lab_block_size` falls back to the course default
/// whenever the requirement doesn't specify one, regardless of
/// `course.is_lab` — this lets the feasibility pre-check reject, rather than
/// silently admit, a requirement that turns lab sessions on for a
/// nominally-non-lab course.
pub fn resolve(
    section_id: &SectionId,
    course: &Course,
    req_map: &HashMap<(SectionId, types::CourseId), &SectionCourseRequirement>,
) -> ResolvedRequirement {
    match req_map.get(&(section_id.clone(), course.course_id.clone())) {
        Some(r) => ResolvedRequirement {
            weekly_lectures: r.weekly_lectures,
            weekly_lab_sessions: r.weekly_lab_sessions,
            lab_block_size: r.lab_block_size.unwrap_or(course.lab_block_size),
        },
        None => ResolvedRequirement {
            weekly_lectures: course.lecture_periods_per_week,
            weekly_lab_sessions: if course.is_lab {
                course.lab_sessions_per_week
            } else {
                0
            },
            lab_block_size: course.lab_block_size,
        },
    }
}
