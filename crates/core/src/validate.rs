//! Structural validation of a loaded `ProblemData`: duplicate ids and
//! dangling references. Distinct from `feasibility`, which reasons about
//! whether the *solve* can succeed — this only checks the data is
//! internally consistent enough to build a model from at all.

use std::collections::HashSet;

use thiserror::Error;
use types::ProblemData;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid problem data: {0}")]
    Msg(String),
}

pub fn validate(problem: &ProblemData) -> Result<(), ValidationError> {
    let mut errors: Vec<String> = Vec::new();

    chk_unique(
        "section",
        problem.sections.iter().map(|s| s.section_id.to_string()),
        &mut errors,
    );
    chk_unique(
        "faculty",
        problem.faculty.iter().map(|f| f.faculty_id.to_string()),
        &mut errors,
    );
    chk_unique(
        "course",
        problem.courses.iter().map(|c| c.course_id.to_string()),
        &mut errors,
    );
    if let Some(rooms) = &problem.rooms {
        chk_unique(
            "room",
            rooms.iter().map(|r| r.room_id.to_string()),
            &mut errors,
        );
    }

    let section_ids: HashSet<_> = problem.sections.iter().map(|s| &s.section_id).collect();
    let course_ids: HashSet<_> = problem.courses.iter().map(|c| &c.course_id).collect();
    let faculty_ids: HashSet<_> = problem.faculty.iter().map(|f| &f.faculty_id).collect();

    for r in &problem.section_requirements {
        if !section_ids.contains(&r.section_id) {
            errors.push(format!(
                "requirement references missing section {}",
                r.section_id
            ));
        }
        if !course_ids.contains(&r.course_id) {
            errors.push(format!(
                "requirement references missing course {}",
                r.course_id
            ));
        }
    }

    for a in &problem.faculty_courses {
        if !faculty_ids.contains(&a.faculty_id) {
            errors.push(format!(
                "faculty assignment references missing faculty {}",
                a.faculty_id
            ));
        }
        if !section_ids.contains(&a.section_id) {
            errors.push(format!(
                "faculty assignment references missing section {}",
                a.section_id
            ));
        }
        if !course_ids.contains(&a.course_id) {
            errors.push(format!(
                "faculty assignment references missing course {}",
                a.course_id
            ));
        }
    }

    for c in &problem.courses {
        if c.lab_sessions_per_week > 0 && !c.is_lab {
            errors.push(format!(
                "course {} has lab_sessions_per_week > 0 but is_lab is false",
                c.course_id
            ));
        }
        if c.lab_block_size == 0 {
            errors.push(format!(
                "course {} has lab_block_size 0",
                c.course_id
            ));
        }
    }

    if problem.day_periods.is_empty() {
        errors.push("day_periods is empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Msg(errors.join("; ")))
    }
}

fn chk_unique(name: &str, ids: impl Iterator<Item = String>, errors: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            errors.push(format!("duplicate {name} id: {id}"));
        }
    }
}
