//! Grid rendering and CSV export: per-section and
//! per-faculty weekly grids, the master occupancy grid, and the two
//! free-resource grids. Consumes a `SolveResult` alongside the
//! `ProblemData` it was solved from — the result carries schedules keyed
//! by timeslot id, the problem data supplies the day/period axis those ids
//! are decoded against.

mod error;

use std::collections::{BTreeMap, HashMap};

use types::{ClassKind, FacultyId, ProblemData, RoomId, ScheduleEntry, SectionId, SolveResult};

pub use error::ExportError;

/// A rendered day x period table, ready to be written as CSV. `rows[i][j]`
/// is the cell for `days[i]` / `periods[j]`.
pub struct Grid {
    pub days: Vec<String>,
    pub periods: Vec<u32>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Serializes the grid as CSV text: header `Day,P1,P2,...`, one row per
    /// day in canonical order.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let mut header = vec!["Day".to_string()];
        header.extend(self.periods.iter().map(|p| format!("P{p}")));
        writer.write_record(&header)?;
        for (day, row) in self.days.iter().zip(&self.rows) {
            let mut record = vec![day.clone()];
            record.extend(row.iter().cloned());
            writer.write_record(&record)?;
        }
        let bytes = writer
            .into_inner()
            .expect("flushing an in-memory CSV writer cannot fail");
        Ok(String::from_utf8(bytes).expect("csv writer only emits valid utf8 from String input"))
    }
}

/// `(day_index, period_index) -> timeslot`, plus the canonical day axis and
/// the full set of period indices that appear anywhere in the week. Shared
/// by every grid builder below so each only has to decide what goes in a
/// cell, not how the axes are derived.
struct Axis {
    days: Vec<(u32, String)>,
    periods: Vec<u32>,
    by_day_period: HashMap<(u32, u32), types::Timeslot>,
}

fn build_axis(problem: &ProblemData) -> Axis {
    let timeslots = problem.build_timeslots();
    let day_name_by_index: HashMap<u32, String> = problem
        .day_periods
        .iter()
        .map(|dp| (dp.day_index, dp.day_name.clone()))
        .collect();

    let mut days: BTreeMap<u32, String> = BTreeMap::new();
    let mut periods: std::collections::BTreeSet<u32> = std::collections::BTreeSet::new();
    let mut by_day_period = HashMap::new();
    for ts in &timeslots {
        days.entry(ts.day_index)
            .or_insert_with(|| day_name_by_index.get(&ts.day_index).cloned().unwrap_or_default());
        periods.insert(ts.period_index);
        by_day_period.insert((ts.day_index, ts.period_index), *ts);
    }

    Axis {
        days: days.into_iter().collect(),
        periods: periods.into_iter().collect(),
        by_day_period,
    }
}

fn render<F>(axis: &Axis, mut cell: F) -> Grid
where
    F: FnMut(&types::Timeslot) -> String,
{
    let mut rows = Vec::with_capacity(axis.days.len());
    for (day_index, _name) in &axis.days {
        let mut row = Vec::with_capacity(axis.periods.len());
        for &period_index in &axis.periods {
            let label = match axis.by_day_period.get(&(*day_index, period_index)) {
                Some(ts) if ts.is_break => "BREAK".to_string(),
                Some(ts) => cell(ts),
                None => String::new(),
            };
            row.push(label);
        }
        rows.push(row);
    }
    Grid {
        days: axis.days.iter().map(|(_, name)| name.clone()).collect(),
        periods: axis.periods.clone(),
        rows,
    }
}

/// Identical to `render`, but cells for a `(day, period)` combination that
/// doesn't exist in the input (e.g. a day with fewer periods than another)
/// render as `N/A` instead of blank — used by the master and availability
/// grids.
fn render_na<F>(axis: &Axis, mut cell: F) -> Grid
where
    F: FnMut(&types::Timeslot) -> String,
{
    let mut rows = Vec::with_capacity(axis.days.len());
    for (day_index, _name) in &axis.days {
        let mut row = Vec::with_capacity(axis.periods.len());
        for &period_index in &axis.periods {
            let label = match axis.by_day_period.get(&(*day_index, period_index)) {
                Some(ts) if ts.is_break => "BREAK".to_string(),
                Some(ts) => cell(ts),
                None => "N/A".to_string(),
            };
            row.push(label);
        }
        rows.push(row);
    }
    Grid {
        days: axis.days.iter().map(|(_, name)| name.clone()).collect(),
        periods: axis.periods.clone(),
        rows,
    }
}

fn kind_label(kind: ClassKind) -> &'static str {
    match kind {
        ClassKind::Lecture => "lecture",
        ClassKind::Lab => "lab",
    }
}

/// `"{course} ({faculty}) [{kind}] @{room}"`, room clause omitted when no
/// room is modeled.
fn section_cell(entry: &ScheduleEntry) -> String {
    let mut parts = vec![entry.course_id.to_string(), format!("({})", entry.faculty_id)];
    parts.push(format!("[{}]", kind_label(entry.kind)));
    if let Some(room) = &entry.room_id {
        parts.push(format!("@{room}"));
    }
    parts.join(" ")
}

/// `"{course} (Sec {section}) [{kind}] @{room}"`.
fn faculty_cell(entry: &ScheduleEntry) -> String {
    let section = entry
        .section_id
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_default();
    let mut parts = vec![
        entry.course_id.to_string(),
        format!("(Sec {section})"),
        format!("[{}]", kind_label(entry.kind)),
    ];
    if let Some(room) = &entry.room_id {
        parts.push(format!("@{room}"));
    }
    parts.join(" ")
}

/// Builds the weekly grid for a single section. Empty if `section_id` has
/// no entries in `result.schedule_by_section` (solver found nothing for it,
/// or it doesn't exist).
pub fn section_grid(problem: &ProblemData, result: &SolveResult, section_id: &SectionId) -> Grid {
    let axis = build_axis(problem);
    let by_t = result.schedule_by_section.get(section_id);
    render(&axis, |ts| {
        by_t.and_then(|m| m.get(&ts.timeslot_id))
            .map(section_cell)
            .unwrap_or_default()
    })
}

/// Builds the weekly grid for a single faculty member.
pub fn faculty_grid(problem: &ProblemData, result: &SolveResult, faculty_id: &FacultyId) -> Grid {
    let axis = build_axis(problem);
    let by_t = result.schedule_by_faculty.get(faculty_id);
    render(&axis, |ts| {
        by_t.and_then(|m| m.get(&ts.timeslot_id))
            .map(faculty_cell)
            .unwrap_or_default()
    })
}

/// The master grid: every (day, period) cell lists every section/course
/// pair occupying it, as comma-separated `"{section}:{course}"` entries.
pub fn master_grid(problem: &ProblemData, result: &SolveResult) -> Grid {
    let axis = build_axis(problem);
    render_na(&axis, |ts| {
        let mut entries: Vec<String> = result
            .schedule_by_section
            .iter()
            .filter_map(|(section_id, by_t)| {
                by_t.get(&ts.timeslot_id)
                    .map(|entry| format!("{section_id}:{}", entry.course_id))
            })
            .collect();
        entries.sort();
        entries.join(", ")
    })
}

pub enum AvailabilityKind {
    Rooms,
    Faculty,
}

/// The free-resource grid: `available_rooms.csv` or `available_faculty.csv`.
/// Returns `None` for rooms if `result.available_rooms` is `None` (no rooms
/// were modeled at all).
pub fn availability_grid(
    problem: &ProblemData,
    result: &SolveResult,
    kind: AvailabilityKind,
) -> Option<Grid> {
    let axis = build_axis(problem);
    let render_from = |map: &HashMap<usize, Vec<String>>| {
        render_na(&axis, |ts| {
            if ts.is_break {
                return "BREAK".to_string();
            }
            match map.get(&ts.timeslot_id) {
                Some(free) if !free.is_empty() => free.join(", "),
                _ => "(all occupied)".to_string(),
            }
        })
    };

    match kind {
        AvailabilityKind::Rooms => {
            let rooms = result.available_rooms.as_ref()?;
            let as_strings: HashMap<usize, Vec<String>> = rooms
                .iter()
                .map(|(t, ids)| (*t, ids.iter().map(RoomId::to_string).collect()))
                .collect();
            Some(render_from(&as_strings))
        }
        AvailabilityKind::Faculty => {
            let as_strings: HashMap<usize, Vec<String>> = result
                .available_faculty
                .iter()
                .map(|(t, ids)| (*t, ids.iter().map(FacultyId::to_string).collect()))
                .collect();
            Some(render_from(&as_strings))
        }
    }
}

/// Every CSV this spec's output surface produces, rendered to text. The
/// caller (CLI or API) is responsible for where the bytes end up.
pub struct ExportBundle {
    pub sections: HashMap<SectionId, String>,
    pub faculty: HashMap<FacultyId, String>,
    pub master: String,
    pub available_rooms: Option<String>,
    pub available_faculty: String,
}

pub fn export_all(problem: &ProblemData, result: &SolveResult) -> Result<ExportBundle, ExportError> {
    let mut sections = HashMap::new();
    for section in &problem.sections {
        let grid = section_grid(problem, result, &section.section_id);
        sections.insert(section.section_id.clone(), grid.to_csv()?);
    }

    let mut faculty = HashMap::new();
    for f in &problem.faculty {
        let grid = faculty_grid(problem, result, &f.faculty_id);
        faculty.insert(f.faculty_id.clone(), grid.to_csv()?);
    }

    let master = master_grid(problem, result).to_csv()?;
    let available_rooms = availability_grid(problem, result, AvailabilityKind::Rooms)
        .map(|g| g.to_csv())
        .transpose()?;
    let available_faculty = availability_grid(problem, result, AvailabilityKind::Faculty)
        .expect("faculty availability is always present")
        .to_csv()?;

    Ok(ExportBundle {
        sections,
        faculty,
        master,
        available_rooms,
        available_faculty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{
        ClassKind, Course, CourseId, DayPeriod, Faculty, FacultyCourseAssignment, FacultyId,
        ProblemData, Room, RoomId, Section, SectionCourseRequirement, SectionId, SolveResult,
        SolveStatus,
    };

    fn small_problem() -> ProblemData {
        ProblemData {
            day_periods: vec![
                DayPeriod { day_index: 0, day_name: "Monday".into(), period_index: 1, is_break: false },
                DayPeriod { day_index: 0, day_name: "Monday".into(), period_index: 2, is_break: true },
                DayPeriod { day_index: 1, day_name: "Tuesday".into(), period_index: 1, is_break: false },
            ],
            sections: vec![Section { section_id: SectionId::from("S1"), name: "Sec 1".into(), num_students: 10 }],
            faculty: vec![Faculty { faculty_id: FacultyId::from("F1"), name: "Prof".into() }],
            courses: vec![Course {
                course_id: CourseId::from("C1"),
                name: "Course 1".into(),
                is_lab: false,
                lecture_periods_per_week: 2,
                lab_sessions_per_week: 0,
                lab_block_size: 2,
            }],
            section_requirements: vec![SectionCourseRequirement {
                section_id: SectionId::from("S1"),
                course_id: CourseId::from("C1"),
                weekly_lectures: 2,
                weekly_lab_sessions: 0,
                lab_block_size: None,
            }],
            faculty_courses: vec![FacultyCourseAssignment {
                faculty_id: FacultyId::from("F1"),
                course_id: CourseId::from("C1"),
                section_id: SectionId::from("S1"),
            }],
            rooms: Some(vec![Room { room_id: RoomId::from("R1"), name: "Room 1".into(), capacity: 50, is_lab: false }]),
        }
    }

    fn solved_result() -> SolveResult {
        let mut schedule_by_section = HashMap::new();
        let mut by_t = HashMap::new();
        by_t.insert(0usize, ScheduleEntry {
            course_id: CourseId::from("C1"),
            faculty_id: FacultyId::from("F1"),
            room_id: Some(RoomId::from("R1")),
            kind: ClassKind::Lecture,
            section_id: None,
        });
        schedule_by_section.insert(SectionId::from("S1"), by_t);

        let mut schedule_by_faculty = HashMap::new();
        let mut fby_t = HashMap::new();
        fby_t.insert(0usize, ScheduleEntry {
            course_id: CourseId::from("C1"),
            faculty_id: FacultyId::from("F1"),
            room_id: Some(RoomId::from("R1")),
            kind: ClassKind::Lecture,
            section_id: Some(SectionId::from("S1")),
        });
        schedule_by_faculty.insert(FacultyId::from("F1"), fby_t);

        SolveResult {
            status: SolveStatus::Optimal,
            objective_value: Some(0),
            schedule_by_section,
            schedule_by_faculty,
            available_rooms: Some(HashMap::new()),
            available_faculty: HashMap::new(),
        }
    }

    #[test]
    fn section_grid_marks_breaks_and_classes() {
        let problem = small_problem();
        let result = solved_result();
        let grid = section_grid(&problem, &result, &SectionId::from("S1"));
        assert_eq!(grid.days, vec!["Monday", "Tuesday"]);
        assert_eq!(grid.rows[0][0], "C1 (F1) [lecture] @R1");
        assert_eq!(grid.rows[0][1], "BREAK");
        assert_eq!(grid.rows[1][0], "");
    }

    #[test]
    fn master_grid_lists_section_course_pairs() {
        let problem = small_problem();
        let result = solved_result();
        let grid = master_grid(&problem, &result);
        assert_eq!(grid.rows[0][0], "S1:C1");
    }

    #[test]
    fn availability_grid_reports_all_occupied_when_empty() {
        let problem = small_problem();
        let result = solved_result();
        let grid = availability_grid(&problem, &result, AvailabilityKind::Faculty).unwrap();
        assert_eq!(grid.rows[1][0], "(all occupied)");
    }

    #[test]
    fn export_all_produces_csv_for_every_section_and_faculty() {
        let problem = small_problem();
        let result = solved_result();
        let bundle = export_all(&problem, &result).unwrap();
        assert!(bundle.sections.contains_key(&SectionId::from("S1")));
        assert!(bundle.faculty.contains_key(&FacultyId::from("F1")));
        assert!(bundle.master.contains("S1:C1"));
    }

    /// Renders a grid's cells as `" | "`-joined rows, `_` standing in for an
    /// empty cell, so snapshots stay readable without depending on the `csv`
    /// crate's own quoting/line-ending choices.
    fn render_rows(grid: &Grid) -> String {
        grid.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| if c.is_empty() { "_" } else { c.as_str() })
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn section_grid_snapshot() {
        let problem = small_problem();
        let result = solved_result();
        let grid = section_grid(&problem, &result, &SectionId::from("S1"));
        insta::assert_snapshot!(render_rows(&grid), @r###"
        C1 (F1) [lecture] @R1 | BREAK
        _ | _
        "###);
    }

    #[test]
    fn master_grid_snapshot() {
        let problem = small_problem();
        let result = solved_result();
        let grid = master_grid(&problem, &result);
        insta::assert_snapshot!(render_rows(&grid), @r###"
        S1:C1 | BREAK
        _ | N/A
        "###);
    }

    #[test]
    fn available_faculty_grid_snapshot() {
        let problem = small_problem();
        let result = solved_result();
        let grid = availability_grid(&problem, &result, AvailabilityKind::Faculty).unwrap();
        insta::assert_snapshot!(render_rows(&grid), @r###"
        (all occupied) | BREAK
        (all occupied) | N/A
        "###);
    }
}
