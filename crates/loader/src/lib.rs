//! CSV ingestion. Builds a populated, not-yet-validated
//! `ProblemData` from either a directory on disk or a map of filename to raw
//! CSV text — the latter is how `timetable-api` hands the loader the
//! base64-decoded files it receives over HTTP, so both entrypoints share
//! this one parsing implementation.
//!
//! Structural consistency (duplicate ids, dangling references) is not this
//! crate's job — that's `sched_core::validate`. This crate only turns text
//! into typed rows, trimming whitespace and reporting file+column context on
//! failure.

pub mod error;

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use types::{
    day_order::order_day_names, Course, CourseId, DayPeriod, Faculty, FacultyCourseAssignment,
    FacultyId, ProblemData, Room, RoomId, Section, SectionCourseRequirement, SectionId,
};

pub use error::LoaderError;

const DAY_WORKSHEET: &str = "day_worksheet.csv";
const SECTIONS: &str = "sections.csv";
const FACULTY: &str = "faculty.csv";
const COURSES: &str = "courses.csv";
const SECTION_REQUIREMENTS: &str = "section_course_requirements.csv";
const FACULTY_COURSES: &str = "faculty_courses.csv";
const ROOMS: &str = "rooms.csv";

const REQUIRED_FILES: [&str; 6] = [
    DAY_WORKSHEET,
    SECTIONS,
    FACULTY,
    COURSES,
    SECTION_REQUIREMENTS,
    FACULTY_COURSES,
];

/// Reads the six required CSVs (and `rooms.csv` if present) from `dir`.
pub fn load_from_dir(dir: &Path) -> Result<ProblemData, LoaderError> {
    let mut files = HashMap::new();
    for name in REQUIRED_FILES {
        let text = std::fs::read_to_string(dir.join(name))
            .map_err(|_| LoaderError::MissingFile(name.to_string()))?;
        files.insert(name.to_string(), text);
    }
    let rooms_path = dir.join(ROOMS);
    if rooms_path.exists() {
        let text = std::fs::read_to_string(&rooms_path)
            .map_err(|_| LoaderError::MissingFile(ROOMS.to_string()))?;
        files.insert(ROOMS.to_string(), text);
    }
    load_from_files(&files)
}

/// Builds a `ProblemData` from in-memory `filename -> raw CSV text`.
/// `rooms.csv` is the only optional entry; everything else in
/// `REQUIRED_FILES` must be present.
pub fn load_from_files(files: &HashMap<String, String>) -> Result<ProblemData, LoaderError> {
    let day_periods = load_day_worksheet(required(files, DAY_WORKSHEET)?)?;
    let sections = load_sections(required(files, SECTIONS)?)?;
    let faculty = load_faculty(required(files, FACULTY)?)?;
    let courses = load_courses(required(files, COURSES)?)?;
    let section_requirements = load_section_requirements(required(files, SECTION_REQUIREMENTS)?)?;
    let faculty_courses = load_faculty_courses(required(files, FACULTY_COURSES)?)?;
    let rooms = files.get(ROOMS).map(|text| load_rooms(text)).transpose()?;

    Ok(ProblemData {
        day_periods,
        sections,
        faculty,
        courses,
        section_requirements,
        faculty_courses,
        rooms,
    })
}

fn required<'a>(files: &'a HashMap<String, String>, name: &str) -> Result<&'a str, LoaderError> {
    files
        .get(name)
        .map(|s| s.as_str())
        .ok_or_else(|| LoaderError::MissingFile(name.to_string()))
}

/// A CSV's header row, indexed by column name, so cell lookups below never
/// re-scan the header per row.
struct Table<'a> {
    file: &'a str,
    index: HashMap<String, usize>,
}

impl<'a> Table<'a> {
    fn new(file: &'a str, headers: &StringRecord, required_cols: &[&str]) -> Result<Self, LoaderError> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_string(), i))
            .collect();
        let missing: Vec<&str> = required_cols
            .iter()
            .copied()
            .filter(|c| !index.contains_key(*c))
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns {
                file: file.to_string(),
                columns: missing.join(", "),
            });
        }
        Ok(Self {
            file,
            index,
        })
    }

    fn cell<'r>(&self, record: &'r StringRecord, col: &str) -> &'r str {
        self.index
            .get(col)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }

    fn malformed(&self, column: &str, row: usize, message: impl Into<String>) -> LoaderError {
        LoaderError::MalformedCell {
            file: self.file.to_string(),
            column: column.to_string(),
            row,
            message: message.into(),
        }
    }

    fn parse_u32(&self, record: &StringRecord, col: &str, row: usize) -> Result<u32, LoaderError> {
        let raw = self.cell(record, col);
        raw.parse::<u32>()
            .map_err(|_| self.malformed(col, row, format!("expected a non-negative integer, got '{raw}'")))
    }

    fn parse_bool01(&self, record: &StringRecord, col: &str, row: usize) -> Result<bool, LoaderError> {
        let raw = self.cell(record, col);
        if raw.is_empty() {
            return Ok(false);
        }
        match raw.parse::<i64>() {
            Ok(v) => Ok(v != 0),
            Err(_) => Err(self.malformed(col, row, format!("expected 0 or 1, got '{raw}'"))),
        }
    }

    fn parse_optional_u32(
        &self,
        record: &StringRecord,
        col: &str,
        row: usize,
    ) -> Result<Option<u32>, LoaderError> {
        let raw = self.cell(record, col);
        if raw.is_empty() {
            return Ok(None);
        }
        let parsed: i64 = raw
            .parse()
            .map_err(|_| self.malformed(col, row, format!("expected an integer or blank, got '{raw}'")))?;
        // A non-positive value is treated as "unspecified" (inherit defaults),
        // matching the original loader's handling of stray zeroes/negatives.
        Ok(if parsed > 0 { Some(parsed as u32) } else { None })
    }
}

fn reader_for(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new().trim(Trim::All).from_reader(text.as_bytes())
}

fn load_day_worksheet(text: &str) -> Result<Vec<DayPeriod>, LoaderError> {
    let mut rdr = reader_for(text);
    let headers = rdr.headers().map_err(|e| LoaderError::csv(DAY_WORKSHEET, e))?.clone();
    let table = Table::new(DAY_WORKSHEET, &headers, &["day_name", "period_index", "is_break"])?;

    struct Raw {
        day_name: String,
        period_index: u32,
        is_break: bool,
    }

    let mut raw_rows = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| LoaderError::csv(DAY_WORKSHEET, e))?;
        let day_name = table.cell(&record, "day_name").to_string();
        if day_name.is_empty() {
            return Err(table.malformed("day_name", row, "day_name must not be blank"));
        }
        let period_index = table.parse_u32(&record, "period_index", row)?;
        if period_index < 1 {
            return Err(table.malformed("period_index", row, "period_index must be >= 1"));
        }
        let is_break = table.parse_bool01(&record, "is_break", row)?;
        raw_rows.push(Raw {
            day_name,
            period_index,
            is_break,
        });
    }

    let ordered_names = order_day_names(raw_rows.iter().map(|r| r.day_name.as_str()));
    let day_index: HashMap<&str, u32> = ordered_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i as u32))
        .collect();

    Ok(raw_rows
        .into_iter()
        .map(|r| DayPeriod {
            day_index: day_index[r.day_name.as_str()],
            day_name: r.day_name,
            period_index: r.period_index,
            is_break: r.is_break,
        })
        .collect())
}

fn load_sections(text: &str) -> Result<Vec<Section>, LoaderError> {
    let mut rdr = reader_for(text);
    let headers = rdr.headers().map_err(|e| LoaderError::csv(SECTIONS, e))?.clone();
    let table = Table::new(SECTIONS, &headers, &["section_id", "section_name", "num_students"])?;

    let mut out = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| LoaderError::csv(SECTIONS, e))?;
        out.push(Section {
            section_id: SectionId::from(table.cell(&record, "section_id")),
            name: table.cell(&record, "section_name").to_string(),
            num_students: table.parse_u32(&record, "num_students", row)?,
        });
    }
    Ok(out)
}

fn load_faculty(text: &str) -> Result<Vec<Faculty>, LoaderError> {
    let mut rdr = reader_for(text);
    let headers = rdr.headers().map_err(|e| LoaderError::csv(FACULTY, e))?.clone();
    let table = Table::new(FACULTY, &headers, &["faculty_id", "faculty_name"])?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| LoaderError::csv(FACULTY, e))?;
        out.push(Faculty {
            faculty_id: FacultyId::from(table.cell(&record, "faculty_id")),
            name: table.cell(&record, "faculty_name").to_string(),
        });
    }
    Ok(out)
}

fn load_courses(text: &str) -> Result<Vec<Course>, LoaderError> {
    let mut rdr = reader_for(text);
    let headers = rdr.headers().map_err(|e| LoaderError::csv(COURSES, e))?.clone();
    let table = Table::new(
        COURSES,
        &headers,
        &[
            "course_id",
            "course_name",
            "is_lab",
            "lecture_periods_per_week",
            "lab_sessions_per_week",
            "lab_block_size",
        ],
    )?;

    let mut out = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| LoaderError::csv(COURSES, e))?;
        let lab_block_size = table
            .parse_optional_u32(&record, "lab_block_size", row)?
            .unwrap_or(2);
        out.push(Course {
            course_id: CourseId::from(table.cell(&record, "course_id")),
            name: table.cell(&record, "course_name").to_string(),
            is_lab: table.parse_bool01(&record, "is_lab", row)?,
            lecture_periods_per_week: table.parse_u32(&record, "lecture_periods_per_week", row)?,
            lab_sessions_per_week: table.parse_u32(&record, "lab_sessions_per_week", row)?,
            lab_block_size,
        });
    }
    Ok(out)
}

fn load_section_requirements(text: &str) -> Result<Vec<SectionCourseRequirement>, LoaderError> {
    let mut rdr = reader_for(text);
    let headers = rdr
        .headers()
        .map_err(|e| LoaderError::csv(SECTION_REQUIREMENTS, e))?
        .clone();
    let table = Table::new(
        SECTION_REQUIREMENTS,
        &headers,
        &[
            "section_id",
            "course_id",
            "weekly_lectures",
            "weekly_lab_sessions",
            "lab_block_size",
        ],
    )?;

    let mut out = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| LoaderError::csv(SECTION_REQUIREMENTS, e))?;
        out.push(SectionCourseRequirement {
            section_id: SectionId::from(table.cell(&record, "section_id")),
            course_id: CourseId::from(table.cell(&record, "course_id")),
            weekly_lectures: table.parse_u32(&record, "weekly_lectures", row)?,
            weekly_lab_sessions: table.parse_u32(&record, "weekly_lab_sessions", row)?,
            lab_block_size: table.parse_optional_u32(&record, "lab_block_size", row)?,
        });
    }
    Ok(out)
}

fn load_faculty_courses(text: &str) -> Result<Vec<FacultyCourseAssignment>, LoaderError> {
    let mut rdr = reader_for(text);
    let headers = rdr
        .headers()
        .map_err(|e| LoaderError::csv(FACULTY_COURSES, e))?
        .clone();
    let table = Table::new(FACULTY_COURSES, &headers, &["faculty_id", "course_id", "section_id"])?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| LoaderError::csv(FACULTY_COURSES, e))?;
        out.push(FacultyCourseAssignment {
            faculty_id: FacultyId::from(table.cell(&record, "faculty_id")),
            course_id: CourseId::from(table.cell(&record, "course_id")),
            section_id: SectionId::from(table.cell(&record, "section_id")),
        });
    }
    Ok(out)
}

fn load_rooms(text: &str) -> Result<Vec<Room>, LoaderError> {
    let mut rdr = reader_for(text);
    let headers = rdr.headers().map_err(|e| LoaderError::csv(ROOMS, e))?.clone();
    let table = Table::new(ROOMS, &headers, &["room_id", "room_name", "capacity", "is_lab"])?;

    let mut out = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| LoaderError::csv(ROOMS, e))?;
        out.push(Room {
            room_id: RoomId::from(table.cell(&record, "room_id")),
            name: table.cell(&record, "room_name").to_string(),
            capacity: table.parse_u32(&record, "capacity", row)?,
            is_lab: table.parse_bool01(&record, "is_lab", row)?,
        });
    }
    Ok(out)
}
