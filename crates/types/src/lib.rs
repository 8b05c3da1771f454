pub mod day_order;
mod ids;
mod model;
mod schedule;

pub use ids::{CourseId, FacultyId, RoomId, SectionId};
pub use model::{
    Block, Course, DayPeriod, Faculty, FacultyCourseAssignment, ProblemData, Room, Section,
    SectionCourseRequirement, Timeslot,
};
pub use schedule::{
    ClassKind, ScheduleEntry, SolveParams, SolveResult, SolveStatus, TimeslotId,
};
