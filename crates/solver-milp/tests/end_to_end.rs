//! End-to-end scenarios and universal invariants, run
//! against a real MILP solve.

mod support;

use std::collections::{HashMap, HashSet};

use types::{ClassKind, ProblemData, SolveStatus};

#[test]
fn trivial_single_section_single_course() {
    let problem = ProblemData {
        day_periods: support::days(5, 5, &[]),
        sections: vec![support::section("S1", 30)],
        faculty: vec![support::faculty("F1")],
        courses: vec![support::lecture_course("C1")],
        section_requirements: vec![support::requirement("S1", "C1", 3, 0)],
        faculty_courses: vec![support::assignment("F1", "C1", "S1")],
        rooms: None,
    };

    let result = support::solve(&problem, &support::default_params()).expect("solve succeeds");
    assert_ne!(result.status, SolveStatus::Infeasible);

    let section_entries = &result.schedule_by_section[&support::section("S1", 30).section_id];
    assert_eq!(section_entries.len(), 3);
    assert!(section_entries.values().all(|e| e.kind == ClassKind::Lecture));

    let faculty_entries = &result.schedule_by_faculty[&support::faculty("F1").faculty_id];
    assert_eq!(faculty_entries.len(), 3);
}

#[test]
fn lab_block_lands_on_the_only_valid_start() {
    // One day, 4 periods, period 3 is a break: blocks are {1,2} and {4}.
    let problem = ProblemData {
        day_periods: support::days(1, 4, &[(0, 3)]),
        sections: vec![support::section("S1", 20)],
        faculty: vec![support::faculty("F1")],
        courses: vec![support::lab_course("LAB", 2)],
        section_requirements: vec![support::requirement("S1", "LAB", 0, 1)],
        faculty_courses: vec![support::assignment("F1", "LAB", "S1")],
        rooms: None,
    };

    let result = support::solve(&problem, &support::default_params()).expect("solve succeeds");
    assert_ne!(result.status, SolveStatus::Infeasible);

    let periods = support::period_index_by_timeslot(&problem);
    let entries = &result.schedule_by_section[&support::section("S1", 20).section_id];
    assert_eq!(entries.len(), 2);

    let mut period_indices: Vec<u32> = entries.keys().map(|t| periods[t]).collect();
    period_indices.sort();
    assert_eq!(period_indices, vec![1, 2]);
    assert!(entries.values().all(|e| e.kind == ClassKind::Lab));
}

#[test]
fn faculty_clash_is_avoided_between_two_sections() {
    let problem = ProblemData {
        day_periods: support::days(5, 5, &[]),
        sections: vec![support::section("S1", 20), support::section("S2", 20)],
        faculty: vec![support::faculty("F1")],
        courses: vec![support::lecture_course("C1")],
        section_requirements: vec![
            support::requirement("S1", "C1", 3, 0),
            support::requirement("S2", "C1", 3, 0),
        ],
        faculty_courses: vec![
            support::assignment("F1", "C1", "S1"),
            support::assignment("F1", "C1", "S2"),
        ],
        rooms: None,
    };

    let result = support::solve(&problem, &support::default_params()).expect("solve succeeds");
    assert_ne!(result.status, SolveStatus::Infeasible);

    let faculty_entries = &result.schedule_by_faculty[&support::faculty("F1").faculty_id];
    assert_eq!(faculty_entries.len(), 6);

    assert_eq!(result.schedule_by_section[&support::section("S1", 20).section_id].len(), 3);
    assert_eq!(result.schedule_by_section[&support::section("S2", 20).section_id].len(), 3);
}

#[test]
fn room_capacity_filter_forces_the_larger_room() {
    let problem = ProblemData {
        day_periods: support::days(2, 3, &[]),
        sections: vec![support::section("S1", 60)],
        faculty: vec![support::faculty("F1")],
        courses: vec![support::lecture_course("C1")],
        section_requirements: vec![support::requirement("S1", "C1", 1, 0)],
        faculty_courses: vec![support::assignment("F1", "C1", "S1")],
        rooms: Some(vec![
            support::room("A", 40, false),
            support::room("B", 60, false),
        ]),
    };

    let result = support::solve(&problem, &support::default_params()).expect("solve succeeds");
    assert_ne!(result.status, SolveStatus::Infeasible);

    let entries = &result.schedule_by_section[&support::section("S1", 60).section_id];
    assert_eq!(entries.len(), 1);
    let entry = entries.values().next().unwrap();
    assert_eq!(entry.room_id.as_ref().unwrap().to_string(), "B");
}

#[test]
fn room_stickiness_holds_within_a_block_across_a_break() {
    // One day, periods 1,2,4 non-break, period 3 a break: blocks {1,2}, {4}.
    // Weekly lectures == non-break timeslot count forces all three slots used.
    let problem = ProblemData {
        day_periods: support::days(1, 4, &[(0, 3)]),
        sections: vec![support::section("S1", 20)],
        faculty: vec![support::faculty("F1")],
        courses: vec![support::lecture_course("C1")],
        section_requirements: vec![support::requirement("S1", "C1", 3, 0)],
        faculty_courses: vec![support::assignment("F1", "C1", "S1")],
        rooms: Some(vec![
            support::room("A", 40, false),
            support::room("B", 40, false),
        ]),
    };

    let result = support::solve(&problem, &support::default_params()).expect("solve succeeds");
    assert_ne!(result.status, SolveStatus::Infeasible);

    let periods = support::period_index_by_timeslot(&problem);
    let entries = &result.schedule_by_section[&support::section("S1", 20).section_id];
    assert_eq!(entries.len(), 3);

    let room_at = |period: u32| {
        entries
            .iter()
            .find(|(t, _)| periods[t] == period)
            .and_then(|(_, e)| e.room_id.clone())
            .expect("period filled")
    };
    assert_eq!(room_at(1), room_at(2));
}

#[test]
fn first_period_cap_violation_is_reported_infeasible() {
    // Four sections sharing one faculty and one course, four single-period
    // days: every available slot is period 1, so the faculty would need
    // four first-period classes against a cap of three.
    let problem = ProblemData {
        day_periods: support::days(4, 1, &[]),
        sections: vec![
            support::section("S1", 10),
            support::section("S2", 10),
            support::section("S3", 10),
            support::section("S4", 10),
        ],
        faculty: vec![support::faculty("F1")],
        courses: vec![support::lecture_course("C1")],
        section_requirements: vec![
            support::requirement("S1", "C1", 1, 0),
            support::requirement("S2", "C1", 1, 0),
            support::requirement("S3", "C1", 1, 0),
            support::requirement("S4", "C1", 1, 0),
        ],
        faculty_courses: vec![
            support::assignment("F1", "C1", "S1"),
            support::assignment("F1", "C1", "S2"),
            support::assignment("F1", "C1", "S3"),
            support::assignment("F1", "C1", "S4"),
        ],
        rooms: None,
    };

    let result = support::solve(&problem, &support::default_params()).expect("solve succeeds");
    assert_eq!(result.status, SolveStatus::Infeasible);
    assert!(result.schedule_by_section.is_empty());
}

#[test]
fn invariants_hold_on_a_mixed_problem_with_labs_and_rooms() {
    let problem = ProblemData {
        day_periods: support::days(2, 5, &[(0, 3), (1, 3)]),
        sections: vec![support::section("S1", 40), support::section("S2", 30)],
        faculty: vec![support::faculty("F1"), support::faculty("F2")],
        courses: vec![support::lecture_course("LEC"), support::lab_course("LAB", 2)],
        section_requirements: vec![
            support::requirement("S1", "LEC", 2, 0),
            support::requirement("S2", "LEC", 2, 0),
            support::requirement("S1", "LAB", 0, 1),
        ],
        faculty_courses: vec![
            support::assignment("F1", "LEC", "S1"),
            support::assignment("F1", "LAB", "S1"),
            support::assignment("F2", "LEC", "S2"),
        ],
        rooms: Some(vec![
            support::room("R-LEC", 60, false),
            support::room("R-LAB", 60, true),
        ]),
    };

    let result = support::solve(&problem, &support::default_params()).expect("solve succeeds");
    assert_ne!(result.status, SolveStatus::Infeasible);

    let breaks: HashSet<_> = support::break_timeslots(&problem).into_iter().collect();
    let periods = support::period_index_by_timeslot(&problem);
    let days = support::day_index_by_timeslot(&problem);

    // 1. Count laws.
    let s1 = &result.schedule_by_section[&support::section("S1", 40).section_id];
    let s2 = &result.schedule_by_section[&support::section("S2", 30).section_id];
    assert_eq!(s1.values().filter(|e| e.kind == ClassKind::Lecture).count(), 2);
    assert_eq!(s1.values().filter(|e| e.kind == ClassKind::Lab).count(), 2); // one session, block size 2
    assert_eq!(s2.values().filter(|e| e.kind == ClassKind::Lecture).count(), 2);

    // 2. Contiguous labs, same day, consecutive periods.
    let mut lab_ts: Vec<_> = s1
        .iter()
        .filter(|(_, e)| e.kind == ClassKind::Lab)
        .map(|(t, _)| *t)
        .collect();
    lab_ts.sort();
    assert_eq!(lab_ts.len(), 2);
    assert_eq!(days[&lab_ts[0]], days[&lab_ts[1]]);
    assert_eq!(periods[&lab_ts[1]], periods[&lab_ts[0]] + 1);

    // 5. First-period cap: no faculty teaches more than 3 period-1 slots.
    let mut first_period_counts: HashMap<&str, u32> = HashMap::new();
    for (faculty_id, by_ts) in &result.schedule_by_faculty {
        let n = by_ts.keys().filter(|t| periods[t] == 1).count() as u32;
        first_period_counts.insert(faculty_id.0.as_str(), n);
    }
    assert!(first_period_counts.values().all(|&n| n <= 3));

    // 6. Room exclusivity: at most one section per room per timeslot.
    let mut room_use: HashMap<(types::TimeslotId, String), u32> = HashMap::new();
    for by_ts in result.schedule_by_section.values() {
        for (t, entry) in by_ts {
            if let Some(room_id) = &entry.room_id {
                *room_use.entry((*t, room_id.0.clone())).or_insert(0) += 1;
            }
        }
    }
    assert!(room_use.values().all(|&n| n <= 1));

    // 7. Room capacity: every assigned room seats the section.
    let capacity: HashMap<&str, u32> = problem
        .rooms
        .as_ref()
        .unwrap()
        .iter()
        .map(|r| (r.room_id.0.as_str(), r.capacity))
        .collect();
    for (section, by_ts) in &result.schedule_by_section {
        let num_students = problem
            .sections
            .iter()
            .find(|s| &s.section_id == section)
            .unwrap()
            .num_students;
        for entry in by_ts.values() {
            if let Some(room_id) = &entry.room_id {
                assert!(capacity[room_id.0.as_str()] >= num_students);
            }
        }
    }

    // 9. Break inviolability.
    for by_ts in result.schedule_by_section.values() {
        for t in by_ts.keys() {
            assert!(!breaks.contains(t));
        }
    }
}

#[test]
fn repeated_solves_with_the_same_seed_agree() {
    let problem = ProblemData {
        day_periods: support::days(5, 5, &[]),
        sections: vec![support::section("S1", 30)],
        faculty: vec![support::faculty("F1")],
        courses: vec![support::lecture_course("C1")],
        section_requirements: vec![support::requirement("S1", "C1", 3, 0)],
        faculty_courses: vec![support::assignment("F1", "C1", "S1")],
        rooms: None,
    };

    let params = support::default_params();
    let first = support::solve(&problem, &params).expect("solve succeeds");
    let second = support::solve(&problem, &params).expect("solve succeeds");

    assert_eq!(first.status, second.status);
    assert_eq!(support::section_entries(&first), support::section_entries(&second));
}
