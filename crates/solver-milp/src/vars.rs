//! Sparse decision variable declaration. Every map is keyed
//! by tuple and populated only where a requirement or candidate room
//! actually exists — never by dense (section × course × timeslot × room)
//! enumeration.

use std::collections::HashMap;

use good_lp::{variable, ProblemVariables, Variable};
use sched_core::blocks::valid_lab_starts;
use types::{Block, CourseId, RoomId, SectionId, TimeslotId};

use crate::prep::Prep;

pub struct Vars {
    pub x: HashMap<(SectionId, CourseId, TimeslotId), Variable>,
    pub y: HashMap<(SectionId, CourseId, TimeslotId), Variable>,
    pub rl: HashMap<(SectionId, CourseId, TimeslotId, RoomId), Variable>,
    pub rb: HashMap<(SectionId, CourseId, TimeslotId, RoomId), Variable>,
    pub br: HashMap<(SectionId, usize, RoomId), Variable>,
}

pub fn declare_variables(prep: &Prep, blocks: &[Block], vars: &mut ProblemVariables) -> Vars {
    let mut x = HashMap::new();
    let mut y = HashMap::new();
    let mut rl = HashMap::new();
    let mut rb = HashMap::new();
    let mut br: HashMap<(SectionId, usize, RoomId), Variable> = HashMap::new();

    // section -> set of blocks it has a candidate timeslot in, used to scope BR.
    let mut section_blocks: HashMap<SectionId, std::collections::HashSet<usize>> = HashMap::new();

    for ((section_id, course_id), req) in &prep.requirements {
        if req.has_lectures() {
            for &t in &prep.non_break_timeslots {
                x.insert((section_id.clone(), course_id.clone(), t), vars.add(variable().binary()));

                if let Some(block_id) = prep.ts_block.get(&t) {
                    section_blocks
                        .entry(section_id.clone())
                        .or_default()
                        .insert(*block_id);
                }

                if prep.rooms.is_some() {
                    for room_id in prep.candidate_lecture_rooms(section_id) {
                        rl.insert(
                            (section_id.clone(), course_id.clone(), t, room_id),
                            vars.add(variable().binary()),
                        );
                    }
                }
            }
        }

        if req.has_labs() {
            let starts = valid_lab_starts(blocks, req.lab_block_size);
            for start in starts {
                y.insert(
                    (section_id.clone(), course_id.clone(), start),
                    vars.add(variable().binary()),
                );

                if let Some(block_id) = prep.ts_block.get(&start) {
                    section_blocks
                        .entry(section_id.clone())
                        .or_default()
                        .insert(*block_id);
                }

                if prep.rooms.is_some() {
                    for room_id in prep.candidate_lab_rooms(section_id) {
                        rb.insert(
                            (section_id.clone(), course_id.clone(), start, room_id),
                            vars.add(variable().binary()),
                        );
                    }
                }
            }
        }
    }

    if prep.rooms.is_some() {
        for (section_id, block_ids) in &section_blocks {
            let mut candidate_rooms = prep.candidate_lecture_rooms(section_id);
            for r in prep.candidate_lab_rooms(section_id) {
                if !candidate_rooms.contains(&r) {
                    candidate_rooms.push(r);
                }
            }
            for &block_id in block_ids {
                for room_id in &candidate_rooms {
                    br.insert(
                        (section_id.clone(), block_id, room_id.clone()),
                        vars.add(variable().binary()),
                    );
                }
            }
        }
    }

    Vars { x, y, rl, rb, br }
}
