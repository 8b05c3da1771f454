//! Partitions each day into maximal contiguous runs of non-break timeslots
//! ("blocks"), which the lab placement constraints walk a sliding window
//! over.

use types::{Block, Timeslot};

/// Builds the week's blocks from a sorted `Vec<Timeslot>` (as produced by
/// `ProblemData::build_timeslots`). `block_id`s are assigned sequentially in
/// `(day_index, block start period)` order, matching the order timeslots
/// already come in.
pub fn build_blocks(timeslots: &[Timeslot]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<(u32, Vec<usize>)> = None;

    for t in timeslots {
        if t.is_break {
            if let Some((day_index, ids)) = current.take() {
                blocks.push(finish_block(blocks.len(), day_index, ids));
            }
            continue;
        }
        match &mut current {
            Some((day_index, ids)) if *day_index == t.day_index => ids.push(t.timeslot_id),
            _ => {
                if let Some((day_index, ids)) = current.take() {
                    blocks.push(finish_block(blocks.len(), day_index, ids));
                }
                current = Some((t.day_index, vec![t.timeslot_id]));
            }
        }
    }
    if let Some((day_index, ids)) = current.take() {
        blocks.push(finish_block(blocks.len(), day_index, ids));
    }
    blocks
}

fn finish_block(block_id: usize, day_index: u32, timeslot_ids: Vec<usize>) -> Block {
    Block {
        block_id,
        day_index,
        timeslot_ids,
    }
}

/// For a given lab block size `n`, returns every window of `n` consecutive
/// timeslot ids within any block long enough to host it, keyed by the
/// window's start timeslot. This is `covers(t, B)`'s dual: the set of valid
/// lab-start ids for block size `n`, precomputed once per block size rather
/// than re-derived per-constraint.
pub fn valid_lab_starts(blocks: &[Block], block_size: u32) -> Vec<usize> {
    let n = block_size as usize;
    let mut starts = Vec::new();
    for block in blocks {
        if block.timeslot_ids.len() < n {
            continue;
        }
        for window in block.timeslot_ids.windows(n) {
            starts.push(window[0]);
        }
    }
    starts
}
