//! `covers(t, B)`: for a given lab block size `B`, which lab-start timeslots
//! occupy a given timeslot `t`. Materialized once per distinct block size
//! encountered in the problem rather than recomputed inside constraint loops.

use std::collections::HashMap;

use types::Block;

/// `timeslot_id -> [valid lab-start ids covering it]`, for a single block size.
pub type CoverageMap = HashMap<usize, Vec<usize>>;

/// Builds the coverage map for one block size, given the week's blocks.
pub fn build_coverage(blocks: &[Block], block_size: u32) -> CoverageMap {
    let n = block_size as usize;
    let mut map: CoverageMap = HashMap::new();
    for block in blocks {
        if block.timeslot_ids.len() < n {
            continue;
        }
        for window in block.timeslot_ids.windows(n) {
            let start = window[0];
            for &t in window {
                map.entry(t).or_default().push(start);
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::build_blocks;
    use types::Timeslot;

    fn ts(day_index: u32, period_index: u32, timeslot_id: usize, is_break: bool) -> Timeslot {
        Timeslot {
            day_index,
            period_index,
            timeslot_id,
            is_break,
        }
    }

    #[test]
    fn covers_maps_each_occupied_slot_back_to_its_start() {
        let slots = vec![
            ts(0, 0, 0, false),
            ts(0, 1, 1, false),
            ts(0, 2, 2, false),
        ];
        let blocks = build_blocks(&slots);
        let coverage = build_coverage(&blocks, 2);
        assert_eq!(coverage.get(&0), Some(&vec![0]));
        assert_eq!(coverage.get(&1).unwrap().len(), 2); // covered by starts 0 and 1
        assert_eq!(coverage.get(&2), Some(&vec![1]));
    }
}
