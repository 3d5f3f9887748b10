use std::collections::{HashMap, VecDeque};

use crate::typedef::{FrameId, PageId};

use super::{first_free_frame, ReplacementPolicy};

/// Second-chance (clock) replacement, memory role only.
///
/// Resident pages sit in a circular queue with one reference bit each. The
/// bit is set at load time and never on later hits, so a page gets exactly
/// one grace pass before it becomes a victim. That load-only behavior is
/// intentional and preserved as-is; see the notes in DESIGN.md.
#[derive(Debug, Default)]
pub struct SecondChance {
    clock: VecDeque<(PageId, FrameId)>,
    reference_bits: HashMap<PageId, u8>,
}

impl SecondChance {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplacementPolicy for SecondChance {
    fn record_load(&mut self, page: PageId, frame: FrameId) {
        self.clock.push_back((page, frame));
        self.reference_bits.insert(page, 1);
    }

    fn place(
        &mut self,
        page_table: &mut HashMap<PageId, FrameId>,
        frames: &mut [Option<PageId>],
        page: PageId,
    ) -> FrameId {
        if let Some(idx) = first_free_frame(frames) {
            frames[idx] = Some(page);
            page_table.insert(page, idx);
            self.record_load(page, idx);
            return idx;
        }

        // One full pass clears every bit, so the next pass must find a 0.
        // If the bound is ever exceeded the bit bookkeeping is corrupt.
        let max_steps = 2 * frames.len();
        for _ in 0..max_steps {
            let (candidate, frame) = self
                .clock
                .pop_front()
                .expect("memory is full but the clock queue is empty");

            if self.reference_bits.get(&candidate).copied().unwrap_or(0) == 1 {
                // Second chance: clear the bit and send it to the back.
                self.reference_bits.insert(candidate, 0);
                self.clock.push_back((candidate, frame));
                continue;
            }

            self.reference_bits.remove(&candidate);
            page_table
                .remove(&candidate)
                .expect("clock victim not present in the page table");
            page_table.insert(page, frame);
            frames[frame] = Some(page);
            self.record_load(page, frame);
            return frame;
        }

        panic!("second-chance scan exceeded {} steps without finding a victim", max_steps);
    }

    fn name(&self) -> &'static str {
        "SecondChance"
    }
}
