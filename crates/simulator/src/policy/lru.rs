use std::collections::{HashMap, VecDeque};

use crate::tlb::Tlb;
use crate::typedef::{FrameId, PageId};

use super::{first_free_frame, ReplacementPolicy};

/// Least-recently-used replacement.
///
/// Tracks (page, frame) pairs in a deque ordered from least- to
/// most-recently touched. One instance serves the memory role through
/// [`ReplacementPolicy`]; a separate instance, owned by the MMU, serves the
/// TLB role through [`Lru::install`].
#[derive(Debug, Default)]
pub struct Lru {
    recency: VecDeque<(PageId, FrameId)>,
}

impl Lru {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the pair to the most-recently-used end, inserting it if absent.
    /// Linear removal; the tracked set is bounded by the TLB or frame
    /// capacity, so correctness matters more than asymptotics here.
    pub fn touch(&mut self, page: PageId, frame: FrameId) {
        if let Some(pos) = self.recency.iter().position(|&pair| pair == (page, frame)) {
            self.recency.remove(pos);
        }
        self.recency.push_back((page, frame));
    }

    /// TLB placement: appends while the TLB has room, otherwise overwrites
    /// the slot holding the least-recently-touched pair. The evicted pair is
    /// simply dropped; TLB eviction never touches the page table.
    pub fn install(&mut self, tlb: &mut Tlb, page: PageId, frame: FrameId) {
        if !tlb.is_full() {
            tlb.push(page, frame);
            self.touch(page, frame);
            return;
        }

        let (lru_page, lru_frame) = self
            .recency
            .pop_front()
            .expect("TLB is full but the recency list is empty");
        let slot = tlb
            .position(lru_page, lru_frame)
            .expect("LRU victim not present in the TLB");
        tlb.replace(slot, page, frame);
        self.touch(page, frame);
    }
}

impl ReplacementPolicy for Lru {
    fn record_load(&mut self, page: PageId, frame: FrameId) {
        self.touch(page, frame);
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

        // Memory is full: the front of the deque is the least-recently
        // loaded pair and identifies the victim.
        let (victim, frame) = self
            .recency
            .pop_front()
            .expect("memory is full but the recency list is empty");
        page_table
            .remove(&victim)
            .expect("LRU victim not present in the page table");
        page_table.insert(page, frame);
        frames[frame] = Some(page);
        self.record_load(page, frame);
        frame
    }

    fn name(&self) -> &'static str {
        "LRU"
    }
}
