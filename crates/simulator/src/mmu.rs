use std::collections::HashMap;

use crate::policy::{Lru, ReplacementPolicy};
use crate::tlb::Tlb;
use crate::typedef::{FrameId, PageId};

/// The memory manager: owns the TLB, the page table, and the physical frame
/// array, plus the LRU instance that governs TLB replacement.
///
/// Invariant: a page appears in the page table exactly when some frame holds
/// it, and the table maps it to that frame's index. Eviction policies restore
/// this invariant before returning from placement.
pub struct Mmu {
    tlb: Tlb,
    page_table: HashMap<PageId, FrameId>,
    frames: Vec<Option<PageId>>,
    // TLB replacement is always LRU, regardless of the memory policy.
    tlb_policy: Lru,
}

impl Mmu {
    /// Creates an MMU with an empty TLB of `tlb_capacity` entries and
    /// `frame_count` empty frames.
    pub fn new(tlb_capacity: usize, frame_count: usize) -> Self {
        Self {
            tlb: Tlb::new(tlb_capacity),
            page_table: HashMap::new(),
            frames: vec![None; frame_count],
            tlb_policy: Lru::new(),
        }
    }

    /// Pure page-table lookup. Does not mutate any state, including recency.
    pub fn translate(&self, page: PageId) -> Option<FrameId> {
        self.page_table.get(&page).copied()
    }

    /// Linear TLB scan. A hit promotes the pair in the TLB's recency state;
    /// memory-policy state is never touched from here.
    pub fn search_tlb(&mut self, page: PageId) -> Option<FrameId> {
        let hit = self.tlb.lookup(page);
        if let Some(frame) = hit {
            self.tlb_policy.touch(page, frame);
        }
        hit
    }

    /// Obtains a frame for a faulting page through the caller-supplied memory
    /// policy. On return the page table and frame array are consistent: any
    /// evicted mapping is gone and the new one is installed.
    pub fn allocate_frame(&mut self, policy: &mut dyn ReplacementPolicy, page: PageId) -> FrameId {
        policy.place(&mut self.page_table, &mut self.frames, page)
    }

    /// Caches a translation in the TLB, evicting the least-recently-touched
    /// entry if it is full.
    pub fn install_in_tlb(&mut self, page: PageId, frame: FrameId) {
        self.tlb_policy.install(&mut self.tlb, page, frame);
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn frames(&self) -> &[Option<PageId>] {
        &self.frames
    }

    pub fn page_table(&self) -> &HashMap<PageId, FrameId> {
        &self.page_table
    }
}
