use std::collections::HashMap;

use crate::typedef::{FrameId, PageId};

use super::{Lru, SecondChance};

/// A page replacement policy in its memory role: it decides which resident
/// page to evict when every frame is occupied.
///
/// The TLB role is deliberately not part of this trait. TLB replacement is
/// always LRU, exposed as an inherent method on [`Lru`], so a policy that has
/// no TLB behavior (second chance) cannot be routed there by mistake.
pub trait ReplacementPolicy {
    /// Notifies the policy that `page` was just loaded into `frame`. Invoked
    /// only on placement; a translation hit on a resident page does not reach
    /// the policy.
    fn record_load(&mut self, page: PageId, frame: FrameId);

    /// Places `page` into memory: occupies a free frame if one exists,
    /// otherwise selects a victim, removes its page-table entry, and reuses
    /// its frame. Returns the frame the page landed in, with the page table
    /// and frame array already updated.
    fn place(
        &mut self,
        page_table: &mut HashMap<PageId, FrameId>,
        frames: &mut [Option<PageId>],
        page: PageId,
    ) -> FrameId;

    fn name(&self) -> &'static str;
}

/// Index of the first unoccupied frame, if any.
pub(crate) fn first_free_frame(frames: &[Option<PageId>]) -> Option<FrameId> {
    frames.iter().position(Option::is_none)
}

/// Resolves a policy name from the configuration. Returns `None` for
/// unrecognized names; the caller substitutes the default and logs a warning.
pub fn policy_for(name: &str) -> Option<Box<dyn ReplacementPolicy>> {
    match name {
        "LRU" => Some(Box::new(Lru::new())),
        "SecondChance" => Some(Box::new(SecondChance::new())),
        _ => None,
    }
}
