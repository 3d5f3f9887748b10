use crate::typedef::{FrameId, PageId};

/// Bounded translation cache mapping page numbers to frame indices.
///
/// The TLB itself is just the slot storage; which entry gets replaced when it
/// is full is decided by the LRU instance the [`crate::Mmu`] keeps for it.
#[derive(Debug)]
pub struct Tlb {
    entries: Vec<(PageId, FrameId)>,
    capacity: usize,
}

impl Tlb {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Linear scan for `page`, returning its frame on a hit.
    pub fn lookup(&self, page: PageId) -> Option<FrameId> {
        self.entries
            .iter()
            .find(|&&(vpn, _)| vpn == page)
            .map(|&(_, frame)| frame)
    }

    /// Slot index of an exact (page, frame) pair, if present.
    pub fn position(&self, page: PageId, frame: FrameId) -> Option<usize> {
        self.entries.iter().position(|&entry| entry == (page, frame))
    }

    /// Appends an entry. The caller is responsible for checking capacity.
    pub fn push(&mut self, page: PageId, frame: FrameId) {
        debug_assert!(self.entries.len() < self.capacity);
        self.entries.push((page, frame));
    }

    /// Overwrites the slot at `index` with a new entry.
    pub fn replace(&mut self, index: usize, page: PageId, frame: FrameId) {
        self.entries[index] = (page, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit_and_miss() {
        let mut tlb = Tlb::new(4);
        tlb.push(7, 0);
        tlb.push(3, 1);

        assert_eq!(tlb.lookup(7), Some(0));
        assert_eq!(tlb.lookup(3), Some(1));
        assert_eq!(tlb.lookup(5), None);
    }

    #[test]
    fn test_replace_overwrites_slot() {
        let mut tlb = Tlb::new(2);
        tlb.push(1, 0);
        tlb.push(2, 1);

        let idx = tlb.position(1, 0).unwrap();
        tlb.replace(idx, 9, 0);

        assert_eq!(tlb.lookup(1), None);
        assert_eq!(tlb.lookup(9), Some(0));
        assert_eq!(tlb.len(), 2);
    }

    #[test]
    fn test_is_full() {
        let mut tlb = Tlb::new(1);
        assert!(!tlb.is_full());
        tlb.push(1, 0);
        assert!(tlb.is_full());
    }
}
