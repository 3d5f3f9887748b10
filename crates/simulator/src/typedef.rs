/// A virtual page number. Incoming trace tokens parse directly into this
/// type; there is no offset decomposition.
pub type PageId = u64;

/// Index of a slot in the physical frame array.
pub type FrameId = usize;
