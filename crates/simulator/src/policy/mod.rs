mod lru;
mod policy;
mod second_chance;

pub use lru::Lru;
pub use policy::{policy_for, ReplacementPolicy};
pub(crate) use policy::first_free_frame;
pub use second_chance::SecondChance;
