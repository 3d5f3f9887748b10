mod mmu;
mod policy;
mod sim;
mod stats;
mod tlb;
mod typedef;

pub type Result<T> = std::result::Result<T, vmsim_error::Error>;

pub use mmu::Mmu;
pub use policy::{policy_for, Lru, ReplacementPolicy, SecondChance};
pub use sim::{run_simulation, AddressSource, SimulationConfig, SimulationResult, Simulator};
pub use stats::{RunStats, StatsSnapshot};
pub use tlb::Tlb;
pub use typedef::{FrameId, PageId};
