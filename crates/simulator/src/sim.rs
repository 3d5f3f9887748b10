use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vmsim_error::{errconfig, Error};

use crate::mmu::Mmu;
use crate::policy::{policy_for, Lru, ReplacementPolicy};
use crate::stats::{RunStats, StatsSnapshot};
use crate::typedef::PageId;
use crate::Result;

/// Parameters for one simulation run, as supplied by the surrounding layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub tlb_entries: usize,
    pub num_frames: usize,
    /// `"LRU"` or `"SecondChance"`. Anything else falls back to LRU with a
    /// warning in the run log.
    pub policy: String,
    /// Inline newline-separated page numbers.
    #[serde(default)]
    pub addresses: Option<String>,
    /// Path to a trace file, streamed line by line.
    #[serde(default)]
    pub trace_file: Option<PathBuf>,
}

/// Where the page reference stream comes from. A trace file takes precedence
/// over inline addresses when both are given.
#[derive(Debug, Clone)]
pub enum AddressSource {
    Inline(String),
    TraceFile(PathBuf),
}

impl SimulationConfig {
    pub fn source(&self) -> Result<AddressSource> {
        if let Some(path) = &self.trace_file {
            Ok(AddressSource::TraceFile(path.clone()))
        } else if let Some(addresses) = &self.addresses {
            Ok(AddressSource::Inline(addresses.clone()))
        } else {
            Err(Error::MissingAddressSource)
        }
    }
}

/// The outcome of a run: the final counters plus the diagnostic log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub statistics: StatsSnapshot,
    pub logs: Vec<String>,
}

/// Drives one simulation run: owns the MMU, the memory policy, and the run's
/// statistics. One `Simulator` per run; nothing here is shared or locked.
pub struct Simulator {
    mmu: Mmu,
    policy: Box<dyn ReplacementPolicy>,
    stats: RunStats,
}

impl Simulator {
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        if config.tlb_entries == 0 {
            return errconfig!("tlb_entries must be positive");
        }
        if config.num_frames == 0 {
            return errconfig!("num_frames must be positive");
        }

        let mut stats = RunStats::new();
        let policy: Box<dyn ReplacementPolicy> = match policy_for(&config.policy) {
            Some(policy) => policy,
            None => {
                stats.log(format!(
                    "Warning: invalid policy '{}' received. Defaulting to LRU.",
                    config.policy
                ));
                Box::new(Lru::new())
            }
        };

        Ok(Self {
            mmu: Mmu::new(config.tlb_entries, config.num_frames),
            policy,
            stats,
        })
    }

    /// One page reference. TLB first; then the page table; then the memory
    /// policy on a fault; finally the translation is cached in the TLB.
    pub fn access(&mut self, page: PageId) {
        if self.mmu.search_tlb(page).is_some() {
            self.stats.record_tlb_hit();
            return;
        }
        self.stats.record_tlb_miss();

        let frame = match self.mmu.translate(page) {
            Some(frame) => frame,
            None => {
                self.stats.record_page_fault();
                self.mmu.allocate_frame(&mut *self.policy, page)
            }
        };

        self.mmu.install_in_tlb(page, frame);
    }

    /// Feeds one trace token through the run. Empty tokens are skipped
    /// silently; tokens that do not parse as a page number are logged and
    /// skipped without touching any counter.
    fn consume_token(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        match token.parse::<PageId>() {
            Ok(page) => self.access(page),
            Err(_) => self.stats.log(format!("Skipping invalid address: '{}'", token)),
        }
    }

    /// Runs the simulation over an in-memory token sequence.
    pub fn run_tokens<I>(&mut self, tokens: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for token in tokens {
            self.consume_token(token.as_ref());
        }
    }

    /// Runs the simulation over an address source. Trace files are streamed a
    /// line at a time, never buffered whole.
    pub fn run_source(&mut self, source: &AddressSource) -> Result<()> {
        match source {
            AddressSource::Inline(text) => {
                self.run_tokens(text.lines());
                Ok(())
            }
            AddressSource::TraceFile(path) => {
                let file = File::open(path)?;
                for line in BufReader::new(file).lines() {
                    let line = line?;
                    self.consume_token(&line);
                }
                Ok(())
            }
        }
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn into_result(self) -> SimulationResult {
        SimulationResult {
            statistics: self.stats.snapshot(),
            logs: self.stats.logs().to_vec(),
        }
    }
}

/// Convenience entry point: resolve the source, run it, return the result.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResult> {
    let source = config.source()?;
    let mut sim = Simulator::new(config)?;
    sim.run_source(&source)?;
    Ok(sim.into_result())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(policy: &str, tlb_entries: usize, num_frames: usize) -> SimulationConfig {
        SimulationConfig {
            tlb_entries,
            num_frames,
            policy: policy.to_string(),
            addresses: None,
            trace_file: None,
        }
    }

    #[test]
    fn test_scenario_lru_no_reuse_survives_either_cache() {
        // LRU, frames=2, tlb=1, trace 1,2,3,1: every access misses the
        // one-entry TLB, and memory evicts 1 before 2 and 2 before the
        // revisit of 1, so every access is a fresh fault.
        let mut sim = Simulator::new(&config("LRU", 1, 2)).unwrap();
        sim.run_tokens(["1", "2", "3", "1"]);

        let snap = sim.stats().snapshot();
        assert_eq!(snap.tlb_hits, 0);
        assert_eq!(snap.tlb_misses, 4);
        assert_eq!(snap.page_faults, 4);
    }

    #[test]
    fn test_scenario_second_chance_evicts_after_grace_pass() {
        let mut sim = Simulator::new(&config("SecondChance", 4, 2)).unwrap();
        sim.run_tokens(["1", "2", "3"]);

        // The scan clears the bits of 1 and 2, comes back to 1 and evicts it.
        assert_eq!(sim.mmu().frames(), &[Some(3), Some(2)]);
        assert_eq!(sim.mmu().translate(1), None);

        let snap = sim.stats().snapshot();
        assert_eq!(snap.tlb_hits, 0);
        assert_eq!(snap.tlb_misses, 3);
        assert_eq!(snap.page_faults, 3);
    }

    #[test]
    fn test_repeat_access_hits_tlb() {
        let mut sim = Simulator::new(&config("LRU", 4, 4)).unwrap();
        sim.run_tokens(["7", "7"]);

        let snap = sim.stats().snapshot();
        assert_eq!(snap.tlb_misses, 1);
        assert_eq!(snap.page_faults, 1);
        assert_eq!(snap.tlb_hits, 1);
    }

    #[test]
    fn test_counters_account_for_every_valid_token() {
        let mut sim = Simulator::new(&config("LRU", 2, 3)).unwrap();
        sim.run_tokens(["1", "2", "x", "1", "", "3", "4", "1", "2"]);

        let snap = sim.stats().snapshot();
        // 7 valid tokens: the malformed one and the blank line don't count.
        assert_eq!(snap.tlb_hits + snap.tlb_misses, 7);
        assert!(snap.page_faults <= snap.tlb_misses);
    }

    #[test]
    fn test_unknown_policy_behaves_like_lru_with_a_warning() {
        let trace = ["1", "2", "3", "1", "2", "4", "1"];

        let mut lru = Simulator::new(&config("LRU", 2, 2)).unwrap();
        lru.run_tokens(trace);

        let mut fallback = Simulator::new(&config("MRU", 2, 2)).unwrap();
        fallback.run_tokens(trace);

        assert_eq!(fallback.policy_name(), "LRU");
        assert_eq!(fallback.stats().snapshot(), lru.stats().snapshot());
        assert_eq!(fallback.stats().logs().len(), lru.stats().logs().len() + 1);
        assert!(fallback.stats().logs()[0].contains("Defaulting to LRU"));
    }

    #[test]
    fn test_malformed_token_is_logged_and_skipped() {
        let mut sim = Simulator::new(&config("LRU", 2, 2)).unwrap();
        sim.run_tokens(["1", "abc", "-3", "2"]);

        let snap = sim.stats().snapshot();
        assert_eq!(snap.tlb_hits + snap.tlb_misses, 2);
        assert_eq!(snap.page_faults, 2);

        let logs = sim.stats().logs();
        assert_eq!(logs.len(), 2);
        assert!(logs[0].contains("Skipping invalid address: 'abc'"));
        assert!(logs[1].contains("Skipping invalid address: '-3'"));
    }

    #[test]
    fn test_blank_lines_are_skipped_silently() {
        let mut sim = Simulator::new(&config("LRU", 2, 2)).unwrap();
        sim.run_source(&AddressSource::Inline("1\n\n  \n2\n".to_string()))
            .unwrap();

        let snap = sim.stats().snapshot();
        assert_eq!(snap.tlb_hits + snap.tlb_misses, 2);
        assert!(sim.stats().logs().is_empty());
    }

    #[test]
    fn test_run_source_streams_trace_file() {
        let path = std::env::temp_dir().join("vmsim_sim_test_trace.in");
        std::fs::write(&path, "1\n2\nbad\n1\n").unwrap();

        let mut sim = Simulator::new(&config("LRU", 4, 4)).unwrap();
        sim.run_source(&AddressSource::TraceFile(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        let snap = sim.stats().snapshot();
        assert_eq!(snap.tlb_hits, 1);
        assert_eq!(snap.tlb_misses, 2);
        assert_eq!(snap.page_faults, 2);
        assert_eq!(sim.stats().logs().len(), 1);
    }

    #[test]
    fn test_unreadable_trace_file_is_an_io_error() {
        let mut sim = Simulator::new(&config("LRU", 4, 4)).unwrap();
        let missing = PathBuf::from("no/such/trace.in");

        let err = sim.run_source(&AddressSource::TraceFile(missing)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_missing_address_source_is_an_error() {
        let config = config("LRU", 2, 2);
        assert_eq!(config.source().unwrap_err(), Error::MissingAddressSource);
    }

    #[test]
    fn test_trace_file_takes_precedence_over_inline() {
        let mut config = config("LRU", 2, 2);
        config.addresses = Some("1".to_string());
        config.trace_file = Some(PathBuf::from("trace.in"));

        assert!(matches!(
            config.source().unwrap(),
            AddressSource::TraceFile(_)
        ));
    }

    #[test]
    fn test_zero_capacities_are_config_errors() {
        assert!(matches!(
            Simulator::new(&config("LRU", 0, 2)),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Simulator::new(&config("LRU", 2, 0)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_tlb_stays_within_capacity_across_a_run() {
        let mut sim = Simulator::new(&config("SecondChance", 2, 3)).unwrap();
        for token in ["5", "9", "2", "5", "7", "9", "1", "5"] {
            sim.run_tokens([token]);
            assert!(sim.mmu().tlb().len() <= 2);
            let occupied = sim.mmu().frames().iter().filter(|f| f.is_some()).count();
            assert_eq!(occupied, sim.mmu().page_table().len());
        }
    }

    // This implementation's clock variant sets the reference bit only when a
    // page is loaded, never on a later hit. A resident page that was just
    // re-accessed through the page table therefore gets no extra protection.
    // That is closer to FIFO with one grace pass than to textbook second
    // chance, and it is the intended behavior here.
    #[test]
    fn test_second_chance_hit_does_not_refresh_reference_bit() {
        let mut sim = Simulator::new(&config("SecondChance", 1, 2)).unwrap();
        sim.run_tokens(["1", "2", "1", "3"]);

        // Page 1 was re-accessed right before the fault on 3, yet it is
        // still the one evicted.
        assert_eq!(sim.mmu().translate(1), None);
        assert_eq!(sim.mmu().frames(), &[Some(3), Some(2)]);

        let snap = sim.stats().snapshot();
        assert_eq!(snap.tlb_misses, 4);
        assert_eq!(snap.page_faults, 3);
    }

    #[test]
    fn test_run_simulation_returns_counters_and_logs() {
        let mut cfg = config("Random", 2, 2);
        cfg.addresses = Some("1\nbogus\n1\n".to_string());

        let result = run_simulation(&cfg).unwrap();
        assert_eq!(result.statistics.tlb_hits, 1);
        assert_eq!(result.statistics.tlb_misses, 1);
        assert_eq!(result.statistics.page_faults, 1);
        // One policy warning plus one skipped-token notice.
        assert_eq!(result.logs.len(), 2);
    }

    #[test]
    fn test_run_simulation_without_source_fails() {
        let cfg = config("LRU", 2, 2);
        assert_eq!(run_simulation(&cfg).unwrap_err(), Error::MissingAddressSource);
    }
}
