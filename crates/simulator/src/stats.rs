use serde::{Deserialize, Serialize};

/// Access counters and the diagnostic log for a single simulation run.
///
/// Each run owns its own `RunStats` value, passed by reference through the
/// call chain. Concurrent runs must not share one instance; give each run its
/// own and there is nothing to synchronize.
#[derive(Debug, Default)]
pub struct RunStats {
    tlb_hits: u64,
    tlb_misses: u64,
    page_faults: u64,
    logs: Vec<String>,
}

/// The final counter triple returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub tlb_hits: u64,
    pub tlb_misses: u64,
    pub page_faults: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the counters and the log. Call before reusing a stats value
    /// across runs; counting never resets implicitly.
    pub fn reset(&mut self) {
        self.tlb_hits = 0;
        self.tlb_misses = 0;
        self.page_faults = 0;
        self.logs.clear();
    }

    pub fn record_tlb_hit(&mut self) {
        self.tlb_hits += 1;
    }

    pub fn record_tlb_miss(&mut self) {
        self.tlb_misses += 1;
    }

    pub fn record_page_fault(&mut self) {
        self.page_faults += 1;
    }

    /// Appends a diagnostic line to the run log.
    pub fn log(&mut self, message: impl Into<String>) {
        self.logs.push(message.into());
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            tlb_hits: self.tlb_hits,
            tlb_misses: self.tlb_misses,
            page_faults: self.page_faults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let mut stats = RunStats::new();

        stats.record_tlb_hit();
        stats.record_tlb_miss();
        stats.record_tlb_miss();
        stats.record_page_fault();

        let snap = stats.snapshot();
        assert_eq!(snap.tlb_hits, 1);
        assert_eq!(snap.tlb_misses, 2);
        assert_eq!(snap.page_faults, 1);
    }

    #[test]
    fn test_reset_clears_counters_and_log() {
        let mut stats = RunStats::new();

        stats.record_tlb_hit();
        stats.record_page_fault();
        stats.log("Skipping invalid address: 'abc'");

        stats.reset();

        let snap = stats.snapshot();
        assert_eq!(snap.tlb_hits, 0);
        assert_eq!(snap.tlb_misses, 0);
        assert_eq!(snap.page_faults, 0);
        assert!(stats.logs().is_empty());
    }

    #[test]
    fn test_log_preserves_order() {
        let mut stats = RunStats::new();

        stats.log("first");
        stats.log("second");

        assert_eq!(stats.logs(), &["first".to_string(), "second".to_string()]);
    }
}
