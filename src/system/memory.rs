use sysinfo::System;
use tracing::debug;

use super::platform::{self, HostMemory, VmCounters};

/// Host-wide memory state captured in one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemMemorySnapshot {
    pub total_memory: u64,
    pub used_memory: u64,
    pub free_memory: u64,
    pub available_memory: u64,
    pub wired_memory: u64,
    pub swap_total: u64,
    pub swap_used: u64,
}

impl SystemMemorySnapshot {
    /// Used memory is `active + inactive + wired + compressed` pages. Wired
    /// memory is reported on its own as well but is only counted once.
    pub fn from_counters(total_memory: u64, counters: &VmCounters) -> Self {
        let bytes = |pages: u64| pages.saturating_mul(counters.page_size);
        let used_memory = bytes(counters.active)
            .saturating_add(bytes(counters.inactive))
            .saturating_add(bytes(counters.wired))
            .saturating_add(bytes(counters.compressed));

        SystemMemorySnapshot {
            total_memory,
            used_memory,
            free_memory: bytes(counters.free),
            available_memory: total_memory.saturating_sub(used_memory),
            wired_memory: bytes(counters.wired),
            swap_total: 0,
            swap_used: 0,
        }
    }

    pub fn with_swap(mut self, swap_total: u64, swap_used: u64) -> Self {
        self.swap_total = swap_total;
        self.swap_used = swap_used.min(swap_total);
        self
    }

    pub fn percent_used(&self) -> f64 {
        ratio_percent(self.used_memory, self.total_memory)
    }

    pub fn swap_free(&self) -> u64 {
        self.swap_total.saturating_sub(self.swap_used)
    }

    pub fn swap_percent_used(&self) -> f64 {
        ratio_percent(self.swap_used, self.swap_total)
    }
}

fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Source of host-wide memory statistics.
pub trait SystemStatsProvider {
    /// `None` when the kernel query failed this pass.
    fn sample(&mut self) -> Option<SystemMemorySnapshot>;

    /// Installed memory from a secondary source, used to keep process
    /// percentages meaningful when `sample` is unavailable.
    fn total_memory(&mut self) -> Option<u64> {
        None
    }
}

/// Kernel counters from the platform layer, swap figures from sysinfo.
pub struct HostStats {
    sys: System,
}

impl Default for HostStats {
    fn default() -> Self {
        Self::new()
    }
}

impl HostStats {
    pub fn new() -> Self {
        HostStats { sys: System::new() }
    }
}

impl SystemStatsProvider for HostStats {
    fn sample(&mut self) -> Option<SystemMemorySnapshot> {
        let _span = tracing::debug_span!("memory.sample").entered();

        let Some(HostMemory { total, counters }) = platform::host_memory() else {
            debug!("kernel memory statistics unavailable");
            return None;
        };
        self.sys.refresh_memory();
        let snapshot = SystemMemorySnapshot::from_counters(total, &counters)
            .with_swap(self.sys.total_swap(), self.sys.used_swap());
        debug!(
            total = snapshot.total_memory,
            used = snapshot.used_memory,
            "sampled system memory"
        );
        Some(snapshot)
    }

    fn total_memory(&mut self) -> Option<u64> {
        self.sys.refresh_memory();
        Some(self.sys.total_memory()).filter(|&t| t > 0)
    }
}
