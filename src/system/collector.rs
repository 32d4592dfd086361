use std::collections::HashMap;
use std::path::Path;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::{debug, trace};

use super::memory::{HostStats, SystemStatsProvider};
use super::platform;
use super::process::{ProbeError, ProcessSample, RawProcess};
use super::snapshot::Snapshot;

/// Source of per-process statistics.
pub trait ProcessStatsProvider {
    /// Currently visible pids in enumeration order. Empty when enumeration
    /// fails.
    fn list(&mut self) -> Vec<u32>;
    fn info(&mut self, pid: u32) -> Result<RawProcess, ProbeError>;
}

/// Enumerates with sysinfo and fills in what it lacks from the platform
/// layer.
pub struct SysinfoProcesses {
    sys: System,
    /// Per-pass thread counts, when the platform can list them all at once.
    threads: Option<HashMap<u32, u32>>,
}

impl Default for SysinfoProcesses {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProcesses {
    pub fn new() -> Self {
        SysinfoProcesses {
            sys: System::new(),
            threads: None,
        }
    }
}

impl ProcessStatsProvider for SysinfoProcesses {
    fn list(&mut self) -> Vec<u32> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        self.threads = platform::thread_table();
        // sysinfo lists Linux tasks alongside their owning process
        let mut pids: Vec<u32> = self
            .sys
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, _)| pid.as_u32())
            .collect();
        pids.sort_unstable();
        pids
    }

    fn info(&mut self, pid: u32) -> Result<RawProcess, ProbeError> {
        let sysinfo_pid = Pid::from_u32(pid);
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[sysinfo_pid]),
            true,
            ProcessRefreshKind::nothing()
                .with_memory()
                .with_exe(UpdateKind::OnlyIfNotSet),
        );
        let process = self
            .sys
            .process(sysinfo_pid)
            .ok_or(ProbeError::Exited(pid))?;

        let memory_bytes = match platform::physical_footprint(pid)? {
            Some(footprint) => footprint,
            None => process.memory(),
        };
        let name = process
            .exe()
            .and_then(exe_basename)
            .or_else(|| Some(process.name().to_string_lossy().into_owned()));

        Ok(RawProcess {
            pid,
            name,
            memory_bytes,
            thread_count: lookup_threads(self.threads.as_ref(), pid),
        })
    }
}

/// A per-pass table is authoritative: a pid missing from it has exited.
fn lookup_threads(table: Option<&HashMap<u32, u32>>, pid: u32) -> Option<u32> {
    match table {
        Some(table) => table.get(&pid).copied(),
        None => platform::thread_count(pid),
    }
}

fn exe_basename(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Resolves every enumerated pid one at a time. Processes whose memory
/// cannot be read are left out; `total_memory` is shared by the whole pass.
pub fn sample_all<P>(provider: &mut P, total_memory: u64) -> Vec<ProcessSample>
where
    P: ProcessStatsProvider + ?Sized,
{
    let _span = tracing::debug_span!("collector.sample_all").entered();

    let pids = provider.list();
    let mut samples = Vec::with_capacity(pids.len());
    let mut dropped = 0usize;

    for pid in pids {
        if pid == 0 {
            continue;
        }
        match provider.info(pid) {
            Ok(raw) => samples.push(ProcessSample::from_raw(raw, total_memory)),
            Err(err) => {
                dropped += 1;
                trace!(%err, "skipping process");
            }
        }
    }

    debug!(sampled = samples.len(), dropped, "process sampling pass complete");
    samples
}

pub struct Collector<S = HostStats, P = SysinfoProcesses> {
    system: S,
    processes: P,
}

impl Default for Collector {
    fn default() -> Self {
        Self::host()
    }
}

impl Collector {
    pub fn host() -> Self {
        Collector::new(HostStats::new(), SysinfoProcesses::new())
    }
}

impl<S, P> Collector<S, P>
where
    S: SystemStatsProvider,
    P: ProcessStatsProvider,
{
    pub fn new(system: S, processes: P) -> Self {
        Collector { system, processes }
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn processes(&self) -> &P {
        &self.processes
    }

    /// Runs one full pass: system counters first, then every process
    /// measured against that pass's total.
    pub fn refresh(&mut self) -> Snapshot {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        let system = self.system.sample();
        let total_memory = system
            .map(|s| s.total_memory)
            .filter(|&total| total > 0)
            .or_else(|| self.system.total_memory())
            .unwrap_or(1);

        let processes = sample_all(&mut self.processes, total_memory);
        Snapshot::new(processes, system, total_memory)
    }
}
