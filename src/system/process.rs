use thiserror::Error;

/// Display name used when a process's executable cannot be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Status label reported for every sampled process.
pub const STATUS_RUNNING: &str = "running";

/// Why a process was left out of a sampling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("memory of pid {0} is not readable")]
    Denied(u32),
    #[error("pid {0} exited before it could be inspected")]
    Exited(u32),
}

/// Per-process fields exactly as a provider resolved them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawProcess {
    pub pid: u32,
    pub name: Option<String>,
    pub memory_bytes: u64,
    pub thread_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub memory_bytes: u64,
    pub memory_percent: f64,
    pub thread_count: u32,
    pub status: &'static str,
}

impl ProcessSample {
    /// Fills in placeholders for unresolved fields and derives the memory
    /// share against `total_memory`.
    pub fn from_raw(raw: RawProcess, total_memory: u64) -> Self {
        let name = raw
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        ProcessSample {
            pid: raw.pid,
            name,
            memory_bytes: raw.memory_bytes,
            memory_percent: memory_percent(raw.memory_bytes, total_memory),
            thread_count: raw.thread_count.unwrap_or(0),
            status: STATUS_RUNNING,
        }
    }
}

pub fn memory_percent(memory_bytes: u64, total_memory: u64) -> f64 {
    if total_memory == 0 {
        return 0.0;
    }
    memory_bytes as f64 / total_memory as f64 * 100.0
}
