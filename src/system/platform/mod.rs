use std::collections::HashMap;

use super::process::ProbeError;

/// Raw virtual-memory page counters as the kernel reports them.
///
/// Counters are in units of `page_size` bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VmCounters {
    pub page_size: u64,
    pub free: u64,
    pub active: u64,
    pub inactive: u64,
    pub wired: u64,
    pub compressed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostMemory {
    /// Installed physical memory in bytes.
    pub total: u64,
    pub counters: VmCounters,
}

pub trait PlatformExtensions {
    fn host_memory() -> Option<HostMemory>;
    /// `Ok(None)` means the platform has no footprint figure beyond the
    /// resident size sysinfo already reports.
    fn physical_footprint(pid: u32) -> Result<Option<u64>, ProbeError>;
    fn thread_count(pid: u32) -> Option<u32>;
    /// Thread counts for every process from one system-wide query, on
    /// platforms where per-pid lookups would rescan the whole process list.
    fn thread_table() -> Option<HashMap<u32, u32>> {
        None
    }
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn host_memory() -> Option<HostMemory> {
    platform_impl::Platform::host_memory()
}

pub fn physical_footprint(pid: u32) -> Result<Option<u64>, ProbeError> {
    platform_impl::Platform::physical_footprint(pid)
}

pub fn thread_count(pid: u32) -> Option<u32> {
    platform_impl::Platform::thread_count(pid)
}

pub fn thread_table() -> Option<HashMap<u32, u32>> {
    platform_impl::Platform::thread_table()
}
