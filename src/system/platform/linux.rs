use super::{HostMemory, PlatformExtensions, VmCounters};
use crate::system::process::ProbeError;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn host_memory() -> Option<HostMemory> {
        let contents = std::fs::read_to_string("/proc/meminfo").ok()?;
        parse_meminfo(&contents)
    }

    fn physical_footprint(_pid: u32) -> Result<Option<u64>, ProbeError> {
        // Resident set size from sysinfo is the closest figure Linux offers.
        Ok(None)
    }

    fn thread_count(pid: u32) -> Option<u32> {
        let contents = std::fs::read_to_string(format!("/proc/{pid}/status")).ok()?;
        parse_status_threads(&contents)
    }
}

/// Maps `/proc/meminfo` onto page counters with a 1 KiB "page".
///
/// Unevictable pages stand in for wired memory and the zswap pool for
/// compressed memory; both default to 0 on kernels that do not report them.
fn parse_meminfo(contents: &str) -> Option<HostMemory> {
    let mut total = None;
    let mut free = None;
    let mut active = None;
    let mut inactive = None;
    let mut wired = 0;
    let mut compressed = 0;

    for line in contents.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(kib) = rest
            .split_whitespace()
            .next()
            .and_then(|v| v.parse::<u64>().ok())
        else {
            continue;
        };
        match key {
            "MemTotal" => total = Some(kib),
            "MemFree" => free = Some(kib),
            "Active" => active = Some(kib),
            "Inactive" => inactive = Some(kib),
            "Unevictable" => wired = kib,
            "Zswap" => compressed = kib,
            _ => {}
        }
    }

    Some(HostMemory {
        total: total?.saturating_mul(1024),
        counters: VmCounters {
            page_size: 1024,
            free: free?,
            active: active?,
            inactive: inactive?,
            wired,
            compressed,
        },
    })
}

fn parse_status_threads(contents: &str) -> Option<u32> {
    contents
        .lines()
        .find_map(|line| line.strip_prefix("Threads:"))
        .and_then(|v| v.trim().parse().ok())
}
