use std::collections::HashMap;

use windows_sys::Win32::Foundation::{CloseHandle, INVALID_HANDLE_VALUE};
use windows_sys::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
    TH32CS_SNAPPROCESS,
};
use windows_sys::Win32::System::SystemInformation::{GlobalMemoryStatusEx, MEMORYSTATUSEX};

use super::{HostMemory, PlatformExtensions, VmCounters};
use crate::system::process::ProbeError;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn host_memory() -> Option<HostMemory> {
        // Windows has no page-state breakdown; everything not available is
        // reported as active so the used figure matches Task Manager.
        unsafe {
            let mut status = std::mem::zeroed::<MEMORYSTATUSEX>();
            status.dwLength = std::mem::size_of::<MEMORYSTATUSEX>() as u32;
            if GlobalMemoryStatusEx(&mut status) == 0 {
                return None;
            }
            Some(HostMemory {
                total: status.ullTotalPhys,
                counters: VmCounters {
                    page_size: 1,
                    free: status.ullAvailPhys,
                    active: status.ullTotalPhys.saturating_sub(status.ullAvailPhys),
                    ..VmCounters::default()
                },
            })
        }
    }

    fn physical_footprint(_pid: u32) -> Result<Option<u64>, ProbeError> {
        Ok(None)
    }

    fn thread_count(pid: u32) -> Option<u32> {
        Self::thread_table()?.get(&pid).copied()
    }

    fn thread_table() -> Option<HashMap<u32, u32>> {
        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0);
            if snapshot == INVALID_HANDLE_VALUE {
                return None;
            }
            let mut entry = std::mem::zeroed::<PROCESSENTRY32W>();
            entry.dwSize = std::mem::size_of::<PROCESSENTRY32W>() as u32;

            let mut table = HashMap::new();
            let mut ok = Process32FirstW(snapshot, &mut entry);
            while ok != 0 {
                table.insert(entry.th32ProcessID, entry.cntThreads);
                ok = Process32NextW(snapshot, &mut entry);
            }
            CloseHandle(snapshot);
            Some(table)
        }
    }
}
