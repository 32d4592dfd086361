use libproc::libproc::pid_rusage::{RUsageInfoV2, pidrusage};
use libproc::libproc::proc_pid::pidinfo;
use libproc::libproc::task_info::TaskInfo;

use super::{HostMemory, PlatformExtensions, VmCounters};
use crate::system::process::ProbeError;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn host_memory() -> Option<HostMemory> {
        let total = physical_memory()?;
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if page_size <= 0 {
            return None;
        }
        let stats = vm_statistics()?;
        Some(HostMemory {
            total,
            counters: VmCounters {
                page_size: page_size as u64,
                free: u64::from(stats.free_count),
                active: u64::from(stats.active_count),
                inactive: u64::from(stats.inactive_count),
                wired: u64::from(stats.wire_count),
                compressed: u64::from(stats.compressor_page_count),
            },
        })
    }

    fn physical_footprint(pid: u32) -> Result<Option<u64>, ProbeError> {
        // proc_pid_rusage fails for processes owned by other users unless
        // running as root, and for pids that have already exited.
        pidrusage::<RUsageInfoV2>(pid as i32)
            .map(|usage| Some(usage.ri_phys_footprint))
            .map_err(|_| ProbeError::Denied(pid))
    }

    fn thread_count(pid: u32) -> Option<u32> {
        let info = pidinfo::<TaskInfo>(pid as i32, 0).ok()?;
        u32::try_from(info.pti_threadnum).ok()
    }
}

fn physical_memory() -> Option<u64> {
    let mut size: u64 = 0;
    let mut len = std::mem::size_of::<u64>();
    let rc = unsafe {
        libc::sysctlbyname(
            c"hw.memsize".as_ptr(),
            (&mut size as *mut u64).cast(),
            &mut len,
            std::ptr::null_mut(),
            0,
        )
    };
    (rc == 0).then_some(size)
}

// libc marks the mach host calls deprecated in favour of the mach2 crate.
#[allow(deprecated)]
fn vm_statistics() -> Option<libc::vm_statistics64> {
    let mut stats: libc::vm_statistics64 = unsafe { std::mem::zeroed() };
    let mut count = (std::mem::size_of::<libc::vm_statistics64>()
        / std::mem::size_of::<libc::integer_t>())
        as libc::mach_msg_type_number_t;
    let result = unsafe {
        libc::host_statistics64(
            libc::mach_host_self(),
            libc::HOST_VM_INFO64,
            (&mut stats as *mut libc::vm_statistics64).cast::<libc::integer_t>(),
            &mut count,
        )
    };
    (result == libc::KERN_SUCCESS).then_some(stats)
}
