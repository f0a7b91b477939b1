//! CPU pinning.
//!
//! Migrating between cores mid-pass throws away warm caches and skews the
//! timings, so long sweeps can pin the benchmark thread to one CPU.

use crate::common::Result;
#[cfg(target_os = "linux")]
use crate::common::BenchError;

/// Pins the calling thread to `cpu`.
///
/// # Returns
///
/// `Ok(())` once pinned, `InvalidConfig` for a CPU number the kernel's
/// affinity mask cannot represent, or `Affinity` if the kernel refuses.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<()> {
    if cpu >= libc::CPU_SETSIZE as usize {
        return Err(BenchError::InvalidConfig(format!(
            "CPU {cpu} exceeds the affinity mask size {}",
            libc::CPU_SETSIZE
        )));
    }

    // SAFETY: `cpu_set_t` is plain data and all-zero is the empty set;
    // `cpu` is within the mask per the check above; pid 0 is the caller.
    let rc = unsafe {
        let mut set: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_ZERO(&mut set);
        libc::CPU_SET(cpu, &mut set);
        libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set)
    };
    if rc != 0 {
        return Err(BenchError::Affinity {
            cpu,
            source: std::io::Error::last_os_error(),
        });
    }

    tracing::info!(cpu, "pinned benchmark thread");
    Ok(())
}

/// Pinning is unsupported off Linux; logs a warning and carries on unpinned.
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(cpu: usize) -> Result<()> {
    tracing::warn!(cpu, "CPU pinning is only supported on Linux; running unpinned");
    Ok(())
}
