// Platform memory reclamation
use crate::error::Result;

/// Asks the OS to give back memory
pub trait MemoryReclaimer: Send + Sync {
    fn name(&self) -> &'static str;

    fn reclaim(&self) -> Result<()>;
}

/// The reclaimer for the current platform
pub fn platform_reclaimer() -> Box<dyn MemoryReclaimer> {
    #[cfg(windows)]
    {
        Box::new(WorkingSetTrimmer)
    }

    #[cfg(target_os = "linux")]
    {
        Box::new(CacheDropper)
    }

    #[cfg(target_os = "macos")]
    {
        Box::new(Purge)
    }

    #[cfg(not(any(windows, target_os = "linux", target_os = "macos")))]
    {
        Box::new(NoopReclaimer)
    }
}

/// Trims the working set of every process that can be opened
#[cfg(windows)]
pub struct WorkingSetTrimmer;

#[cfg(windows)]
impl MemoryReclaimer for WorkingSetTrimmer {
    fn name(&self) -> &'static str {
        "EmptyWorkingSet"
    }

    fn reclaim(&self) -> Result<()> {
        use std::mem;
        use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
        use winapi::um::processthreadsapi::OpenProcess;
        use winapi::um::psapi::EmptyWorkingSet;
        use winapi::um::tlhelp32::{CreateToolhelp32Snapshot, Process32First, Process32Next, PROCESSENTRY32, TH32CS_SNAPPROCESS};
        use winapi::um::winnt::{PROCESS_QUERY_INFORMATION, PROCESS_SET_QUOTA};

        let mut trimmed = 0usize;

        // SAFETY: every handle opened here is checked and closed before returning
        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0);
            if snapshot == INVALID_HANDLE_VALUE {
                return Err(std::io::Error::last_os_error().into());
            }

            let mut entry: PROCESSENTRY32 = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32>() as u32;

            if Process32First(snapshot, &mut entry) != 0 {
                loop {
                    let handle = OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_SET_QUOTA, 0, entry.th32ProcessID);
                    if !handle.is_null() {
                        if EmptyWorkingSet(handle) != 0 {
                            trimmed += 1;
                        }
                        CloseHandle(handle);
                    }
                    if Process32Next(snapshot, &mut entry) == 0 {
                        break;
                    }
                }
            }

            CloseHandle(snapshot);
        }

        log::info!("Trimmed working sets of {} processes", trimmed);
        Ok(())
    }
}

/// Flushes dirty pages and drops the page cache; needs root
#[cfg(target_os = "linux")]
pub struct CacheDropper;

#[cfg(target_os = "linux")]
impl MemoryReclaimer for CacheDropper {
    fn name(&self) -> &'static str {
        "drop_caches"
    }

    fn reclaim(&self) -> Result<()> {
        if !super::elevation::is_elevated() {
            log::warn!("Not running as root; skipping drop_caches");
            return Ok(());
        }

        // SAFETY: sync() takes no arguments and cannot fail
        unsafe {
            libc::sync();
        }

        std::fs::write("/proc/sys/vm/drop_caches", b"1")?;
        log::info!("Dropped page cache");
        Ok(())
    }
}

/// Runs the system `purge` tool
#[cfg(target_os = "macos")]
pub struct Purge;

#[cfg(target_os = "macos")]
impl MemoryReclaimer for Purge {
    fn name(&self) -> &'static str {
        "purge"
    }

    fn reclaim(&self) -> Result<()> {
        let status = std::process::Command::new("purge").status()?;
        if !status.success() {
            return Err(crate::error::SyswardError::permission_denied(format!(
                "purge exited with {}",
                status
            )));
        }
        Ok(())
    }
}

/// Does nothing; used where no reclamation mechanism exists
pub struct NoopReclaimer;

impl MemoryReclaimer for NoopReclaimer {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn reclaim(&self) -> Result<()> {
        Ok(())
    }
}
