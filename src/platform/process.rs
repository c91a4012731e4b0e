// Platform-specific process termination
use crate::error::{Result, SyswardError};

/// Forcefully terminate `pid`.
///
/// Maps "no such process" to `NotFound` and a refused signal to
/// `PermissionDenied`.
#[cfg(unix)]
pub fn terminate(pid: u32) -> Result<()> {
    // pid 0 and negative values address process groups
    let raw = match i32::try_from(pid) {
        Ok(raw) if raw > 0 => raw,
        _ => return Err(SyswardError::not_found(format!("process {} not found", pid))),
    };

    // SAFETY: kill() has no memory-safety preconditions; failures are reported through errno
    let rc = unsafe { libc::kill(raw, libc::SIGKILL) };
    if rc == 0 {
        return Ok(());
    }

    let err = std::io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Err(SyswardError::not_found(format!("process {} not found", pid))),
        Some(libc::EPERM) => Err(SyswardError::permission_denied(format!(
            "cannot terminate process {}",
            pid
        ))),
        _ => Err(SyswardError::Io(err)),
    }
}

#[cfg(not(unix))]
pub fn terminate(pid: u32) -> Result<()> {
    use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

    let pid_handle = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid_handle]),
        true,
        ProcessRefreshKind::nothing(),
    );

    let process = system
        .process(pid_handle)
        .ok_or_else(|| SyswardError::not_found(format!("process {} not found", pid)))?;

    if process.kill() {
        Ok(())
    } else {
        Err(SyswardError::permission_denied(format!(
            "cannot terminate process {}",
            pid
        )))
    }
}
