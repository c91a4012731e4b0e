//! Live process listing and termination.

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind, Users};

use crate::core::types::ProcessInfo;
use crate::error::{Result, SyswardError};
use crate::platform::process;

/// Snapshot every named process.
///
/// Processes are refreshed twice, the minimum CPU interval apart, so CPU
/// usage covers a real window instead of reading zero.
pub fn list_processes() -> Vec<ProcessInfo> {
    let refresh = ProcessRefreshKind::nothing()
        .with_cpu()
        .with_memory()
        .with_user(UpdateKind::OnlyIfNotSet);

    let mut system = System::new();
    system.refresh_memory();
    system.refresh_processes_specifics(ProcessesToUpdate::All, true, refresh);
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    system.refresh_processes_specifics(ProcessesToUpdate::All, true, refresh);

    let users = Users::new_with_refreshed_list();

    let total_memory = system.total_memory();

    let mut processes: Vec<ProcessInfo> = system
        .processes()
        .values()
        .filter_map(|proc| {
            let name = proc.name().to_string_lossy().into_owned();
            if name.is_empty() {
                return None;
            }

            let mem_rss = proc.memory();
            let username = proc
                .user_id()
                .and_then(|uid| users.get_user_by_id(uid))
                .map(|user| strip_domain(user.name()).to_string())
                .unwrap_or_default();

            Some(ProcessInfo {
                pid: proc.pid().as_u32(),
                name,
                cpu_percent: f64::from(proc.cpu_usage()),
                mem_rss,
                mem_percent: if total_memory > 0 {
                    (mem_rss as f32 / total_memory as f32) * 100.0
                } else {
                    0.0
                },
                status: proc.status().to_string(),
                username,
            })
        })
        .collect();

    processes.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.mem_rss.cmp(&a.mem_rss))
    });
    processes
}

/// Terminate `pid`; never retried.
pub fn kill_process(pid: u32) -> Result<()> {
    let mut system = System::new();
    let target = Pid::from_u32(pid);
    system.refresh_processes_specifics(ProcessesToUpdate::Some(&[target]), true, ProcessRefreshKind::nothing());

    if system.process(target).is_none() {
        return Err(SyswardError::not_found(format!("process {} not found", pid)));
    }

    log::info!("Terminating process {}", pid);
    process::terminate(pid)
}

/// "DOMAIN\\user" -> "user"
fn strip_domain(name: &str) -> &str {
    name.rsplit('\\').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_domain() {
        assert_eq!(strip_domain("WORKGROUP\\alice"), "alice");
        assert_eq!(strip_domain("bob"), "bob");
    }

    #[test]
    fn test_list_includes_current_process() {
        let me = std::process::id();
        let processes = list_processes();
        assert!(processes.iter().any(|p| p.pid == me));
        assert!(processes.iter().all(|p| !p.name.is_empty()));
    }

    #[test]
    fn test_kill_missing_pid_is_not_found() {
        let err = kill_process(999_999).unwrap_err();
        assert!(matches!(err, SyswardError::NotFound(_)));
    }
}
