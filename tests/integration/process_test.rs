use sysward::core::process_monitor::{kill_process, list_processes};
use sysward::SyswardError;

#[test]
fn test_kill_unknown_pid_is_not_found() {
    match kill_process(999_999) {
        Err(SyswardError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_process_list_is_sorted_by_cpu() {
    let processes = list_processes();
    assert!(!processes.is_empty());
    for pair in processes.windows(2) {
        assert!(pair[0].cpu_percent >= pair[1].cpu_percent);
    }
}

#[cfg(unix)]
#[test]
fn test_kill_child_process() {
    let mut child = std::process::Command::new("sleep").arg("30").spawn().unwrap();
    kill_process(child.id()).unwrap();

    let status = child.wait().unwrap();
    assert!(!status.success());
}
