// Per-process network attribution
use std::collections::HashMap;

use crate::core::types::ProcessNetInfo;

/// Processes that own at least one socket, merged by name.
///
/// `sent`/`recv` are the processes' cumulative write/read byte counters.
/// Empty on platforms without a supported source.
pub fn process_net_usage() -> Vec<ProcessNetInfo> {
    #[cfg(target_os = "linux")]
    {
        linux::process_net_usage_in(std::path::Path::new("/proc"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        Vec::new()
    }
}

/// Merge per-process samples sharing a name, busiest first
pub fn group_by_name<I>(samples: I) -> Vec<ProcessNetInfo>
where
    I: IntoIterator<Item = (String, u64, u64)>,
{
    let mut apps: HashMap<String, ProcessNetInfo> = HashMap::new();

    for (name, sent, recv) in samples {
        if name.is_empty() {
            continue;
        }
        let entry = apps.entry(name.clone()).or_insert_with(|| ProcessNetInfo {
            name,
            ..Default::default()
        });
        entry.count += 1;
        entry.sent = entry.sent.saturating_add(sent);
        entry.recv = entry.recv.saturating_add(recv);
    }

    let mut result: Vec<ProcessNetInfo> = apps.into_values().collect();
    result.sort_by(|a, b| {
        b.sent
            .saturating_add(b.recv)
            .cmp(&a.sent.saturating_add(a.recv))
            .then_with(|| a.name.cmp(&b.name))
    });
    result
}

#[cfg(target_os = "linux")]
pub(crate) mod linux {
    use std::fs;
    use std::path::Path;

    use super::group_by_name;
    use crate::core::types::ProcessNetInfo;

    pub fn process_net_usage_in(proc_root: &Path) -> Vec<ProcessNetInfo> {
        let entries = match fs::read_dir(proc_root) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Cannot read {}: {}", proc_root.display(), e);
                return Vec::new();
            }
        };

        let samples = entries.flatten().filter_map(|entry| {
            let file_name = entry.file_name();
            let pid = file_name.to_str()?;
            if !pid.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }

            let dir = entry.path();
            if !owns_socket(&dir) {
                return None;
            }

            let name = fs::read_to_string(dir.join("comm")).ok()?.trim().to_string();
            let (sent, recv) = fs::read_to_string(dir.join("io"))
                .ok()
                .and_then(|io| parse_io(&io))
                .unwrap_or((0, 0));
            Some((name, sent, recv))
        });

        group_by_name(samples)
    }

    fn owns_socket(pid_dir: &Path) -> bool {
        let Ok(fds) = fs::read_dir(pid_dir.join("fd")) else {
            return false;
        };
        fds.flatten().any(|fd| {
            fs::read_link(fd.path())
                .map(|target| target.to_string_lossy().starts_with("socket:"))
                .unwrap_or(false)
        })
    }

    /// (wchar, rchar) from `/proc/<pid>/io`
    pub fn parse_io(content: &str) -> Option<(u64, u64)> {
        let mut wchar = None;
        let mut rchar = None;
        for line in content.lines() {
            let (key, value) = line.split_once(':')?;
            match key.trim() {
                "wchar" => wchar = value.trim().parse().ok(),
                "rchar" => rchar = value.trim().parse().ok(),
                _ => {}
            }
        }
        Some((wchar?, rchar?))
    }
}
