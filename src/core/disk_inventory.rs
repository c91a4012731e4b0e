//! Mounted volumes and large-file discovery.

use std::collections::HashSet;
use std::path::Path;

use log::debug;
use sysinfo::{Disk, Disks};
use walkdir::WalkDir;

use crate::core::cancel::CancelToken;
use crate::core::types::{percent_of, DiskInfo, DiskScanResult, LargeFileInfo};
use crate::platform::fs::file_identity;

const MIB: u64 = 1024 * 1024;

/// Every mounted volume with a non-zero capacity
pub fn get_disk_list() -> Vec<DiskInfo> {
    let disks = Disks::new_with_refreshed_list();
    let mut seen = HashSet::new();

    disks
        .list()
        .iter()
        .filter(|disk| disk.total_space() > 0)
        .map(disk_info)
        .filter(|info| seen.insert(info.mountpoint.clone()))
        .collect()
}

pub fn disk_info(disk: &Disk) -> DiskInfo {
    let total = disk.total_space();
    let free = disk.available_space().min(total);
    let used = total - free;

    DiskInfo {
        device: disk.name().to_string_lossy().into_owned(),
        mountpoint: disk.mount_point().to_string_lossy().into_owned(),
        fstype: disk.file_system().to_string_lossy().into_owned(),
        total,
        used,
        free,
        used_percent: percent_of(used, total),
    }
}

/// The volume holding the OS: `/` on Unix, the system drive on Windows
pub fn primary_disk(disks: &Disks) -> Option<&Disk> {
    let system_mount = system_mount_point();
    disks
        .list()
        .iter()
        .find(|disk| {
            disk.mount_point()
                .to_string_lossy()
                .eq_ignore_ascii_case(&system_mount)
        })
        .or_else(|| disks.list().first())
}

fn system_mount_point() -> String {
    #[cfg(windows)]
    {
        let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
        format!("{}\\", drive.trim_end_matches('\\'))
    }

    #[cfg(not(windows))]
    {
        "/".to_string()
    }
}

/// Threshold in bytes; non-positive requests fall back to `default_mb`
pub fn threshold_bytes(min_size_mb: i64, default_mb: u64) -> u64 {
    let mb = if min_size_mb <= 0 {
        default_mb
    } else {
        min_size_mb as u64
    };
    mb.saturating_mul(MIB)
}

/// Find files of at least `min_size_mb` under `root`, largest first.
///
/// Symlinks are followed; each physical file is reported once no matter how
/// many paths reach it. Unreadable subtrees are skipped.
pub fn scan_large_files(root: &Path, min_size_mb: i64, default_mb: u64, cancel: &CancelToken) -> DiskScanResult {
    let threshold = threshold_bytes(min_size_mb, default_mb);

    if !root.exists() {
        debug!("Large-file root {} does not exist", root.display());
        return DiskScanResult::default();
    }

    let mut visited = HashSet::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        if cancel.is_cancelled() {
            debug!("Large-file scan cancelled");
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping during large-file scan: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!("Cannot stat {}: {}", entry.path().display(), e);
                continue;
            }
        };

        if metadata.len() < threshold {
            continue;
        }

        if !visited.insert(file_identity(entry.path(), &metadata)) {
            continue;
        }

        files.push(LargeFileInfo {
            path: entry.path().to_string_lossy().into_owned(),
            size: metadata.len(),
            ext: extension_of(entry.path()),
        });
    }

    files.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    DiskScanResult::from_files(files)
}

/// Lowercase extension with its dot, or "" when there is none
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
