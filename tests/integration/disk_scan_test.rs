use std::fs::{self, File};
use std::path::Path;

use sysward::core::cancel::CancelToken;
use sysward::core::disk_inventory::{get_disk_list, scan_large_files};
use tempfile::TempDir;

const MIB: u64 = 1024 * 1024;

fn sparse_file(path: &Path, size: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().set_len(size).unwrap();
}

#[test]
fn test_threshold_is_inclusive_and_sorted() {
    let root = TempDir::new().unwrap();
    sparse_file(&root.path().join("exact.ISO"), 100 * MIB);
    sparse_file(&root.path().join("videos/big.mp4"), 250 * MIB);
    sparse_file(&root.path().join("small.bin"), 100 * MIB - 1);
    sparse_file(&root.path().join("README"), 150 * MIB);

    let result = scan_large_files(root.path(), 100, 50, &CancelToken::new());

    assert_eq!(result.count, 3);
    assert_eq!(result.count, result.files.len());
    assert!(result.files.iter().all(|f| f.size >= 100 * MIB));
    assert_eq!(result.files[0].ext, ".mp4");
    assert_eq!(result.files[1].ext, "");
    assert_eq!(result.files[2].ext, ".iso");
}

#[test]
fn test_non_positive_threshold_uses_default() {
    let root = TempDir::new().unwrap();
    sparse_file(&root.path().join("a.dat"), 60 * MIB);
    sparse_file(&root.path().join("b.dat"), 40 * MIB);

    let result = scan_large_files(root.path(), 0, 50, &CancelToken::new());
    assert_eq!(result.count, 1);
    assert!(result.files[0].path.ends_with("a.dat"));
}

#[test]
fn test_missing_root_is_empty() {
    let result = scan_large_files(Path::new("/no/such/root/here"), 1, 50, &CancelToken::new());
    assert_eq!(result.count, 0);
    assert!(result.files.is_empty());
}

#[test]
fn test_cancelled_scan_stops() {
    let root = TempDir::new().unwrap();
    sparse_file(&root.path().join("a.dat"), 200 * MIB);

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = scan_large_files(root.path(), 100, 50, &cancel);
    assert_eq!(result.count, 0);
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_reported_once() {
    let root = TempDir::new().unwrap();
    let data = root.path().join("data");
    sparse_file(&data.join("movie.mkv"), 120 * MIB);

    std::os::unix::fs::symlink(data.join("movie.mkv"), root.path().join("alias.mkv")).unwrap();
    std::os::unix::fs::symlink(&data, root.path().join("mirror")).unwrap();

    let result = scan_large_files(root.path(), 100, 50, &CancelToken::new());
    assert_eq!(result.count, 1);
    assert_eq!(result.files[0].size, 120 * MIB);
}

#[cfg(unix)]
#[test]
fn test_directory_cycle_terminates() {
    let root = TempDir::new().unwrap();
    sparse_file(&root.path().join("nested/archive.tar"), 110 * MIB);

    std::os::unix::fs::symlink(root.path(), root.path().join("loop")).unwrap();
    std::os::unix::fs::symlink(root.path(), root.path().join("nested/back")).unwrap();

    let result = scan_large_files(root.path(), 100, 50, &CancelToken::new());
    assert_eq!(result.count, 1);
    assert!(result.files[0].path.ends_with("archive.tar"));
}

#[test]
fn test_disk_list_is_consistent() {
    for disk in get_disk_list() {
        assert!(disk.total > 0);
        assert_eq!(disk.used + disk.free, disk.total);
        assert!(disk.used_percent >= 0.0 && disk.used_percent <= 100.0);
    }
}
