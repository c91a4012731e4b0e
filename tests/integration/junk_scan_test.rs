use std::fs;
use std::path::Path;

use sysward::core::junk::{CategoryRule, JunkCategory, JunkScanner, ScanRoot};
use tempfile::TempDir;

fn write_file(path: &Path, size: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![b'x'; size]).unwrap();
}

#[test]
fn test_scan_reports_every_category_in_order() {
    let scanner = JunkScanner::with_rules(Vec::new());
    let results = scanner.scan();

    assert_eq!(results.len(), JunkCategory::ALL.len());
    for (result, category) in results.iter().zip(JunkCategory::ALL) {
        assert_eq!(result.category, category);
        assert_eq!(result.count, 0);
        assert_eq!(result.size, 0);
        assert!(result.items.is_empty());
    }
}

#[test]
fn test_size_and_count_match_items() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("a.tmp"), 100);
    write_file(&temp.path().join("nested/b.tmp"), 250);
    write_file(&temp.path().join("nested/deeper/c.tmp"), 7);

    let scanner = JunkScanner::with_rules(vec![
        CategoryRule::new(JunkCategory::SystemTemp).with_root(ScanRoot::all_files(temp.path())),
    ]);
    let result = scanner.scan_category(JunkCategory::SystemTemp);

    assert_eq!(result.count, 3);
    assert_eq!(result.count, result.items.len());
    assert_eq!(result.size, 357);
    assert_eq!(result.size, result.items.iter().map(|item| item.size).sum::<u64>());
    assert!(result.items.iter().all(|item| item.category == JunkCategory::SystemTemp));
}

#[test]
fn test_pattern_rule_only_picks_matching_names() {
    let logs = TempDir::new().unwrap();
    write_file(&logs.path().join("app.log"), 10);
    write_file(&logs.path().join("app.log.1"), 10);
    write_file(&logs.path().join("keep.txt"), 10);

    let scanner = JunkScanner::with_rules(vec![CategoryRule::new(JunkCategory::SystemLogs)
        .with_root(ScanRoot::matching(logs.path(), r"(?i)\.log(\.\d+)?$").unwrap())]);
    let result = scanner.scan_category(JunkCategory::SystemLogs);

    assert_eq!(result.count, 2);
    assert!(result.items.iter().all(|item| !item.path.ends_with("keep.txt")));
}

#[test]
fn test_categories_do_not_leak_into_each_other() {
    let temp = TempDir::new().unwrap();
    let thumbs = TempDir::new().unwrap();
    write_file(&temp.path().join("x.tmp"), 1);
    write_file(&thumbs.path().join("thumb.png"), 2);

    let scanner = JunkScanner::with_rules(vec![
        CategoryRule::new(JunkCategory::SystemTemp).with_root(ScanRoot::all_files(temp.path())),
        CategoryRule::new(JunkCategory::ThumbnailCache).with_root(ScanRoot::all_files(thumbs.path())),
    ]);
    let results = scanner.scan();

    let temp_result = results.iter().find(|r| r.category == JunkCategory::SystemTemp).unwrap();
    let thumb_result = results.iter().find(|r| r.category == JunkCategory::ThumbnailCache).unwrap();
    assert_eq!(temp_result.size, 1);
    assert_eq!(thumb_result.size, 2);
}

#[test]
fn test_items_sorted_by_path() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("zeta"), 1);
    write_file(&temp.path().join("alpha"), 1);
    write_file(&temp.path().join("mid/file"), 1);

    let scanner = JunkScanner::with_rules(vec![
        CategoryRule::new(JunkCategory::SystemTemp).with_root(ScanRoot::all_files(temp.path())),
    ]);
    let result = scanner.scan_category(JunkCategory::SystemTemp);

    let paths: Vec<&str> = result.items.iter().map(|item| item.path.as_str()).collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
}

#[test]
fn test_missing_root_scans_empty() {
    let scanner = JunkScanner::with_rules(vec![CategoryRule::new(JunkCategory::BrowserCache)
        .with_root(ScanRoot::all_files("/definitely/not/a/real/dir"))]);
    let result = scanner.scan_category(JunkCategory::BrowserCache);
    assert_eq!(result.count, 0);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    let temp = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    write_file(&outside.path().join("precious.dat"), 64);
    std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

    let scanner = JunkScanner::with_rules(vec![
        CategoryRule::new(JunkCategory::SystemTemp).with_root(ScanRoot::all_files(temp.path())),
    ]);
    let result = scanner.scan_category(JunkCategory::SystemTemp);
    assert_eq!(result.count, 0);
}
