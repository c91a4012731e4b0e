use std::fs;

use sysward::core::cleaner::JunkCleaner;
use sysward::core::junk::{CategoryRule, JunkCategory, JunkScanner, ScanRoot};
use sysward::{Engine, EngineConfig};
use tempfile::TempDir;

fn scanner_for(category: JunkCategory, dir: &TempDir) -> JunkScanner {
    JunkScanner::with_rules(vec![CategoryRule::new(category).with_root(ScanRoot::all_files(dir.path()))])
}

fn engine_with(data: &TempDir, scanner: JunkScanner) -> Engine {
    let config = EngineConfig {
        background_sampling: false,
        ..EngineConfig::default()
    }
    .with_data_dir(data.path());
    Engine::with_scanner(config, scanner).unwrap()
}

#[test]
fn test_clean_deletes_and_tallies() {
    let junk = TempDir::new().unwrap();
    fs::write(junk.path().join("a.tmp"), vec![0u8; 1000]).unwrap();
    fs::create_dir_all(junk.path().join("sub")).unwrap();
    fs::write(junk.path().join("sub/b.tmp"), vec![0u8; 24]).unwrap();

    let cleaner = JunkCleaner::new(scanner_for(JunkCategory::SystemTemp, &junk));
    let result = cleaner.clean(&[JunkCategory::SystemTemp], |_, _| {});

    assert_eq!(result.cleaned_count, 2);
    assert_eq!(result.failed_count, 0);
    assert_eq!(result.freed_size, 1024);
    assert!(!junk.path().join("a.tmp").exists());
    assert!(!junk.path().join("sub/b.tmp").exists());
}

#[test]
fn test_progress_reports_every_attempt() {
    let junk = TempDir::new().unwrap();
    for i in 0..5 {
        fs::write(junk.path().join(format!("{}.tmp", i)), b"x").unwrap();
    }

    let cleaner = JunkCleaner::new(scanner_for(JunkCategory::SystemTemp, &junk));
    let calls = std::cell::RefCell::new(Vec::new());
    let result = cleaner.clean(&[JunkCategory::SystemTemp], |processed, total| {
        calls.borrow_mut().push((processed, total));
    });

    let calls = calls.into_inner();
    assert_eq!(calls.len(), result.attempted());
    assert_eq!(calls.last(), Some(&(5, 5)));
}

#[test]
fn test_cancel_stops_remaining_files() {
    let junk = TempDir::new().unwrap();
    for i in 0..3 {
        fs::write(junk.path().join(format!("{}.tmp", i)), b"data").unwrap();
    }

    let cleaner = JunkCleaner::new(scanner_for(JunkCategory::SystemTemp, &junk));
    let cancel = cleaner.cancel_token();
    let result = cleaner.clean(&[JunkCategory::SystemTemp], |_, _| cancel.cancel());

    assert_eq!(result.attempted(), 1);
    assert_eq!(fs::read_dir(junk.path()).unwrap().count(), 2);
}

#[test]
fn test_engine_cleans_again_after_cancel() {
    let data = TempDir::new().unwrap();
    let junk = TempDir::new().unwrap();
    fs::write(junk.path().join("first.tmp"), b"first").unwrap();

    let engine = engine_with(&data, scanner_for(JunkCategory::SystemTemp, &junk));
    let cancel = engine.clean_cancel_token();
    let ids = vec!["system_temp".to_string()];
    engine
        .clean_junk_with_progress(&ids, |_, _| cancel.cancel())
        .unwrap();

    fs::write(junk.path().join("later.tmp"), vec![0u8; 50]).unwrap();
    let second = engine.clean_junk(&ids).unwrap();

    assert_eq!(second.cleaned_count, 1);
    assert_eq!(second.freed_size, 50);
    assert!(!junk.path().join("later.tmp").exists());
    assert_eq!(engine.get_clean_history().unwrap().total_count, 2);
}

#[test]
fn test_unselected_categories_are_untouched() {
    let temp = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    fs::write(temp.path().join("a.tmp"), b"1").unwrap();
    fs::write(logs.path().join("a.log"), b"2").unwrap();

    let scanner = JunkScanner::with_rules(vec![
        CategoryRule::new(JunkCategory::SystemTemp).with_root(ScanRoot::all_files(temp.path())),
        CategoryRule::new(JunkCategory::SystemLogs).with_root(ScanRoot::all_files(logs.path())),
    ]);
    let cleaner = JunkCleaner::new(scanner);
    cleaner.clean(&[JunkCategory::SystemTemp], |_, _| {});

    assert!(!temp.path().join("a.tmp").exists());
    assert!(logs.path().join("a.log").exists());
}

#[test]
fn test_engine_clean_records_history() {
    let data = TempDir::new().unwrap();
    let junk = TempDir::new().unwrap();
    fs::write(junk.path().join("x.tmp"), vec![0u8; 300]).unwrap();

    let engine = engine_with(&data, scanner_for(JunkCategory::SystemTemp, &junk));
    let result = engine
        .clean_junk(&["system_temp".to_string(), "unknown".to_string()])
        .unwrap();
    assert_eq!(result.cleaned_count, 1);

    let stats = engine.get_clean_history().unwrap();
    assert_eq!(stats.records.len(), 1);
    assert_eq!(stats.total_freed, 300);
    assert_eq!(stats.total_count, 1);
    assert_eq!(stats.daily_stats.len(), 1);
    assert_eq!(stats.daily_stats[0].freed_size, 300);
    assert_eq!(stats.monthly_stats[0].count, 1);
    assert_ne!(stats.last_clean_ago, "never");
}

#[test]
fn test_engine_empty_selection_writes_nothing() {
    let data = TempDir::new().unwrap();
    let engine = engine_with(&data, JunkScanner::with_rules(Vec::new()));

    let result = engine.clean_junk(&[]).unwrap();
    assert_eq!(result.attempted(), 0);
    assert_eq!(result.freed_size, 0);

    let stats = engine.get_clean_history().unwrap();
    assert!(stats.records.is_empty());
    assert_eq!(stats.last_clean_ago, "never");
}
