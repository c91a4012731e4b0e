use chrono::{Duration, NaiveDate, NaiveDateTime};
use sysward::core::history::{HistorySettings, HistoryStore};
use sysward::core::types::{CleanResult, MemoryOptResult};
use tempfile::TempDir;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

fn clean(freed: u64, count: usize) -> CleanResult {
    CleanResult {
        freed_size: freed,
        cleaned_count: count,
        failed_count: 0,
    }
}

fn mem_opt(freed_mb: f64) -> MemoryOptResult {
    MemoryOptResult {
        before_used: 2000,
        after_used: 1000,
        freed_mb,
        before_percent: 60.0,
        after_percent: 40.0,
    }
}

#[test]
fn test_empty_store_reports_never() {
    let store = HistoryStore::open_in_memory(HistorySettings::default()).unwrap();

    let clean = store.clean_stats().unwrap();
    assert!(clean.records.is_empty());
    assert_eq!(clean.total_freed, 0);
    assert_eq!(clean.last_clean_ago, "never");

    let mem = store.mem_opt_stats().unwrap();
    assert_eq!(mem.total_count, 0);
    assert_eq!(mem.last_opt_ago, "never");

    let net = store.net_stats().unwrap();
    assert!(net.daily_stats.is_empty());
    assert_eq!(net.total_sent, 0);
}

#[test]
fn test_clean_rollups_match_records() {
    let store = HistoryStore::open_in_memory(HistorySettings::default()).unwrap();
    store.record_clean_at(&clean(100, 1), at(2026, 3, 1, 9, 0)).unwrap();
    store.record_clean_at(&clean(200, 2), at(2026, 3, 1, 18, 0)).unwrap();
    store.record_clean_at(&clean(400, 4), at(2026, 3, 2, 9, 0)).unwrap();

    let stats = store.clean_stats_at(at(2026, 3, 2, 10, 0)).unwrap();

    assert_eq!(stats.records.len(), 3);
    assert_eq!(stats.records[0].date, "2026-03-01");
    assert_eq!(stats.daily_stats.len(), 2);
    assert_eq!(stats.daily_stats[0].freed_size, 300);
    assert_eq!(stats.daily_stats[0].count, 3);
    assert_eq!(stats.monthly_stats.len(), 1);
    assert_eq!(stats.monthly_stats[0].month, "2026-03");
    assert_eq!(stats.monthly_stats[0].freed_size, 700);

    let daily_sum: u64 = stats.daily_stats.iter().map(|d| d.freed_size).sum();
    assert_eq!(daily_sum, stats.total_freed);
    assert_eq!(stats.total_count, 7);
    assert_eq!(stats.last_clean_ago, "1 h 0 min ago");
}

#[test]
fn test_history_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("history.db");

    {
        let store = HistoryStore::open(&db, HistorySettings::default()).unwrap();
        store.record_clean_at(&clean(512, 2), at(2026, 5, 10, 8, 0)).unwrap();
        store.record_mem_opt_at(&mem_opt(64.0), at(2026, 5, 10, 8, 5)).unwrap();
        store.record_net_traffic_at(1000, 2000, at(2026, 5, 10, 8, 6)).unwrap();
    }

    let store = HistoryStore::open(&db, HistorySettings::default()).unwrap();
    let now = at(2026, 5, 10, 9, 0);

    let clean = store.clean_stats_at(now).unwrap();
    assert_eq!(clean.total_freed, 512);
    assert_eq!(clean.daily_stats[0].count, 2);

    let mem = store.mem_opt_stats_at(now).unwrap();
    assert_eq!(mem.total_count, 1);
    assert_eq!(mem.total_freed_mb, 64.0);

    let net = store.net_stats_at(now).unwrap();
    assert_eq!(net.total_sent, 1000);
    assert_eq!(net.yearly_stats[0].year, "2026");
    assert_eq!(net.yearly_stats[0].recv, 2000);
    assert_eq!(store.schema_version().unwrap(), 1);
}

#[test]
fn test_mem_opt_counts_events() {
    let store = HistoryStore::open_in_memory(HistorySettings::default()).unwrap();
    for i in 0..12 {
        store.record_mem_opt_at(&mem_opt(10.0), at(2026, 1, 15, 10, i)).unwrap();
    }

    let stats = store.mem_opt_stats_at(at(2026, 1, 15, 12, 0)).unwrap();
    assert_eq!(stats.total_count, 12);
    assert_eq!(stats.recent_records.len(), 10);
    assert_eq!(stats.recent_records.last().unwrap().time, "10:11:00");
    assert_eq!(stats.daily_stats[0].count, 12);
    assert_eq!(stats.daily_stats[0].freed_mb, 120.0);
}

#[test]
fn test_old_raw_records_pruned_rollups_kept() {
    let store = HistoryStore::open_in_memory(HistorySettings::default()).unwrap();
    let old = at(2025, 1, 1, 12, 0);
    let recent = old + Duration::days(120);

    store.record_net_traffic_at(10, 20, old).unwrap();
    store.record_net_traffic_at(1, 2, recent).unwrap();
    store.record_mem_opt_at(&mem_opt(5.0), old).unwrap();
    store.record_mem_opt_at(&mem_opt(7.0), recent).unwrap();

    let records = store.net_records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(store.mem_opt_records().unwrap().len(), 1);

    let net = store.net_stats_at(recent).unwrap();
    assert_eq!(net.total_sent, 11);
    assert_eq!(net.monthly_stats.len(), 2);

    let mem = store.mem_opt_stats_at(recent).unwrap();
    assert_eq!(mem.total_count, 2);
    assert_eq!(mem.total_freed_mb, 12.0);
}

#[test]
fn test_net_samples_merge_per_minute() {
    let store = HistoryStore::open_in_memory(HistorySettings::default()).unwrap();
    let base = at(2026, 7, 4, 13, 30);

    store.record_net_traffic_at(100, 10, base).unwrap();
    store.record_net_traffic_at(50, 5, base + Duration::seconds(30)).unwrap();
    store.record_net_traffic_at(1, 1, base + Duration::minutes(1)).unwrap();
    store.record_net_traffic_at(0, 0, base + Duration::minutes(2)).unwrap();

    let records = store.net_records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sent, 150);
    assert_eq!(records[0].recv, 15);

    let stats = store.net_stats_at(base).unwrap();
    assert_eq!(stats.daily_stats.len(), 1);
    assert_eq!(stats.daily_stats[0].sent, 151);
}

#[test]
fn test_concurrent_cleans_keep_every_increment() {
    let dir = TempDir::new().unwrap();
    let store = std::sync::Arc::new(
        HistoryStore::open(&dir.path().join("history.db"), HistorySettings::default()).unwrap(),
    );
    let threads = 8;
    let per_thread = 25;

    let workers: Vec<_> = (0..threads)
        .map(|t| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..per_thread {
                    store
                        .record_clean_at(&clean(100, 2), at(2025, 3, 10, t, i))
                        .unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let events = (threads * per_thread) as u64;
    let stats = store.clean_stats_at(at(2025, 3, 10, 23, 0)).unwrap();
    assert_eq!(stats.total_freed, events * 100);
    assert_eq!(stats.total_count, (events * 2) as usize);
    assert_eq!(stats.daily_stats.len(), 1);
    assert_eq!(stats.daily_stats[0].count, (events * 2) as usize);
    assert_eq!(stats.monthly_stats[0].freed_size, events * 100);
}
