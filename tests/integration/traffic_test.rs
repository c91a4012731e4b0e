use std::time::{Duration, Instant};

use chrono::NaiveDate;
use sysward::core::history::{HistorySettings, HistoryStore};
use sysward::core::system_monitor::{PendingTraffic, TrafficMeter};

#[test]
fn test_one_megabyte_per_second() {
    let mut meter = TrafficMeter::new();
    let start = Instant::now();

    let first = meter.sample(5_000, 9_000, start);
    assert_eq!(first.up_speed, 0);
    assert_eq!(first.down_speed, 0);

    let second = meter.sample(1_005_000, 9_000, start + Duration::from_secs(1));
    assert_eq!(second.up_speed, 1_000_000);
    assert_eq!(second.down_speed, 0);
    assert_eq!(second.delta_sent, 1_000_000);
}

#[test]
fn test_counter_reset_rebaselines() {
    let mut meter = TrafficMeter::new();
    let start = Instant::now();

    meter.sample(10_000, 10_000, start);
    let reset = meter.sample(100, 100, start + Duration::from_secs(1));
    assert_eq!(reset.up_speed, 0);
    assert_eq!(reset.delta_recv, 0);

    let after = meter.sample(300, 100, start + Duration::from_secs(2));
    assert_eq!(after.up_speed, 200);
    assert_eq!(after.delta_sent, 200);
}

#[test]
fn test_midnight_flush_lands_on_previous_day() {
    let store = HistoryStore::open_in_memory(HistorySettings::default()).unwrap();
    let mut pending = PendingTraffic::new(Duration::from_secs(30));

    let late = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap().and_hms_opt(23, 59, 50).unwrap();
    let early = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap().and_hms_opt(0, 0, 5).unwrap();

    assert!(pending.push(700, 70, late).is_none());
    let flush = pending.push(300, 30, early).expect("day change flushes");
    store.record_net_traffic_at(flush.sent, flush.recv, flush.at).unwrap();

    let rest = pending.take().unwrap();
    store.record_net_traffic_at(rest.sent, rest.recv, rest.at).unwrap();

    let stats = store.net_stats_at(early).unwrap();
    assert_eq!(stats.daily_stats.len(), 2);
    assert_eq!(stats.daily_stats[0].date, "2026-03-31");
    assert_eq!(stats.daily_stats[0].sent, 700);
    assert_eq!(stats.daily_stats[1].date, "2026-04-01");
    assert_eq!(stats.daily_stats[1].sent, 300);
    assert_eq!(stats.monthly_stats.len(), 2);
    assert_eq!(stats.total_sent, 1000);
}

#[test]
fn test_commit_interval_batches_samples() {
    let mut pending = PendingTraffic::new(Duration::from_secs(30));
    let base = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();

    for second in 0..30 {
        assert!(pending.push(10, 1, base + chrono::Duration::seconds(second)).is_none());
    }
    let flush = pending.push(10, 1, base + chrono::Duration::seconds(30)).unwrap();
    assert_eq!(flush.sent, 310);
    assert_eq!(flush.recv, 31);
    assert!(pending.is_empty());
}
