use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};

use super::ago::{ago_since, NEVER};
use super::{day_key, days_back, month_key, now_local, stamp, HistoryStore};
use crate::core::types::{MemOptDailyStat, MemOptMonthlyStat, MemOptRecord, MemOptStats, MemoryOptResult};
use crate::error::Result;

impl HistoryStore {
    pub fn record_mem_opt(&self, result: &MemoryOptResult) -> Result<MemOptRecord> {
        self.record_mem_opt_at(result, now_local())
    }

    /// Append an optimization event, update its buckets, prune expired raw records
    pub fn record_mem_opt_at(&self, result: &MemoryOptResult, at: NaiveDateTime) -> Result<MemOptRecord> {
        let record = MemOptRecord {
            date: day_key(at),
            time: at.format("%H:%M:%S").to_string(),
            freed_mb: result.freed_mb,
            before_percent: result.before_percent,
            after_percent: result.after_percent,
        };
        let recorded_at = stamp(at);

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO memopt_records (recorded_at, date, time, freed_mb, before_percent, after_percent)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                recorded_at,
                record.date,
                record.time,
                record.freed_mb,
                record.before_percent,
                record.after_percent
            ],
        )?;
        tx.execute(
            "INSERT INTO memopt_daily (date, freed_mb, count) VALUES (?1, ?2, 1)
             ON CONFLICT(date) DO UPDATE SET
                freed_mb = freed_mb + excluded.freed_mb,
                count = count + 1",
            params![record.date, record.freed_mb],
        )?;
        tx.execute(
            "INSERT INTO memopt_monthly (month, freed_mb, count) VALUES (?1, ?2, 1)
             ON CONFLICT(month) DO UPDATE SET
                freed_mb = freed_mb + excluded.freed_mb,
                count = count + 1",
            params![month_key(at), record.freed_mb],
        )?;
        tx.execute(
            "UPDATE memopt_totals SET
                freed_mb = freed_mb + ?1,
                count = count + 1,
                last_at = max(COALESCE(last_at, ''), ?2)
             WHERE id = 1",
            params![record.freed_mb, recorded_at],
        )?;
        tx.execute(
            "DELETE FROM memopt_records WHERE date < ?1",
            params![days_back(at, self.settings.retention_days)],
        )?;

        tx.commit()?;
        Ok(record)
    }

    /// Raw records still retained, oldest first
    pub fn mem_opt_records(&self) -> Result<Vec<MemOptRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT date, time, freed_mb, before_percent, after_percent
             FROM memopt_records ORDER BY recorded_at ASC, id ASC",
        )?;
        let records = stmt
            .query_map([], map_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn mem_opt_stats(&self) -> Result<MemOptStats> {
        self.mem_opt_stats_at(now_local())
    }

    pub fn mem_opt_stats_at(&self, now: NaiveDateTime) -> Result<MemOptStats> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT date, time, freed_mb, before_percent, after_percent FROM (
                SELECT id, recorded_at, date, time, freed_mb, before_percent, after_percent
                FROM memopt_records ORDER BY recorded_at DESC, id DESC LIMIT ?1
             ) ORDER BY recorded_at ASC, id ASC",
        )?;
        let recent_records = stmt
            .query_map(params![self.settings.recent_mem_opt_records as i64], map_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(
            "SELECT date, freed_mb, count FROM memopt_daily WHERE date >= ?1 ORDER BY date",
        )?;
        let daily_stats = stmt
            .query_map(params![days_back(now, self.settings.daily_window_days)], |row| {
                Ok(MemOptDailyStat {
                    date: row.get(0)?,
                    freed_mb: row.get(1)?,
                    count: row.get::<_, i64>(2)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare("SELECT month, freed_mb, count FROM memopt_monthly ORDER BY month")?;
        let monthly_stats = stmt
            .query_map([], |row| {
                Ok(MemOptMonthlyStat {
                    month: row.get(0)?,
                    freed_mb: row.get(1)?,
                    count: row.get::<_, i64>(2)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let totals: Option<(f64, i64, Option<String>)> = conn
            .query_row(
                "SELECT freed_mb, count, last_at FROM memopt_totals WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        let (total_freed_mb, total_count, last_at) = totals.unwrap_or((0.0, 0, None));

        let (last_opt_time, last_opt_ago) = match last_at.filter(|s| !s.is_empty()) {
            Some(last) => {
                let ago = ago_since(&last, now);
                (last, ago)
            }
            None => (String::new(), NEVER.to_string()),
        };

        Ok(MemOptStats {
            recent_records,
            daily_stats,
            monthly_stats,
            last_opt_time,
            last_opt_ago,
            total_freed_mb,
            total_count: total_count as usize,
        })
    }
}

fn map_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<MemOptRecord> {
    Ok(MemOptRecord {
        date: row.get(0)?,
        time: row.get(1)?,
        freed_mb: row.get(2)?,
        before_percent: row.get(3)?,
        after_percent: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::super::{HistorySettings, STAMP_FORMAT};
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, STAMP_FORMAT).unwrap()
    }

    fn opt(freed_mb: f64) -> MemoryOptResult {
        MemoryOptResult {
            before_used: 0,
            after_used: 0,
            freed_mb,
            before_percent: 70.0,
            after_percent: 60.0,
        }
    }

    #[test]
    fn test_recent_records_capped_at_ten() {
        let store = HistoryStore::open_in_memory(HistorySettings::default()).unwrap();
        for minute in 0..12 {
            let stamp = format!("2025-06-01 10:{:02}:00", minute);
            store.record_mem_opt_at(&opt(minute as f64), at(&stamp)).unwrap();
        }

        let stats = store.mem_opt_stats_at(at("2025-06-01 11:00:00")).unwrap();
        assert_eq!(stats.recent_records.len(), 10);
        assert_eq!(stats.recent_records[0].freed_mb, 2.0);
        assert_eq!(stats.recent_records[9].freed_mb, 11.0);
        assert_eq!(stats.total_count, 12);
        assert_eq!(stats.daily_stats[0].count, 12);
        assert_eq!(stats.last_opt_time, "2025-06-01 10:11:00");
    }

    #[test]
    fn test_old_raw_records_pruned_but_rollups_kept() {
        let store = HistoryStore::open_in_memory(HistorySettings::default()).unwrap();
        store.record_mem_opt_at(&opt(100.0), at("2025-01-01 08:00:00")).unwrap();
        store.record_mem_opt_at(&opt(50.0), at("2025-06-01 08:00:00")).unwrap();

        let raw = store.mem_opt_records().unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].date, "2025-06-01");

        let stats = store.mem_opt_stats_at(at("2025-06-01 09:00:00")).unwrap();
        assert_eq!(stats.total_freed_mb, 150.0);
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.monthly_stats.len(), 2);
        assert_eq!(stats.monthly_stats[0].month, "2025-01");
    }
}
