use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};

use super::ago::{ago_since, NEVER};
use super::{day_key, days_back, from_db, month_key, now_local, stamp, to_db, HistoryStore};
use crate::core::types::{CleanHistoryStats, CleanRecord, CleanResult, DailyStat, MonthlyStat};
use crate::error::Result;

impl HistoryStore {
    pub fn record_clean(&self, result: &CleanResult) -> Result<CleanRecord> {
        self.record_clean_at(result, now_local())
    }

    /// Append a clean event and fold it into the daily/monthly buckets
    pub fn record_clean_at(&self, result: &CleanResult, at: NaiveDateTime) -> Result<CleanRecord> {
        let record = CleanRecord {
            date: day_key(at),
            time: at.format("%H:%M:%S").to_string(),
            freed_size: result.freed_size,
            cleaned_count: result.cleaned_count,
        };
        let freed = to_db(record.freed_size);
        let count = record.cleaned_count as i64;
        let recorded_at = stamp(at);

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO clean_records (recorded_at, date, time, freed_size, cleaned_count)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![recorded_at, record.date, record.time, freed, count],
        )?;
        tx.execute(
            "INSERT INTO clean_daily (date, freed_size, count) VALUES (?1, ?2, ?3)
             ON CONFLICT(date) DO UPDATE SET
                freed_size = freed_size + excluded.freed_size,
                count = count + excluded.count",
            params![record.date, freed, count],
        )?;
        tx.execute(
            "INSERT INTO clean_monthly (month, freed_size, count) VALUES (?1, ?2, ?3)
             ON CONFLICT(month) DO UPDATE SET
                freed_size = freed_size + excluded.freed_size,
                count = count + excluded.count",
            params![month_key(at), freed, count],
        )?;
        tx.execute(
            "UPDATE clean_totals SET
                freed_size = freed_size + ?1,
                count = count + ?2,
                last_at = max(COALESCE(last_at, ''), ?3)
             WHERE id = 1",
            params![freed, count, recorded_at],
        )?;

        tx.commit()?;
        Ok(record)
    }

    pub fn clean_stats(&self) -> Result<CleanHistoryStats> {
        self.clean_stats_at(now_local())
    }

    pub fn clean_stats_at(&self, now: NaiveDateTime) -> Result<CleanHistoryStats> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT date, time, freed_size, cleaned_count FROM (
                SELECT id, recorded_at, date, time, freed_size, cleaned_count
                FROM clean_records ORDER BY recorded_at DESC, id DESC LIMIT ?1
             ) ORDER BY recorded_at ASC, id ASC",
        )?;
        let records = stmt
            .query_map(params![self.settings.recent_clean_records as i64], |row| {
                Ok(CleanRecord {
                    date: row.get(0)?,
                    time: row.get(1)?,
                    freed_size: from_db(row.get(2)?),
                    cleaned_count: row.get::<_, i64>(3)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(
            "SELECT date, freed_size, count FROM clean_daily WHERE date >= ?1 ORDER BY date",
        )?;
        let daily_stats = stmt
            .query_map(params![days_back(now, self.settings.daily_window_days)], |row| {
                Ok(DailyStat {
                    date: row.get(0)?,
                    freed_size: from_db(row.get(1)?),
                    count: row.get::<_, i64>(2)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare("SELECT month, freed_size, count FROM clean_monthly ORDER BY month")?;
        let monthly_stats = stmt
            .query_map([], |row| {
                Ok(MonthlyStat {
                    month: row.get(0)?,
                    freed_size: from_db(row.get(1)?),
                    count: row.get::<_, i64>(2)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let totals: Option<(i64, i64, Option<String>)> = conn
            .query_row(
                "SELECT freed_size, count, last_at FROM clean_totals WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        let (total_freed, total_count, last_at) = totals.unwrap_or((0, 0, None));

        let (last_clean_time, last_clean_ago) = match last_at.filter(|s| !s.is_empty()) {
            Some(last) => {
                let ago = ago_since(&last, now);
                (last, ago)
            }
            None => (String::new(), NEVER.to_string()),
        };

        Ok(CleanHistoryStats {
            records,
            daily_stats,
            monthly_stats,
            last_clean_time,
            last_clean_ago,
            total_freed: from_db(total_freed),
            total_count: total_count as usize,
        })
    }
}
