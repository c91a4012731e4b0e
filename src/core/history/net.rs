use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};

use super::{day_key, days_back, from_db, minute_key, month_key, now_local, to_db, year_key, HistoryStore};
use crate::core::types::{NetDailyStat, NetMonthlyStat, NetTrafficRecord, NetTrafficStats, NetYearlyStat};
use crate::error::Result;

impl HistoryStore {
    pub fn record_net_traffic(&self, sent: u64, recv: u64) -> Result<()> {
        self.record_net_traffic_at(sent, recv, now_local())
    }

    /// Merge traffic into the record for `at`'s minute and its day/month/year buckets.
    ///
    /// A zero delta writes nothing.
    pub fn record_net_traffic_at(&self, sent: u64, recv: u64, at: NaiveDateTime) -> Result<()> {
        if sent == 0 && recv == 0 {
            return Ok(());
        }
        let sent = to_db(sent);
        let recv = to_db(recv);
        let date = day_key(at);

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO net_minutes (timestamp, date, sent, recv) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(timestamp) DO UPDATE SET
                sent = sent + excluded.sent,
                recv = recv + excluded.recv",
            params![minute_key(at), date, sent, recv],
        )?;
        tx.execute(
            "INSERT INTO net_daily (date, sent, recv) VALUES (?1, ?2, ?3)
             ON CONFLICT(date) DO UPDATE SET
                sent = sent + excluded.sent,
                recv = recv + excluded.recv",
            params![date, sent, recv],
        )?;
        tx.execute(
            "INSERT INTO net_monthly (month, sent, recv) VALUES (?1, ?2, ?3)
             ON CONFLICT(month) DO UPDATE SET
                sent = sent + excluded.sent,
                recv = recv + excluded.recv",
            params![month_key(at), sent, recv],
        )?;
        tx.execute(
            "INSERT INTO net_yearly (year, sent, recv) VALUES (?1, ?2, ?3)
             ON CONFLICT(year) DO UPDATE SET
                sent = sent + excluded.sent,
                recv = recv + excluded.recv",
            params![year_key(at), sent, recv],
        )?;
        tx.execute(
            "UPDATE net_totals SET sent = sent + ?1, recv = recv + ?2 WHERE id = 1",
            params![sent, recv],
        )?;
        tx.execute(
            "DELETE FROM net_minutes WHERE date < ?1",
            params![days_back(at, self.settings.retention_days)],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Retained per-minute records, oldest first
    pub fn net_records(&self) -> Result<Vec<NetTrafficRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT timestamp, date, sent, recv FROM net_minutes ORDER BY timestamp")?;
        let records = stmt
            .query_map([], |row| {
                Ok(NetTrafficRecord {
                    timestamp: row.get(0)?,
                    date: row.get(1)?,
                    sent: from_db(row.get(2)?),
                    recv: from_db(row.get(3)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn net_stats(&self) -> Result<NetTrafficStats> {
        self.net_stats_at(now_local())
    }

    pub fn net_stats_at(&self, now: NaiveDateTime) -> Result<NetTrafficStats> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare("SELECT date, sent, recv FROM net_daily WHERE date >= ?1 ORDER BY date")?;
        let daily_stats = stmt
            .query_map(params![days_back(now, self.settings.daily_window_days)], |row| {
                Ok(NetDailyStat {
                    date: row.get(0)?,
                    sent: from_db(row.get(1)?),
                    recv: from_db(row.get(2)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare("SELECT month, sent, recv FROM net_monthly ORDER BY month")?;
        let monthly_stats = stmt
            .query_map([], |row| {
                Ok(NetMonthlyStat {
                    month: row.get(0)?,
                    sent: from_db(row.get(1)?),
                    recv: from_db(row.get(2)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare("SELECT year, sent, recv FROM net_yearly ORDER BY year")?;
        let yearly_stats = stmt
            .query_map([], |row| {
                Ok(NetYearlyStat {
                    year: row.get(0)?,
                    sent: from_db(row.get(1)?),
                    recv: from_db(row.get(2)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let (total_sent, total_recv): (i64, i64) = conn
            .query_row("SELECT sent, recv FROM net_totals WHERE id = 1", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()?
            .unwrap_or((0, 0));

        Ok(NetTrafficStats {
            daily_stats,
            monthly_stats,
            yearly_stats,
            total_sent: from_db(total_sent),
            total_recv: from_db(total_recv),
        })
    }
}
