//! Durable history of clean, memory-optimization and network events
//!
//! Every append writes its raw record and increments the day/month(/year)
//! buckets and the family totals inside one transaction, so rollups always
//! agree with what was recorded. Raw mem-opt and network records are pruned
//! once older than the retention window; their buckets and totals are kept.
//!
//! All methods taking a timestamp have a sibling without it that uses the
//! local clock.

pub mod ago;
mod clean;
mod mem_opt;
mod net;
pub mod schema;

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use log::debug;
use parking_lot::Mutex;
use rusqlite::Connection;

use crate::core::config::EngineConfig;
use crate::error::Result;

pub(crate) const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Query windows and retention for the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySettings {
    pub retention_days: u32,
    pub daily_window_days: u32,
    pub recent_clean_records: usize,
    pub recent_mem_opt_records: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl HistorySettings {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            retention_days: config.retention_days,
            daily_window_days: config.daily_window_days,
            recent_clean_records: config.recent_clean_records,
            recent_mem_opt_records: config.recent_mem_opt_records,
        }
    }
}

/// SQLite-backed history store; all access is serialized by one mutex
pub struct HistoryStore {
    conn: Mutex<Connection>,
    settings: HistorySettings,
}

impl HistoryStore {
    /// Open (creating if needed) the database at `path`
    pub fn open(path: &Path, settings: HistorySettings) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Opening history store at {}", path.display());
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::from_connection(conn, settings)
    }

    pub fn open_in_memory(settings: HistorySettings) -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, settings)
    }

    fn from_connection(conn: Connection, settings: HistorySettings) -> Result<Self> {
        schema::init(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            settings,
        })
    }

    pub fn settings(&self) -> HistorySettings {
        self.settings
    }

    pub fn schema_version(&self) -> Result<i32> {
        schema::version(&self.conn.lock())
    }
}

pub(crate) fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) fn stamp(at: NaiveDateTime) -> String {
    at.format(STAMP_FORMAT).to_string()
}

pub(crate) fn day_key(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub(crate) fn month_key(at: NaiveDateTime) -> String {
    at.format("%Y-%m").to_string()
}

pub(crate) fn year_key(at: NaiveDateTime) -> String {
    at.format("%Y").to_string()
}

pub(crate) fn minute_key(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// First day (inclusive) of a window of `days` ending at `now`
pub(crate) fn days_back(now: NaiveDateTime, days: u32) -> String {
    day_key(now - chrono::Duration::days(i64::from(days)))
}

// SQLite integers are signed; byte counters never get near i64::MAX.
pub(crate) fn to_db(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub(crate) fn from_db(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
