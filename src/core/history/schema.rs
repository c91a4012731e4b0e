use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i32 = 1;

// Bucket tables are keyed by the formatted date/month/year string; each
// family has a single-row totals table.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS clean_records (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    recorded_at   TEXT NOT NULL,
    date          TEXT NOT NULL,
    time          TEXT NOT NULL,
    freed_size    INTEGER NOT NULL,
    cleaned_count INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS clean_daily (
    date       TEXT PRIMARY KEY,
    freed_size INTEGER NOT NULL DEFAULT 0,
    count      INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS clean_monthly (
    month      TEXT PRIMARY KEY,
    freed_size INTEGER NOT NULL DEFAULT 0,
    count      INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS clean_totals (
    id         INTEGER PRIMARY KEY CHECK (id = 1),
    freed_size INTEGER NOT NULL DEFAULT 0,
    count      INTEGER NOT NULL DEFAULT 0,
    last_at    TEXT
);

CREATE TABLE IF NOT EXISTS memopt_records (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    recorded_at    TEXT NOT NULL,
    date           TEXT NOT NULL,
    time           TEXT NOT NULL,
    freed_mb       REAL NOT NULL,
    before_percent REAL NOT NULL,
    after_percent  REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_memopt_records_date ON memopt_records(date);
CREATE TABLE IF NOT EXISTS memopt_daily (
    date     TEXT PRIMARY KEY,
    freed_mb REAL NOT NULL DEFAULT 0,
    count    INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS memopt_monthly (
    month    TEXT PRIMARY KEY,
    freed_mb REAL NOT NULL DEFAULT 0,
    count    INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS memopt_totals (
    id       INTEGER PRIMARY KEY CHECK (id = 1),
    freed_mb REAL NOT NULL DEFAULT 0,
    count    INTEGER NOT NULL DEFAULT 0,
    last_at  TEXT
);

CREATE TABLE IF NOT EXISTS net_minutes (
    timestamp TEXT PRIMARY KEY,
    date      TEXT NOT NULL,
    sent      INTEGER NOT NULL DEFAULT 0,
    recv      INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_net_minutes_date ON net_minutes(date);
CREATE TABLE IF NOT EXISTS net_daily (
    date TEXT PRIMARY KEY,
    sent INTEGER NOT NULL DEFAULT 0,
    recv INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS net_monthly (
    month TEXT PRIMARY KEY,
    sent  INTEGER NOT NULL DEFAULT 0,
    recv  INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS net_yearly (
    year TEXT PRIMARY KEY,
    sent INTEGER NOT NULL DEFAULT 0,
    recv INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS net_totals (
    id   INTEGER PRIMARY KEY CHECK (id = 1),
    sent INTEGER NOT NULL DEFAULT 0,
    recv INTEGER NOT NULL DEFAULT 0
);

INSERT OR IGNORE INTO clean_totals (id) VALUES (1);
INSERT OR IGNORE INTO memopt_totals (id) VALUES (1);
INSERT OR IGNORE INTO net_totals (id) VALUES (1);
";

/// Create every table if missing and stamp the schema version. Idempotent.
pub fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

pub fn version(conn: &Connection) -> Result<i32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
