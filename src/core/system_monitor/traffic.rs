//! Speed derivation and buffered history commits for network counters.

use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use sysinfo::Networks;

/// One meter reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficSample {
    /// Bytes per second, derived from the delta since the previous reading
    pub up_speed: u64,
    pub down_speed: u64,
    pub delta_sent: u64,
    pub delta_recv: u64,
}

/// Turns cumulative interface counters into speeds and deltas.
///
/// The first reading only establishes a baseline. A counter that goes
/// backwards (interface reset, wrap) yields a zero reading and re-baselines.
#[derive(Debug, Default)]
pub struct TrafficMeter {
    previous: Option<(u64, u64, Instant)>,
}

impl TrafficMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, total_sent: u64, total_recv: u64, now: Instant) -> TrafficSample {
        let previous = self.previous.replace((total_sent, total_recv, now));

        let Some((prev_sent, prev_recv, prev_at)) = previous else {
            return TrafficSample::default();
        };

        if total_sent < prev_sent || total_recv < prev_recv {
            return TrafficSample::default();
        }

        let delta_sent = total_sent - prev_sent;
        let delta_recv = total_recv - prev_recv;
        let elapsed = now.saturating_duration_since(prev_at);

        TrafficSample {
            up_speed: per_second(delta_sent, elapsed),
            down_speed: per_second(delta_recv, elapsed),
            delta_sent,
            delta_recv,
        }
    }
}

fn per_second(bytes: u64, elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        (bytes as f64 / secs).round() as u64
    } else {
        0
    }
}

/// Traffic ready to be written to history, stamped with its last sample time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficFlush {
    pub sent: u64,
    pub recv: u64,
    pub at: NaiveDateTime,
}

/// Accumulates traffic deltas between history commits.
///
/// A commit is due once the window is `commit_interval` old, or immediately
/// when a sample lands on a different calendar day than the buffered bytes;
/// in that case the buffered bytes are committed to their own day.
#[derive(Debug)]
pub struct PendingTraffic {
    sent: u64,
    recv: u64,
    window_start: Option<NaiveDateTime>,
    last_at: Option<NaiveDateTime>,
    commit_interval: chrono::Duration,
}

impl PendingTraffic {
    pub fn new(commit_interval: Duration) -> Self {
        Self {
            sent: 0,
            recv: 0,
            window_start: None,
            last_at: None,
            commit_interval: chrono::Duration::from_std(commit_interval)
                .unwrap_or_else(|_| chrono::Duration::seconds(30)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sent == 0 && self.recv == 0
    }

    /// Buffer a delta sampled at `now`, returning a flush when one is due
    pub fn push(&mut self, sent: u64, recv: u64, now: NaiveDateTime) -> Option<TrafficFlush> {
        if let Some(last) = self.last_at {
            if last.date() != now.date() {
                let flush = self.take();
                self.add(sent, recv, now);
                return flush;
            }
        }

        self.add(sent, recv, now);

        match self.window_start {
            Some(start) if now - start >= self.commit_interval => self.take(),
            _ => None,
        }
    }

    /// Drain the buffer; `None` when nothing was accumulated
    pub fn take(&mut self) -> Option<TrafficFlush> {
        let flush = match self.last_at {
            Some(at) if !self.is_empty() => Some(TrafficFlush {
                sent: self.sent,
                recv: self.recv,
                at,
            }),
            _ => None,
        };
        self.sent = 0;
        self.recv = 0;
        self.window_start = None;
        self.last_at = None;
        flush
    }

    fn add(&mut self, sent: u64, recv: u64, now: NaiveDateTime) {
        self.sent = self.sent.saturating_add(sent);
        self.recv = self.recv.saturating_add(recv);
        self.window_start.get_or_insert(now);
        self.last_at = Some(now);
    }
}

/// Cumulative (sent, received) bytes over all non-loopback interfaces
pub fn interface_totals(networks: &Networks) -> (u64, u64) {
    networks
        .iter()
        .filter(|(name, _)| !is_loopback(name))
        .fold((0u64, 0u64), |(sent, recv), (_, data)| {
            (
                sent.saturating_add(data.total_transmitted()),
                recv.saturating_add(data.total_received()),
            )
        })
}

fn is_loopback(name: &str) -> bool {
    name == "lo" || name.starts_with("lo0") || name.to_ascii_lowercase().contains("loopback")
}
