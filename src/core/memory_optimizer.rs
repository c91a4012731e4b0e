//! Memory optimizer
//!
//! Measures used memory, asks the platform to reclaim, waits for the system
//! to settle and measures again.

use std::time::Duration;

use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use crate::core::types::{percent_of, MemoryOptResult};
use crate::platform::memory::{platform_reclaimer, MemoryReclaimer};

const MIB: f64 = 1024.0 * 1024.0;

/// One reading of physical memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySample {
    pub used: u64,
    pub total: u64,
}

impl MemorySample {
    pub fn read() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        Self {
            used: sys.used_memory(),
            total: sys.total_memory(),
        }
    }

    pub fn percent(&self) -> f64 {
        percent_of(self.used, self.total)
    }
}

pub struct MemoryOptimizer {
    reclaimer: Box<dyn MemoryReclaimer>,
    settle: Duration,
}

impl MemoryOptimizer {
    pub fn new(reclaimer: Box<dyn MemoryReclaimer>, settle: Duration) -> Self {
        Self { reclaimer, settle }
    }

    pub fn with_platform_default(settle: Duration) -> Self {
        Self::new(platform_reclaimer(), settle)
    }

    pub fn optimize(&self) -> MemoryOptResult {
        self.optimize_with(MemorySample::read)
    }

    /// Run one optimization pass with a custom memory reader.
    ///
    /// A failing reclaimer is logged; the before/after measurement still runs.
    pub fn optimize_with<F>(&self, mut sample: F) -> MemoryOptResult
    where
        F: FnMut() -> MemorySample,
    {
        let before = sample();

        if let Err(e) = self.reclaimer.reclaim() {
            log::warn!("Memory reclaimer '{}' failed: {}", self.reclaimer.name(), e);
        }

        if !self.settle.is_zero() {
            std::thread::sleep(self.settle);
        }

        let after = sample();
        compute_result(before, after)
    }
}

/// Before/after comparison; freed memory never goes negative
pub fn compute_result(before: MemorySample, after: MemorySample) -> MemoryOptResult {
    let freed = before.used.saturating_sub(after.used);
    MemoryOptResult {
        before_used: before.used,
        after_used: after.used,
        freed_mb: freed as f64 / MIB,
        before_percent: before.percent(),
        after_percent: after.percent(),
    }
}
