//! Async sampling tasks.
//!
//! Each subsystem runs in its own task and reports to the orchestrator.

mod cpu_memory;
mod network;

pub use cpu_memory::cpu_memory_task;
pub use network::{network_task, NetworkTaskConfig};

use crate::core::types::NetTrafficInfo;

/// Updates sent from subsystem tasks to the orchestrator.
#[derive(Debug, Clone, Copy)]
pub enum SubsystemUpdate {
    /// Global CPU and memory load, percent
    CpuMemory { cpu_percent: f64, mem_percent: f64 },

    /// Interface totals and derived speeds
    Network(NetTrafficInfo),
}
