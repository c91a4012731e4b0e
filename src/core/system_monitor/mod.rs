//! Background sampling of CPU, memory and network load.
//!
//! The runtime owns the sampling tasks; readers get the latest merged
//! snapshot. Network deltas are committed to the history store as they
//! accumulate.

mod runtime;
mod tasks;
pub mod traffic;

pub use runtime::{MonitorConfig, MonitorRuntime, MonitorSnapshot};
pub use traffic::{PendingTraffic, TrafficFlush, TrafficMeter, TrafficSample};
