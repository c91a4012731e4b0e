//! CPU and memory sampling task.

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, Duration, MissedTickBehavior};

use super::SubsystemUpdate;
use crate::core::types::percent_of;

/// Task that samples global CPU and memory load every `period`.
pub async fn cpu_memory_task(
    update_tx: mpsc::Sender<SubsystemUpdate>,
    mut shutdown: broadcast::Receiver<()>,
    period: Duration,
) {
    log::debug!("CPU/memory sampling task started");

    let refresh_kind = RefreshKind::nothing()
        .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
        .with_memory(MemoryRefreshKind::nothing().with_ram());

    let mut system = System::new_with_specifics(refresh_kind);

    // CPU usage needs two refreshes at least this far apart
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;

    let mut ticker = interval(period.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                system.refresh_cpu_usage();
                system.refresh_memory();

                let update = SubsystemUpdate::CpuMemory {
                    cpu_percent: f64::from(system.global_cpu_usage()),
                    mem_percent: percent_of(system.used_memory(), system.total_memory()),
                };

                if update_tx.send(update).await.is_err() {
                    break;
                }
            }
            _ = shutdown.recv() => {
                log::debug!("CPU/memory task shutting down");
                break;
            }
        }
    }
}
