//! Tokio runtime and orchestrator for background sampling.
//!
//! Subsystem tasks push partial updates over an mpsc channel; the orchestrator
//! owns the merged snapshot and republishes it through a `watch` cell that any
//! number of readers can borrow without waiting.

use std::sync::Arc;

use tokio::runtime::{Handle, Runtime};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Duration;

use super::tasks::{cpu_memory_task, network_task, NetworkTaskConfig, SubsystemUpdate};
use crate::core::history::HistoryStore;
use crate::core::types::{NetTrafficInfo, RealtimeStats};
use crate::error::{Result, SyswardError};

/// How long shutdown waits for tasks to finish their final flush
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Latest merged sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonitorSnapshot {
    pub realtime: RealtimeStats,
    pub net: NetTrafficInfo,
    /// Unix seconds of the last merged update, 0 before the first one
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    pub sample_interval: Duration,
    pub net_commit_interval: Duration,
}

/// Owns the sampling runtime and its tasks.
///
/// Dropping it stops the tasks the same way [`MonitorRuntime::shutdown`] does,
/// including the final traffic flush.
pub struct MonitorRuntime {
    snapshot_rx: watch::Receiver<Arc<MonitorSnapshot>>,
    shutdown_tx: broadcast::Sender<()>,
    handles: Vec<JoinHandle<()>>,
    runtime: Option<Runtime>,
}

impl MonitorRuntime {
    /// Build the runtime and spawn the orchestrator plus all sampling tasks.
    pub fn start(config: MonitorConfig, history: Arc<HistoryStore>) -> Result<Self> {
        log::info!("Starting monitor runtime");

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .thread_name("sysward-monitor")
            .build()
            .map_err(|e| SyswardError::system_monitor(format!("failed to build runtime: {}", e)))?;

        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(MonitorSnapshot::default()));
        let (shutdown_tx, _) = broadcast::channel::<()>(1);
        let (update_tx, update_rx) = mpsc::channel::<SubsystemUpdate>(32);

        let handles = vec![
            runtime.spawn(orchestrator_task(update_rx, snapshot_tx, shutdown_tx.subscribe())),
            runtime.spawn(cpu_memory_task(
                update_tx.clone(),
                shutdown_tx.subscribe(),
                config.sample_interval,
            )),
            runtime.spawn(network_task(
                update_tx,
                shutdown_tx.subscribe(),
                NetworkTaskConfig {
                    period: config.sample_interval,
                    commit_interval: config.net_commit_interval,
                },
                history,
            )),
        ];

        Ok(Self {
            snapshot_rx,
            shutdown_tx,
            handles,
            runtime: Some(runtime),
        })
    }

    /// Latest snapshot; never blocks
    pub fn snapshot(&self) -> Arc<MonitorSnapshot> {
        Arc::clone(&self.snapshot_rx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<MonitorSnapshot>> {
        self.snapshot_rx.clone()
    }

    /// Signal every task to stop and wait for pending traffic to be flushed.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(runtime) = self.runtime.take() else {
            return;
        };

        log::info!("Shutting down monitor runtime");
        let _ = self.shutdown_tx.send(());
        let handles = std::mem::take(&mut self.handles);

        // block_on panics on a thread that already drives a runtime
        if Handle::try_current().is_ok() {
            let joined = std::thread::spawn(move || drain(runtime, handles)).join();
            if joined.is_err() {
                log::error!("Monitor shutdown thread panicked");
            }
        } else {
            drain(runtime, handles);
        }
    }
}

impl Drop for MonitorRuntime {
    fn drop(&mut self) {
        self.stop();
    }
}

fn drain(runtime: Runtime, handles: Vec<JoinHandle<()>>) {
    let finished = runtime.block_on(async move {
        tokio::time::timeout(SHUTDOWN_GRACE, async move {
            for handle in handles {
                let _ = handle.await;
            }
        })
        .await
    });

    if finished.is_err() {
        log::warn!("Monitor tasks did not stop within {:?}", SHUTDOWN_GRACE);
    }
    runtime.shutdown_background();
}

/// Merges subsystem updates into the published snapshot.
async fn orchestrator_task(
    mut update_rx: mpsc::Receiver<SubsystemUpdate>,
    snapshot_tx: watch::Sender<Arc<MonitorSnapshot>>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut current = MonitorSnapshot::default();

    loop {
        tokio::select! {
            Some(update) = update_rx.recv() => {
                apply_update(&mut current, update);
                current.timestamp = chrono::Utc::now().timestamp();

                // Only fails when every receiver is gone
                let _ = snapshot_tx.send(Arc::new(current));
            }
            _ = shutdown.recv() => {
                log::debug!("Orchestrator shutting down");
                break;
            }
        }
    }
}

fn apply_update(snapshot: &mut MonitorSnapshot, update: SubsystemUpdate) {
    match update {
        SubsystemUpdate::CpuMemory { cpu_percent, mem_percent } => {
            snapshot.realtime.cpu_percent = cpu_percent;
            snapshot.realtime.mem_percent = mem_percent;
        }
        SubsystemUpdate::Network(net) => {
            snapshot.net = net;
            snapshot.realtime.net_up_speed = net.up_speed;
            snapshot.realtime.net_down_speed = net.down_speed;
        }
    }
}
