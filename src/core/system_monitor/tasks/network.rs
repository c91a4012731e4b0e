//! Network accounting task.

use std::sync::Arc;

use sysinfo::Networks;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};

use super::SubsystemUpdate;
use crate::core::history::{now_local, HistoryStore};
use crate::core::system_monitor::traffic::{interface_totals, PendingTraffic, TrafficFlush, TrafficMeter};
use crate::core::types::NetTrafficInfo;

#[derive(Debug, Clone, Copy)]
pub struct NetworkTaskConfig {
    pub period: Duration,
    pub commit_interval: Duration,
}

/// Task that tracks interface counters, derives speeds and commits traffic to history.
///
/// Pending traffic is flushed once more on shutdown before the task exits.
pub async fn network_task(
    update_tx: mpsc::Sender<SubsystemUpdate>,
    mut shutdown: broadcast::Receiver<()>,
    config: NetworkTaskConfig,
    history: Arc<HistoryStore>,
) {
    log::debug!("Network accounting task started");

    let mut networks = Networks::new_with_refreshed_list();
    let mut meter = TrafficMeter::new();
    let mut pending = PendingTraffic::new(config.commit_interval);

    let mut ticker = interval(config.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                networks.refresh(true);

                let (total_sent, total_recv) = interface_totals(&networks);
                let sample = meter.sample(total_sent, total_recv, Instant::now().into_std());

                let info = NetTrafficInfo {
                    total_sent,
                    total_recv,
                    up_speed: sample.up_speed,
                    down_speed: sample.down_speed,
                };

                if let Some(flush) = pending.push(sample.delta_sent, sample.delta_recv, now_local()) {
                    commit(&history, flush).await;
                }

                if update_tx.send(SubsystemUpdate::Network(info)).await.is_err() {
                    break;
                }
            }
            _ = shutdown.recv() => {
                log::debug!("Network task shutting down");
                break;
            }
        }
    }

    if let Some(flush) = pending.take() {
        commit(&history, flush).await;
    }
}

async fn commit(history: &Arc<HistoryStore>, flush: TrafficFlush) {
    let history = Arc::clone(history);
    let outcome = tokio::task::spawn_blocking(move || {
        history.record_net_traffic_at(flush.sent, flush.recv, flush.at)
    })
    .await;

    match outcome {
        Ok(Ok(())) => log::trace!("Committed {} B sent / {} B received", flush.sent, flush.recv),
        Ok(Err(e)) => log::error!("Failed to commit network traffic: {}", e),
        Err(e) => log::error!("Network commit task panicked: {}", e),
    }
}
