//! Engine facade
//!
//! Owns the history store, the background sampling runtime and the
//! long-lived helpers, and exposes every operation the client calls.
//!
//! # Examples
//!
//! ```no_run
//! use sysward::{Engine, EngineConfig};
//!
//! let engine = Engine::start(EngineConfig::load())?;
//! let info = engine.get_system_info();
//! println!("{} ({:.1}% CPU)", info.hostname, info.cpu_usage);
//! engine.shutdown();
//! # Ok::<(), sysward::SyswardError>(())
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::core::cancel::CancelToken;
use crate::core::cleaner::JunkCleaner;
use crate::core::config::EngineConfig;
use crate::core::disk_inventory;
use crate::core::history::{HistorySettings, HistoryStore};
use crate::core::junk::JunkScanner;
use crate::core::memory_optimizer::MemoryOptimizer;
use crate::core::process_monitor;
use crate::core::system_info::{self, PublicIpResolver};
use crate::core::system_monitor::traffic::interface_totals;
use crate::core::system_monitor::{MonitorConfig, MonitorRuntime, MonitorSnapshot};
use crate::core::types::{
    percent_of, CleanHistoryStats, CleanResult, DiskInfo, DiskScanResult, GpuResult, MemOptStats,
    MemoryOptResult, NetTrafficInfo, NetTrafficResult, NetTrafficStats, ProcessInfo, RealtimeStats,
    ScanResult, SystemInfo, UpdateInfo,
};
use crate::core::update;
use crate::error::Result;
use crate::platform::net_procs;

pub struct Engine {
    config: EngineConfig,
    history: Arc<HistoryStore>,
    ip_resolver: PublicIpResolver,
    cleaner: JunkCleaner,
    optimizer: MemoryOptimizer,
    monitor: Option<MonitorRuntime>,
}

impl Engine {
    /// Open the history store and, unless disabled, start background sampling
    pub fn start(config: EngineConfig) -> Result<Self> {
        Self::with_scanner(config, JunkScanner::new())
    }

    /// Like [`Engine::start`] with custom junk locations
    pub fn with_scanner(config: EngineConfig, scanner: JunkScanner) -> Result<Self> {
        let history = Arc::new(HistoryStore::open(
            &config.history_db_path(),
            HistorySettings::from_config(&config),
        )?);

        let monitor = if config.background_sampling {
            Some(MonitorRuntime::start(
                MonitorConfig {
                    sample_interval: Duration::from_millis(config.sample_interval_ms.max(1)),
                    net_commit_interval: Duration::from_secs(config.net_commit_interval_secs),
                },
                Arc::clone(&history),
            )?)
        } else {
            None
        };

        let ip_resolver = PublicIpResolver::new(
            config.ip_lookup_url.clone(),
            Duration::from_secs(config.ip_lookup_timeout_secs),
            Duration::from_secs(config.ip_cache_ttl_secs),
        );
        let optimizer = MemoryOptimizer::with_platform_default(Duration::from_millis(config.memory_settle_ms));

        log::info!("Engine started (data dir: {})", config.data_dir.display());

        Ok(Self {
            config,
            history,
            ip_resolver,
            cleaner: JunkCleaner::new(scanner),
            optimizer,
            monitor,
        })
    }

    /// Stop sampling and flush pending traffic; dropping the engine does the same
    pub fn shutdown(self) {
        if let Some(monitor) = self.monitor {
            monitor.shutdown();
        }
        log::info!("Engine stopped");
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Latest background snapshot, if sampling runs
    pub fn snapshot(&self) -> Option<Arc<MonitorSnapshot>> {
        self.monitor.as_ref().map(MonitorRuntime::snapshot)
    }

    pub fn get_system_info(&self) -> SystemInfo {
        let cpu_hint = self
            .snapshot()
            .filter(|snapshot| snapshot.timestamp > 0)
            .map(|snapshot| snapshot.realtime.cpu_percent);
        system_info::collect_system_info(&self.ip_resolver, cpu_hint)
    }

    pub fn scan_junk(&self) -> Vec<ScanResult> {
        self.cleaner.scanner().scan()
    }

    /// Token that interrupts a running [`Engine::clean_junk`]
    pub fn clean_cancel_token(&self) -> CancelToken {
        self.cleaner.cancel_token()
    }

    pub fn clean_junk(&self, category_ids: &[String]) -> Result<CleanResult> {
        self.clean_junk_with_progress(category_ids, |_, _| {})
    }

    /// Delete the files of the given categories and record the outcome.
    ///
    /// No known category means nothing is deleted and nothing is recorded.
    pub fn clean_junk_with_progress<F>(&self, category_ids: &[String], on_progress: F) -> Result<CleanResult>
    where
        F: Fn(usize, usize),
    {
        let categories = JunkCleaner::resolve_categories(category_ids);
        if categories.is_empty() {
            return Ok(CleanResult::default());
        }

        let result = self.cleaner.clean(&categories, on_progress);
        self.history.record_clean(&result)?;
        Ok(result)
    }

    pub fn optimize_memory(&self) -> Result<MemoryOptResult> {
        let result = self.optimizer.optimize();
        self.history.record_mem_opt(&result)?;
        Ok(result)
    }

    pub fn get_process_list(&self) -> Vec<ProcessInfo> {
        process_monitor::list_processes()
    }

    pub fn kill_process(&self, pid: u32) -> Result<()> {
        process_monitor::kill_process(pid)
    }

    pub fn get_gpu_info(&self) -> GpuResult {
        system_info::gpu::collect()
    }

    pub fn get_clean_history(&self) -> Result<CleanHistoryStats> {
        self.history.clean_stats()
    }

    /// Latest CPU/memory/speed figures.
    ///
    /// Reads the background snapshot; without sampling, CPU and memory are
    /// measured on the spot and speeds are zero.
    pub fn get_realtime_stats(&self) -> RealtimeStats {
        match self.snapshot() {
            Some(snapshot) => snapshot.realtime,
            None => sample_realtime(),
        }
    }

    pub fn get_net_traffic(&self) -> NetTrafficResult {
        let overview = match self.snapshot() {
            Some(snapshot) => snapshot.net,
            None => {
                let networks = Networks::new_with_refreshed_list();
                let (total_sent, total_recv) = interface_totals(&networks);
                NetTrafficInfo {
                    total_sent,
                    total_recv,
                    ..Default::default()
                }
            }
        };

        NetTrafficResult {
            overview,
            processes: net_procs::process_net_usage(),
        }
    }

    pub fn get_net_traffic_stats(&self) -> Result<NetTrafficStats> {
        self.history.net_stats()
    }

    pub fn get_disk_list(&self) -> Vec<DiskInfo> {
        disk_inventory::get_disk_list()
    }

    pub fn scan_large_files(&self, root: &Path, min_size_mb: i64) -> DiskScanResult {
        self.scan_large_files_with_cancel(root, min_size_mb, &CancelToken::new())
    }

    pub fn scan_large_files_with_cancel(&self, root: &Path, min_size_mb: i64, cancel: &CancelToken) -> DiskScanResult {
        disk_inventory::scan_large_files(root, min_size_mb, self.config.default_large_file_mb, cancel)
    }

    pub fn get_mem_opt_stats(&self) -> Result<MemOptStats> {
        self.history.mem_opt_stats()
    }

    pub fn app_version(&self) -> &'static str {
        update::app_version()
    }

    pub fn check_update(&self) -> Result<UpdateInfo> {
        update::check_update(&self.config.update_repo)
    }
}

fn sample_realtime() -> RealtimeStats {
    let mut sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::nothing().with_ram()),
    );
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();

    RealtimeStats {
        cpu_percent: f64::from(sys.global_cpu_usage()),
        mem_percent: percent_of(sys.used_memory(), sys.total_memory()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet_config(dir: &TempDir) -> EngineConfig {
        EngineConfig {
            background_sampling: false,
            memory_settle_ms: 0,
            ..EngineConfig::default()
        }
        .with_data_dir(dir.path())
    }

    #[test]
    fn test_unknown_categories_write_no_history() {
        let dir = TempDir::new().unwrap();
        let engine = Engine::with_scanner(quiet_config(&dir), JunkScanner::with_rules(Vec::new())).unwrap();

        let result = engine.clean_junk(&["not_a_category".to_string()]).unwrap();
        assert_eq!(result, CleanResult::default());
        assert!(engine.get_clean_history().unwrap().records.is_empty());

        let result = engine.clean_junk(&[]).unwrap();
        assert_eq!(result.attempted(), 0);
        assert_eq!(engine.get_clean_history().unwrap().last_clean_ago, "never");
    }

    #[test]
    fn test_known_empty_category_is_recorded() {
        let dir = TempDir::new().unwrap();
        let engine = Engine::with_scanner(quiet_config(&dir), JunkScanner::with_rules(Vec::new())).unwrap();

        engine.clean_junk(&["system_temp".to_string()]).unwrap();
        assert_eq!(engine.get_clean_history().unwrap().records.len(), 1);
    }

    #[test]
    fn test_realtime_without_sampling() {
        let dir = TempDir::new().unwrap();
        let engine = Engine::with_scanner(quiet_config(&dir), JunkScanner::with_rules(Vec::new())).unwrap();

        assert!(engine.snapshot().is_none());
        let stats = engine.get_realtime_stats();
        assert_eq!(stats.net_up_speed, 0);
        assert!(stats.mem_percent >= 0.0);
        engine.shutdown();
    }
}
