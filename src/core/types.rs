//! Request/response shapes exchanged with the client.
//!
//! Field names are part of the persisted compatibility contract and must not
//! be renamed. Sizes are bytes unless the name says otherwise.

use serde::{Deserialize, Serialize};

use crate::core::junk::JunkCategory;

/// System overview
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemInfo {
    pub os: String,
    pub hostname: String,
    pub cpu_usage: f64,
    pub mem_total: u64,
    pub mem_used: u64,
    pub mem_percent: f64,
    pub disk_total: u64,
    pub disk_used: u64,
    pub disk_percent: f64,
    pub public_ip: String,
    pub ip_location: String,
    pub ip_operator: String,
}

/// One disposable file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JunkItem {
    pub path: String,
    pub size: u64,
    pub category: JunkCategory,
}

/// Scan outcome for one category
///
/// `size` and `count` are derived from `items`; build it with
/// [`ScanResult::from_items`] so the three never disagree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanResult {
    pub category: JunkCategory,
    pub label: String,
    pub items: Vec<JunkItem>,
    pub size: u64,
    pub count: usize,
}

impl ScanResult {
    pub fn from_items(category: JunkCategory, items: Vec<JunkItem>) -> Self {
        let size = items.iter().map(|item| item.size).sum();
        let count = items.len();
        Self {
            category,
            label: category.label().to_string(),
            items,
            size,
            count,
        }
    }

    pub fn empty(category: JunkCategory) -> Self {
        Self::from_items(category, Vec::new())
    }
}

/// Outcome of one clean invocation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CleanResult {
    pub freed_size: u64,
    pub cleaned_count: usize,
    pub failed_count: usize,
}

impl CleanResult {
    pub fn attempted(&self) -> usize {
        self.cleaned_count + self.failed_count
    }
}

/// Persisted clean event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanRecord {
    pub date: String,
    pub time: String,
    pub freed_size: u64,
    pub cleaned_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyStat {
    pub date: String,
    pub freed_size: u64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStat {
    pub month: String,
    pub freed_size: u64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CleanHistoryStats {
    pub records: Vec<CleanRecord>,
    pub daily_stats: Vec<DailyStat>,
    pub monthly_stats: Vec<MonthlyStat>,
    pub last_clean_time: String,
    pub last_clean_ago: String,
    pub total_freed: u64,
    pub total_count: usize,
}

/// Memory optimization outcome
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MemoryOptResult {
    pub before_used: u64,
    pub after_used: u64,
    pub freed_mb: f64,
    pub before_percent: f64,
    pub after_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemOptRecord {
    pub date: String,
    pub time: String,
    pub freed_mb: f64,
    pub before_percent: f64,
    pub after_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemOptDailyStat {
    pub date: String,
    pub freed_mb: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemOptMonthlyStat {
    pub month: String,
    pub freed_mb: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemOptStats {
    pub recent_records: Vec<MemOptRecord>,
    pub daily_stats: Vec<MemOptDailyStat>,
    pub monthly_stats: Vec<MemOptMonthlyStat>,
    pub last_opt_time: String,
    pub last_opt_ago: String,
    pub total_freed_mb: f64,
    pub total_count: usize,
}

/// Live process snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub mem_rss: u64,
    pub mem_percent: f32,
    pub status: String,
    pub username: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GpuKind {
    Discrete,
    Integrated,
    #[default]
    None,
}

impl GpuKind {
    pub fn label(&self) -> &'static str {
        match self {
            GpuKind::Discrete => "Discrete",
            GpuKind::Integrated => "Integrated",
            GpuKind::None => "None",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GpuInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GpuKind,
    pub type_label: String,
    pub vram: u64,
    pub driver_ver: String,
    pub resolution: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GpuResult {
    pub gpus: Vec<GpuInfo>,
}

/// Sidebar figures, refreshed by the background sampler
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RealtimeStats {
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub net_up_speed: u64,
    pub net_down_speed: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NetTrafficInfo {
    pub total_sent: u64,
    pub total_recv: u64,
    pub up_speed: u64,
    pub down_speed: u64,
}

/// Traffic of all processes sharing one name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProcessNetInfo {
    pub name: String,
    pub count: usize,
    pub sent: u64,
    pub recv: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NetTrafficResult {
    pub overview: NetTrafficInfo,
    pub processes: Vec<ProcessNetInfo>,
}

/// Per-minute traffic record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetTrafficRecord {
    pub timestamp: String,
    pub date: String,
    pub sent: u64,
    pub recv: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NetDailyStat {
    pub date: String,
    pub sent: u64,
    pub recv: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NetMonthlyStat {
    pub month: String,
    pub sent: u64,
    pub recv: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NetYearlyStat {
    pub year: String,
    pub sent: u64,
    pub recv: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NetTrafficStats {
    pub daily_stats: Vec<NetDailyStat>,
    pub monthly_stats: Vec<NetMonthlyStat>,
    pub yearly_stats: Vec<NetYearlyStat>,
    pub total_sent: u64,
    pub total_recv: u64,
}

/// One mounted volume
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiskInfo {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LargeFileInfo {
    pub path: String,
    pub size: u64,
    pub ext: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiskScanResult {
    pub files: Vec<LargeFileInfo>,
    pub count: usize,
}

impl DiskScanResult {
    pub fn from_files(files: Vec<LargeFileInfo>) -> Self {
        let count = files.len();
        Self { files, count }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateInfo {
    pub current_version: String,
    pub latest_version: String,
    pub has_update: bool,
    pub release_url: String,
    pub release_notes: String,
}

/// Percentage of `part` in `total`, 0 when `total` is 0
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_result_derives_size_and_count() {
        let items = vec![
            JunkItem {
                path: "/a".to_string(),
                size: 10,
                category: JunkCategory::SystemTemp,
            },
            JunkItem {
                path: "/b".to_string(),
                size: 32,
                category: JunkCategory::SystemTemp,
            },
        ];

        let result = ScanResult::from_items(JunkCategory::SystemTemp, items);
        assert_eq!(result.size, 42);
        assert_eq!(result.count, 2);
        assert_eq!(result.label, JunkCategory::SystemTemp.label());
    }

    #[test]
    fn test_gpu_kind_serializes_lowercase() {
        let info = GpuInfo {
            name: "GeForce RTX 4070".to_string(),
            kind: GpuKind::Discrete,
            type_label: GpuKind::Discrete.label().to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "discrete");
    }

    #[test]
    fn test_percent_of_zero_total() {
        assert_eq!(percent_of(5, 0), 0.0);
        assert_eq!(percent_of(50, 200), 25.0);
    }
}
