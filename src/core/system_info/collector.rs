use log::debug;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

use crate::core::disk_inventory::primary_disk;
use crate::core::system_info::os;
use crate::core::system_info::public_ip::PublicIpResolver;
use crate::core::types::{percent_of, SystemInfo};

/// Collect the system overview.
///
/// `cpu_hint` is a recent global CPU reading; without one the CPU is sampled
/// over the minimum update interval. The public IP lookup is best effort and
/// never fails the call.
pub fn collect_system_info(ip: &PublicIpResolver, cpu_hint: Option<f64>) -> SystemInfo {
    let refresh = RefreshKind::nothing()
        .with_memory(MemoryRefreshKind::nothing().with_ram())
        .with_cpu(CpuRefreshKind::nothing().with_cpu_usage());
    let mut sys = System::new_with_specifics(refresh);

    let cpu_usage = match cpu_hint {
        Some(cpu) => cpu,
        None => {
            std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            sys.refresh_cpu_usage();
            f64::from(sys.global_cpu_usage())
        }
    };

    let mem_total = sys.total_memory();
    let mem_used = sys.used_memory();

    let disks = Disks::new_with_refreshed_list();
    let (disk_total, disk_used) = match primary_disk(&disks) {
        Some(disk) => {
            let total = disk.total_space();
            (total, total.saturating_sub(disk.available_space()))
        }
        None => {
            debug!("No primary disk found");
            (0, 0)
        }
    };

    let details = ip.resolve();

    SystemInfo {
        os: os::describe(),
        hostname: os::hostname(),
        cpu_usage,
        mem_total,
        mem_used,
        mem_percent: percent_of(mem_used, mem_total),
        disk_total,
        disk_used,
        disk_percent: percent_of(disk_used, disk_total),
        public_ip: details.ip,
        ip_location: details.location,
        ip_operator: details.operator,
    }
}
