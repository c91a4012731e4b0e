//! Adapter discovery through `/sys/class/drm`.

use std::fs;
use std::path::{Path, PathBuf};

use super::{format_resolution, GpuAdapter, GpuProvider, GpuVendor};
use crate::error::Result;

const DRM_ROOT: &str = "/sys/class/drm";

// APUs expose only a small carve-out of system memory as VRAM
const APU_VRAM_LIMIT: u64 = 2 * 1024 * 1024 * 1024;

/// Reads `cardN` entries and their connectors from the DRM sysfs tree
pub struct DrmGpuProvider {
    root: PathBuf,
}

impl Default for DrmGpuProvider {
    fn default() -> Self {
        Self::with_root(DRM_ROOT)
    }
}

impl DrmGpuProvider {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_adapter(&self, card: &str) -> Option<GpuAdapter> {
        let device = self.root.join(card).join("device");
        let vendor_id = read_trimmed(&device.join("vendor")).and_then(|s| parse_hex_id(&s))?;
        let device_id = read_trimmed(&device.join("device"))
            .and_then(|s| parse_hex_id(&s))
            .unwrap_or(0);
        let vendor = GpuVendor::from_pci_id(vendor_id);

        let vram = read_trimmed(&device.join("mem_info_vram_total"))
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        let name = read_trimmed(&device.join("product_name"))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback_name(vendor, vendor_id, device_id, vram));

        let driver = fs::read_link(device.join("driver"))
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();
        let driver_ver = if driver.is_empty() {
            String::new()
        } else {
            read_trimmed(Path::new(&format!("/sys/module/{}/version", driver))).unwrap_or(driver)
        };

        Some(GpuAdapter {
            name,
            vendor,
            vram,
            driver_ver,
            resolution: self.connected_resolution(card).unwrap_or_default(),
        })
    }

    /// Preferred mode of the first connected connector of `card`
    fn connected_resolution(&self, card: &str) -> Option<String> {
        let prefix = format!("{}-", card);
        let mut connectors: Vec<PathBuf> = fs::read_dir(&self.root)
            .ok()?
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().starts_with(&prefix))
            .map(|e| e.path())
            .collect();
        connectors.sort();

        connectors.into_iter().find_map(|connector| {
            let status = read_trimmed(&connector.join("status"))?;
            if status != "connected" {
                return None;
            }
            let modes = fs::read_to_string(connector.join("modes")).ok()?;
            let (w, h) = modes.lines().find_map(parse_mode)?;
            Some(format_resolution(w, h))
        })
    }
}

impl GpuProvider for DrmGpuProvider {
    fn adapters(&self) -> Result<Vec<GpuAdapter>> {
        let mut cards: Vec<String> = fs::read_dir(&self.root)?
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| is_card_name(name))
            .collect();
        cards.sort();

        Ok(cards.iter().filter_map(|card| self.read_adapter(card)).collect())
    }
}

fn is_card_name(name: &str) -> bool {
    name.strip_prefix("card")
        .map(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn parse_hex_id(s: &str) -> Option<u16> {
    u16::from_str_radix(s.trim().trim_start_matches("0x"), 16).ok()
}

fn parse_mode(line: &str) -> Option<(u32, u32)> {
    let mode = line.trim();
    let (w, h) = mode.split_once('x')?;
    // Interlaced modes carry an "i" suffix
    let h = h.trim_end_matches(|c: char| !c.is_ascii_digit());
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn fallback_name(vendor: GpuVendor, vendor_id: u16, device_id: u16, vram: u64) -> String {
    match vendor {
        GpuVendor::Nvidia => format!("NVIDIA GPU [{:04x}:{:04x}]", vendor_id, device_id),
        GpuVendor::Amd if vram > 0 && vram < APU_VRAM_LIMIT => "AMD Radeon Graphics".to_string(),
        GpuVendor::Amd => format!("AMD Radeon [{:04x}:{:04x}]", vendor_id, device_id),
        GpuVendor::Intel => "Intel(R) UHD Graphics".to_string(),
        GpuVendor::Other => format!("Display adapter [{:04x}:{:04x}]", vendor_id, device_id),
    }
}
