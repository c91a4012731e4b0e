//! GPU-specific platform code.
//!
//! Enumerates display adapters from whichever sources the platform offers:
//! NVML for NVIDIA cards (behind the `nvml` feature) and the DRM sysfs tree
//! on Linux.

#[cfg(target_os = "linux")]
mod drm;
mod nvidia;

#[cfg(target_os = "linux")]
pub use drm::DrmGpuProvider;
pub use nvidia::NvidiaGpuProvider;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
    Other,
}

impl GpuVendor {
    pub fn from_pci_id(id: u16) -> Self {
        match id {
            0x10de => GpuVendor::Nvidia,
            0x1002 | 0x1022 => GpuVendor::Amd,
            0x8086 => GpuVendor::Intel,
            _ => GpuVendor::Other,
        }
    }
}

/// One display adapter as reported by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct GpuAdapter {
    pub name: String,
    pub vendor: GpuVendor,
    /// Dedicated memory in bytes, 0 when unknown
    pub vram: u64,
    pub driver_ver: String,
    /// "W x H" of the attached display, empty when unknown
    pub resolution: String,
}

/// A source of adapter descriptions
pub trait GpuProvider: Send {
    fn adapters(&self) -> Result<Vec<GpuAdapter>>;
}

/// Every adapter visible to any provider.
///
/// NVML wins over DRM for NVIDIA cards since it knows the model and VRAM.
pub fn detect_adapters() -> Vec<GpuAdapter> {
    let mut adapters = match NvidiaGpuProvider::new().and_then(|p| p.adapters()) {
        Ok(found) => found,
        Err(e) => {
            log::debug!("NVML unavailable: {}", e);
            Vec::new()
        }
    };

    #[cfg(target_os = "linux")]
    {
        let have_nvml = !adapters.is_empty();
        match DrmGpuProvider::default().adapters() {
            Ok(found) => {
                let fallback_resolution = found
                    .iter()
                    .find(|a| !a.resolution.is_empty())
                    .map(|a| a.resolution.clone());

                adapters.extend(
                    found
                        .into_iter()
                        .filter(|a| !(have_nvml && a.vendor == GpuVendor::Nvidia)),
                );

                // NVML has no notion of the display mode
                if let Some(resolution) = fallback_resolution {
                    for adapter in adapters.iter_mut().filter(|a| a.resolution.is_empty()) {
                        adapter.resolution = resolution.clone();
                    }
                }
            }
            Err(e) => log::debug!("DRM enumeration failed: {}", e),
        }
    }

    adapters
}

/// Format a display mode as "W x H"
pub fn format_resolution(width: u32, height: u32) -> String {
    format!("{} x {}", width, height)
}
