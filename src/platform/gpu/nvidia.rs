#[cfg(feature = "nvml")]
use nvml_wrapper::Nvml;

#[cfg_attr(not(feature = "nvml"), allow(unused_imports))]
use super::{GpuAdapter, GpuProvider, GpuVendor};
use crate::error::{Result, SyswardError};

/// NVIDIA adapters via NVML
pub struct NvidiaGpuProvider {
    #[cfg(feature = "nvml")]
    nvml: Nvml,
}

impl NvidiaGpuProvider {
    /// Initialize NVML; fails when the driver library is missing
    pub fn new() -> Result<Self> {
        #[cfg(feature = "nvml")]
        {
            let nvml = Nvml::init().map_err(|e| {
                SyswardError::gpu_not_available(format!("Failed to init NVML: {}", e))
            })?;
            Ok(Self { nvml })
        }
        #[cfg(not(feature = "nvml"))]
        {
            Err(SyswardError::gpu_not_available("NVIDIA GPU support not enabled"))
        }
    }
}

impl GpuProvider for NvidiaGpuProvider {
    fn adapters(&self) -> Result<Vec<GpuAdapter>> {
        #[cfg(feature = "nvml")]
        {
            let count = self.nvml.device_count().map_err(|e| {
                SyswardError::gpu_not_available(format!("Failed to count GPUs: {}", e))
            })?;
            let driver_ver = self.nvml.sys_driver_version().unwrap_or_default();

            let mut adapters = Vec::with_capacity(count as usize);
            for index in 0..count {
                let device = match self.nvml.device_by_index(index) {
                    Ok(device) => device,
                    Err(e) => {
                        log::debug!("Skipping NVIDIA GPU {}: {}", index, e);
                        continue;
                    }
                };

                adapters.push(GpuAdapter {
                    name: device
                        .name()
                        .unwrap_or_else(|_| "Unknown NVIDIA GPU".to_string()),
                    vendor: GpuVendor::Nvidia,
                    vram: device.memory_info().map(|m| m.total).unwrap_or(0),
                    driver_ver: driver_ver.clone(),
                    resolution: String::new(),
                });
            }
            Ok(adapters)
        }
        #[cfg(not(feature = "nvml"))]
        {
            Err(SyswardError::gpu_not_available("NVIDIA GPU support not enabled"))
        }
    }
}
