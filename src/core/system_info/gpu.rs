use crate::core::types::{GpuInfo, GpuKind, GpuResult};
use crate::platform::gpu::{detect_adapters, GpuAdapter};

// Checked first: several integrated parts carry a discrete vendor's brand.
const INTEGRATED_KEYWORDS: &[&str] = &[
    "intel hd",
    "intel uhd",
    "intel iris",
    "intel(r) hd",
    "intel(r) uhd",
    "intel(r) iris",
    "vega",
    "radeon graphics",
    "radeon(tm) graphics",
    "microsoft basic",
    "remote desktop",
];

const DISCRETE_KEYWORDS: &[&str] = &[
    "nvidia", "geforce", "rtx", "gtx", "quadro", "tesla", "radeon", "rx ", "rx5", "rx6", "rx7", "arc ",
    "arc a",
];

/// Classify an adapter by its marketing name; unknown names count as integrated
pub fn classify_gpu(name: &str) -> GpuKind {
    let lower = name.to_lowercase();

    if INTEGRATED_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return GpuKind::Integrated;
    }
    if DISCRETE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return GpuKind::Discrete;
    }
    GpuKind::Integrated
}

pub fn collect() -> GpuResult {
    GpuResult {
        gpus: detect_adapters().into_iter().map(to_info).collect(),
    }
}

fn to_info(adapter: GpuAdapter) -> GpuInfo {
    let kind = classify_gpu(&adapter.name);
    GpuInfo {
        name: adapter.name,
        kind,
        type_label: kind.label().to_string(),
        vram: adapter.vram,
        driver_ver: adapter.driver_ver,
        resolution: adapter.resolution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrated_checked_before_discrete() {
        assert_eq!(classify_gpu("AMD Radeon(TM) Graphics"), GpuKind::Integrated);
        assert_eq!(classify_gpu("AMD Radeon Vega 8"), GpuKind::Integrated);
        assert_eq!(classify_gpu("Intel(R) UHD Graphics 770"), GpuKind::Integrated);
    }

    #[test]
    fn test_discrete_names() {
        assert_eq!(classify_gpu("NVIDIA GeForce RTX 4070"), GpuKind::Discrete);
        assert_eq!(classify_gpu("AMD Radeon RX 7900 XTX"), GpuKind::Discrete);
        assert_eq!(classify_gpu("Intel(R) Arc A770 Graphics"), GpuKind::Discrete);
    }

    #[test]
    fn test_unknown_defaults_to_integrated() {
        assert_eq!(classify_gpu("Mystery Display Adapter"), GpuKind::Integrated);
    }
}
