use sysinfo::System;

/// "Name Version (arch)", e.g. "Ubuntu 24.04 (x86_64)"
pub fn describe() -> String {
    let name = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
    let arch = std::env::consts::ARCH;

    match System::os_version() {
        Some(version) if !version.is_empty() => format!("{} {} ({})", name, version, arch),
        _ => format!("{} ({})", name, arch),
    }
}

pub fn hostname() -> String {
    System::host_name().unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_includes_arch() {
        assert!(describe().contains(std::env::consts::ARCH));
    }
}
