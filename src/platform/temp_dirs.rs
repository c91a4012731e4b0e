// Platform-specific junk locations
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::junk::{CategoryRule, JunkCategory, ScanRoot};

#[cfg(any(windows, target_os = "linux", target_os = "macos"))]
static LOG_FILES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.log(\.\d+)?(\.gz)?$").unwrap());
#[cfg(target_os = "linux")]
static DEB_PACKAGES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.deb$").unwrap());
#[cfg(windows)]
static THUMBCACHE_DB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(thumbcache|iconcache)_.*\.db$").unwrap());
#[cfg(windows)]
static PREFETCH_FILES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.pf$").unwrap());

/// Build the default rule for every category on the current platform.
///
/// Roots that do not exist are kept; the scanner treats them as empty.
pub fn default_rules() -> Vec<CategoryRule> {
    JunkCategory::ALL
        .iter()
        .map(|category| {
            roots_for(*category)
                .into_iter()
                .fold(CategoryRule::new(*category), CategoryRule::with_root)
        })
        .collect()
}

fn roots_for(category: JunkCategory) -> Vec<ScanRoot> {
    match category {
        JunkCategory::SystemTemp => get_default_temp_directories()
            .into_iter()
            .map(ScanRoot::all_files)
            .collect(),
        JunkCategory::UpdateCache => update_cache_roots(),
        JunkCategory::ThumbnailCache => thumbnail_roots(),
        JunkCategory::SystemLogs => log_roots(),
        JunkCategory::BrowserCache => browser_cache_directories()
            .into_iter()
            .map(ScanRoot::all_files)
            .collect(),
        JunkCategory::RecycleBin => get_recycle_bin_directories()
            .into_iter()
            .map(ScanRoot::all_files)
            .collect(),
        JunkCategory::Prefetch => prefetch_roots(),
    }
}

#[cfg_attr(windows, allow(dead_code))]
fn home_join(parts: &[&str]) -> Option<PathBuf> {
    dirs::home_dir().map(|home| parts.iter().fold(home, |acc, part| acc.join(part)))
}

#[cfg(windows)]
fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).map(PathBuf::from)
}

#[cfg(windows)]
fn windows_dir() -> PathBuf {
    env_path("SystemRoot")
        .or_else(|| env_path("WINDIR"))
        .unwrap_or_else(|| PathBuf::from("C:\\Windows"))
}

/// Get only the default system temporary directories
pub fn get_default_temp_directories() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    #[cfg(windows)]
    {
        // C:\Windows\Temp
        dirs.push(windows_dir().join("Temp"));

        // C:\Users\<username>\AppData\Local\Temp
        if let Some(local) = env_path("LOCALAPPDATA") {
            dirs.push(local.join("Temp"));
        }
        if let Some(temp) = env_path("TEMP") {
            dirs.push(temp);
        }
    }

    #[cfg(unix)]
    {
        dirs.push(PathBuf::from("/tmp"));
        if let Some(tmpdir) = std::env::var_os("TMPDIR") {
            dirs.push(PathBuf::from(tmpdir));
        }
    }

    dedup_paths(dirs)
}

fn update_cache_roots() -> Vec<ScanRoot> {
    let mut roots = Vec::new();

    #[cfg(windows)]
    {
        roots.push(ScanRoot::all_files(
            windows_dir().join("SoftwareDistribution").join("Download"),
        ));
    }

    #[cfg(target_os = "linux")]
    {
        roots.push(ScanRoot::with_regex(
            "/var/cache/apt/archives",
            DEB_PACKAGES.clone(),
        ));
        if let Some(pip) = home_join(&[".cache", "pip"]) {
            roots.push(ScanRoot::all_files(pip));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(brew) = home_join(&["Library", "Caches", "Homebrew"]) {
            roots.push(ScanRoot::all_files(brew));
        }
    }

    roots
}

fn thumbnail_roots() -> Vec<ScanRoot> {
    let mut roots = Vec::new();

    #[cfg(windows)]
    {
        if let Some(local) = env_path("LOCALAPPDATA") {
            roots.push(ScanRoot::with_regex(
                local.join("Microsoft").join("Windows").join("Explorer"),
                THUMBCACHE_DB.clone(),
            ));
        }
    }

    #[cfg(not(windows))]
    {
        if let Some(thumbs) = home_join(&[".cache", "thumbnails"]) {
            roots.push(ScanRoot::all_files(thumbs));
        }
    }

    roots
}

fn log_roots() -> Vec<ScanRoot> {
    let mut roots = Vec::new();

    #[cfg(windows)]
    {
        roots.push(ScanRoot::with_regex(windows_dir().join("Logs"), LOG_FILES.clone()));
    }

    #[cfg(target_os = "linux")]
    {
        roots.push(ScanRoot::with_regex("/var/log", LOG_FILES.clone()));
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(logs) = home_join(&["Library", "Logs"]) {
            roots.push(ScanRoot::with_regex(logs, LOG_FILES.clone()));
        }
    }

    roots
}

fn browser_cache_directories() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    #[cfg(windows)]
    {
        if let Some(local) = env_path("LOCALAPPDATA") {
            dirs.push(local.join("Google\\Chrome\\User Data\\Default\\Cache"));
            dirs.push(local.join("Microsoft\\Edge\\User Data\\Default\\Cache"));
            dirs.push(local.join("Mozilla\\Firefox\\Profiles"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        for parts in [
            &[".cache", "google-chrome", "Default", "Cache"][..],
            &[".cache", "chromium", "Default", "Cache"][..],
            &[".cache", "microsoft-edge", "Default", "Cache"][..],
            &[".cache", "mozilla", "firefox"][..],
        ] {
            if let Some(path) = home_join(parts) {
                dirs.push(path);
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        for parts in [
            &["Library", "Caches", "Google", "Chrome", "Default", "Cache"][..],
            &["Library", "Caches", "Microsoft Edge", "Default", "Cache"][..],
            &["Library", "Caches", "Firefox", "Profiles"][..],
            &["Library", "Caches", "com.apple.Safari"][..],
        ] {
            if let Some(path) = home_join(parts) {
                dirs.push(path);
            }
        }
    }

    dirs
}

/// Get the Recycle Bin / trash directories
pub fn get_recycle_bin_directories() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    #[cfg(windows)]
    {
        let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
        dirs.push(PathBuf::from(format!("{}\\$Recycle.Bin", drive)));
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(trash) = home_join(&[".Trash"]) {
            dirs.push(trash);
        }
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        // Trash entries and their .trashinfo companions go together
        if let Some(files) = home_join(&[".local", "share", "Trash", "files"]) {
            dirs.push(files);
        }
        if let Some(info) = home_join(&[".local", "share", "Trash", "info"]) {
            dirs.push(info);
        }
    }

    dirs
}

fn prefetch_roots() -> Vec<ScanRoot> {
    #[cfg(windows)]
    {
        vec![ScanRoot::with_regex(windows_dir().join("Prefetch"), PREFETCH_FILES.clone())]
    }

    #[cfg(not(windows))]
    {
        Vec::new()
    }
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut unique: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        let normalized = normalize(&path);
        if !unique.iter().any(|p| normalize(p) == normalized) {
            unique.push(path);
        }
    }
    unique
}

fn normalize(path: &Path) -> String {
    let s = path.to_string_lossy();
    let trimmed = s.trim_end_matches(['/', '\\']);
    if cfg!(windows) {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}
