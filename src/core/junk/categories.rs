//! Closed enumeration of junk categories and their scan rules.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyswardError};

/// Bumped whenever a category is added, removed or its rule changes meaning.
pub const CATEGORY_SET_VERSION: u32 = 1;

/// A named class of disposable files, scanned and cleaned as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JunkCategory {
    SystemTemp,
    UpdateCache,
    ThumbnailCache,
    SystemLogs,
    BrowserCache,
    RecycleBin,
    Prefetch,
}

impl JunkCategory {
    /// Every category, in the order scan results are returned.
    pub const ALL: [JunkCategory; 7] = [
        JunkCategory::SystemTemp,
        JunkCategory::UpdateCache,
        JunkCategory::ThumbnailCache,
        JunkCategory::SystemLogs,
        JunkCategory::BrowserCache,
        JunkCategory::RecycleBin,
        JunkCategory::Prefetch,
    ];

    /// Stable identifier used by callers to select categories for cleaning.
    pub fn id(&self) -> &'static str {
        match self {
            JunkCategory::SystemTemp => "system_temp",
            JunkCategory::UpdateCache => "update_cache",
            JunkCategory::ThumbnailCache => "thumbnail_cache",
            JunkCategory::SystemLogs => "system_logs",
            JunkCategory::BrowserCache => "browser_cache",
            JunkCategory::RecycleBin => "recycle_bin",
            JunkCategory::Prefetch => "prefetch",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JunkCategory::SystemTemp => "System temp files",
            JunkCategory::UpdateCache => "Update & package caches",
            JunkCategory::ThumbnailCache => "Thumbnail cache",
            JunkCategory::SystemLogs => "Log files",
            JunkCategory::BrowserCache => "Browser caches",
            JunkCategory::RecycleBin => "Recycle bin",
            JunkCategory::Prefetch => "Prefetch files",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id.trim())
    }
}

impl fmt::Display for JunkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for JunkCategory {
    type Err = SyswardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_id(s).ok_or_else(|| SyswardError::not_found(format!("unknown junk category '{}'", s)))
    }
}

/// One directory walked for a category, optionally filtered by file name.
#[derive(Debug, Clone)]
pub struct ScanRoot {
    pub path: PathBuf,
    pub file_pattern: Option<Regex>,
}

impl ScanRoot {
    /// Every regular file below `path` belongs to the category.
    pub fn all_files(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_pattern: None,
        }
    }

    /// Only files whose name matches `pattern` belong to the category.
    pub fn matching(path: impl Into<PathBuf>, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| SyswardError::config(format!("invalid file pattern '{}': {}", pattern, e)))?;
        Ok(Self {
            path: path.into(),
            file_pattern: Some(regex),
        })
    }

    pub fn with_regex(path: impl Into<PathBuf>, regex: Regex) -> Self {
        Self {
            path: path.into(),
            file_pattern: Some(regex),
        }
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        self.file_pattern
            .as_ref()
            .map(|re| re.is_match(file_name))
            .unwrap_or(true)
    }
}

/// Scan rule for one category: the set of roots it owns.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: JunkCategory,
    pub roots: Vec<ScanRoot>,
}

impl CategoryRule {
    pub fn new(category: JunkCategory) -> Self {
        Self {
            category,
            roots: Vec::new(),
        }
    }

    pub fn with_root(mut self, root: ScanRoot) -> Self {
        if !self.roots.iter().any(|r| same_path(&r.path, &root.path)) {
            self.roots.push(root);
        }
        self
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    if cfg!(windows) {
        a.to_string_lossy().eq_ignore_ascii_case(&b.to_string_lossy())
    } else {
        a == b
    }
}
