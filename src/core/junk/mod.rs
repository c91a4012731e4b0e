//! Junk scanner
//!
//! Walks every category of the closed [`JunkCategory`] set and reports the
//! disposable files it owns. Categories are scanned in parallel; each produces
//! its own [`ScanResult`], so one category never sees another's files.
//!
//! # Examples
//!
//! ```no_run
//! use sysward::core::junk::JunkScanner;
//!
//! let scanner = JunkScanner::new();
//! for result in scanner.scan() {
//!     println!("{}: {} files, {} bytes", result.label, result.count, result.size);
//! }
//! ```

mod categories;

pub use categories::{CategoryRule, JunkCategory, ScanRoot, CATEGORY_SET_VERSION};

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::debug;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::cancel::CancelToken;
use crate::core::types::{JunkItem, ScanResult};
use crate::platform::temp_dirs;

/// Scanner over the category rules of the current platform
pub struct JunkScanner {
    rules: Vec<CategoryRule>,
}

impl Default for JunkScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl JunkScanner {
    /// Create a scanner with the platform's default locations
    pub fn new() -> Self {
        Self::with_rules(temp_dirs::default_rules())
    }

    /// Create a scanner over explicit rules.
    ///
    /// Categories without a rule scan as empty.
    pub fn with_rules(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn rule(&self, category: JunkCategory) -> Option<&CategoryRule> {
        self.rules.iter().find(|rule| rule.category == category)
    }

    /// Scan all categories, returned in enumeration order
    pub fn scan(&self) -> Vec<ScanResult> {
        JunkCategory::ALL
            .par_iter()
            .map(|category| self.scan_category(*category))
            .collect()
    }

    pub fn scan_category(&self, category: JunkCategory) -> ScanResult {
        self.scan_category_with_cancel(category, &CancelToken::new())
    }

    /// Scan one category, stopping early once `cancel` is set
    pub fn scan_category_with_cancel(&self, category: JunkCategory, cancel: &CancelToken) -> ScanResult {
        let Some(rule) = self.rule(category) else {
            return ScanResult::empty(category);
        };

        // Keyed by path: sorted output, and nested roots never double count
        let mut found: BTreeMap<PathBuf, u64> = BTreeMap::new();

        for root in &rule.roots {
            if cancel.is_cancelled() {
                break;
            }
            collect_root(root, &mut found, cancel);
        }

        let items = found
            .into_iter()
            .map(|(path, size)| JunkItem {
                path: path.to_string_lossy().into_owned(),
                size,
                category,
            })
            .collect();

        ScanResult::from_items(category, items)
    }
}

fn collect_root(root: &ScanRoot, found: &mut BTreeMap<PathBuf, u64>, cancel: &CancelToken) {
    if !root.path.is_dir() {
        return;
    }

    let walker = WalkDir::new(&root.path).follow_links(false).min_depth(1);

    for entry in walker {
        if cancel.is_cancelled() {
            return;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {}", root.path.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !root.accepts(&name) {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => {
                found.insert(entry.into_path(), metadata.len());
            }
            Err(e) => debug!("Cannot stat {}: {}", entry.path().display(), e),
        }
    }
}
