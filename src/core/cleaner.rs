//! Junk cleaner
//!
//! Deletes the files of a caller-selected subset of junk categories. Each
//! category is re-scanned immediately before deletion, so only files that
//! still match a category rule are ever removed.
//!
//! # Examples
//!
//! ```no_run
//! use sysward::core::cleaner::JunkCleaner;
//! use sysward::core::junk::JunkScanner;
//!
//! let cleaner = JunkCleaner::new(JunkScanner::new());
//! let categories = JunkCleaner::resolve_categories(&["system_temp".to_string()]);
//! let result = cleaner.clean(&categories, |processed, total| {
//!     println!("Progress: {}/{}", processed, total);
//! });
//! println!("Freed {} bytes", result.freed_size);
//! ```

use std::collections::HashSet;
use std::fs;

use log::{debug, warn};

use crate::core::cancel::CancelToken;
use crate::core::junk::{JunkCategory, JunkScanner};
use crate::core::types::{CleanResult, JunkItem};

/// Deletes junk files category by category
pub struct JunkCleaner {
    scanner: JunkScanner,
    cancel_flag: CancelToken,
}

impl JunkCleaner {
    pub fn new(scanner: JunkScanner) -> Self {
        Self {
            scanner,
            cancel_flag: CancelToken::new(),
        }
    }

    /// Token that stops an in-flight clean; items not yet attempted are not counted.
    ///
    /// Each [`JunkCleaner::clean`] clears it on entry, so a cancellation only
    /// affects the run it interrupts.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel_flag.clone()
    }

    pub fn scanner(&self) -> &JunkScanner {
        &self.scanner
    }

    /// Map caller ids onto known categories.
    ///
    /// Unknown ids are dropped with a warning and duplicates collapse, keeping
    /// first-seen order.
    pub fn resolve_categories(ids: &[String]) -> Vec<JunkCategory> {
        let mut categories = Vec::new();
        for id in ids {
            match JunkCategory::from_id(id) {
                Some(category) if !categories.contains(&category) => categories.push(category),
                Some(_) => {}
                None => warn!("Ignoring unknown junk category '{}'", id),
            }
        }
        categories
    }

    /// Clean the given categories with progress callback
    ///
    /// # Arguments
    /// * `categories` - Categories to clean, already resolved
    /// * `on_progress` - Called with (processed, total) after each attempted file
    ///
    /// A file owned by more than one selected category is attempted once.
    pub fn clean<F>(&self, categories: &[JunkCategory], on_progress: F) -> CleanResult
    where
        F: Fn(usize, usize),
    {
        self.cancel_flag.reset();

        let mut seen = HashSet::new();
        let items: Vec<JunkItem> = categories
            .iter()
            .flat_map(|category| {
                self.scanner
                    .scan_category_with_cancel(*category, &self.cancel_flag)
                    .items
            })
            .filter(|item| seen.insert(item.path.clone()))
            .collect();

        let total = items.len();
        let mut result = CleanResult::default();

        for item in &items {
            if self.cancel_flag.is_cancelled() {
                debug!("Clean cancelled after {} of {} files", result.attempted(), total);
                break;
            }

            match fs::remove_file(&item.path) {
                Ok(()) => {
                    result.cleaned_count += 1;
                    result.freed_size += item.size;
                }
                Err(e) => {
                    debug!("Failed to delete {}: {}", item.path, e);
                    result.failed_count += 1;
                }
            }

            on_progress(result.attempted(), total);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::junk::{CategoryRule, ScanRoot};
    use tempfile::TempDir;

    #[test]
    fn test_resolve_categories_drops_unknown_and_duplicates() {
        let ids = vec![
            "system_logs".to_string(),
            "bogus".to_string(),
            "system_logs".to_string(),
            "prefetch".to_string(),
        ];
        let categories = JunkCleaner::resolve_categories(&ids);
        assert_eq!(categories, vec![JunkCategory::SystemLogs, JunkCategory::Prefetch]);
    }

    #[test]
    fn test_clean_nothing_is_zero() {
        let cleaner = JunkCleaner::new(JunkScanner::with_rules(Vec::new()));
        let result = cleaner.clean(&[], |_, _| {});
        assert_eq!(result, CleanResult::default());
    }

    #[test]
    fn test_cancellation_does_not_outlive_its_run() {
        let dir = TempDir::new().unwrap();
        let scanner = JunkScanner::with_rules(vec![
            CategoryRule::new(JunkCategory::SystemTemp).with_root(ScanRoot::all_files(dir.path())),
        ]);
        let cleaner = JunkCleaner::new(scanner);

        cleaner.cancel_token().cancel();
        fs::write(dir.path().join("later.tmp"), b"later").unwrap();
        let result = cleaner.clean(&[JunkCategory::SystemTemp], |_, _| {});

        assert_eq!(result.cleaned_count, 1);
        assert!(!cleaner.cancel_token().is_cancelled());
        assert!(!dir.path().join("later.tmp").exists());
    }

    #[test]
    fn test_shared_file_is_attempted_once() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("shared.log"), vec![0u8; 64]).unwrap();
        let scanner = JunkScanner::with_rules(vec![
            CategoryRule::new(JunkCategory::UpdateCache).with_root(ScanRoot::all_files(dir.path())),
            CategoryRule::new(JunkCategory::SystemLogs).with_root(ScanRoot::all_files(dir.path())),
        ]);
        let cleaner = JunkCleaner::new(scanner);

        let result = cleaner.clean(&[JunkCategory::UpdateCache, JunkCategory::SystemLogs], |_, _| {});
        assert_eq!(result.cleaned_count, 1);
        assert_eq!(result.failed_count, 0);
        assert_eq!(result.freed_size, 64);
    }
}
