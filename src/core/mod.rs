// Core engine logic

pub mod cancel;
pub mod cleaner;
pub mod config;
pub mod disk_inventory;
pub mod history;
pub mod junk;
pub mod memory_optimizer;
pub mod process_monitor;
pub mod system_info;
pub mod system_monitor;
pub mod types;
pub mod update;

// Re-export commonly used items
pub use cancel::CancelToken;
pub use cleaner::JunkCleaner;
pub use config::EngineConfig;
pub use history::{HistorySettings, HistoryStore};
pub use junk::{JunkCategory, JunkScanner};
pub use memory_optimizer::MemoryOptimizer;
