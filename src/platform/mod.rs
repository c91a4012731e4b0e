// Platform-specific code module

pub mod elevation;
pub mod fs;
pub mod gpu;
pub mod memory;
pub mod net_procs;
pub mod process;
pub mod temp_dirs;

pub use elevation::is_elevated;
pub use temp_dirs::get_default_temp_directories;
