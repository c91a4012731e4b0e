pub mod collector;
pub mod gpu;
pub mod os;
pub mod public_ip;

pub use collector::collect_system_info;
pub use gpu::classify_gpu;
pub use public_ip::{IpDetails, PublicIpResolver};
