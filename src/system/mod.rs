pub mod collector;
pub mod memory;
pub mod platform;
pub mod process;
pub mod snapshot;
