pub mod config;
pub mod format;
pub mod session;
pub mod system;
pub mod ui;
