//! CLI 子命令

pub mod export;
pub mod scan;
pub mod status;
pub mod watch;
