//! CLI command implementations

pub mod device_id;
pub mod info;
pub mod init;
pub mod run;
