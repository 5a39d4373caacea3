//! CLI command implementations

pub mod backup;
pub mod init;
pub mod validate;
