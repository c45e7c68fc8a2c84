//! CLI command implementations

pub mod anonymize;
pub mod init;
pub mod serve;
pub mod validate;
