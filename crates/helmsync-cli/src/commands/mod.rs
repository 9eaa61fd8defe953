//! CLI commands

pub mod repos;
pub mod validate;
pub mod show;
pub mod deps;
pub mod check_version;
