//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Validation error - one or more charts do not resolve
pub const VALIDATION_ERROR: i32 = 2;

/// Chart error - chart not found or dependencies could not be updated
pub const CHART_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Repository error - listing, adding or refreshing repositories failed
pub const REPOSITORY_ERROR: i32 = 6;

/// Usage error - invalid desired state or arguments (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
