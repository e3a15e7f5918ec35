//! Stable exit codes for patcher CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid configuration, OS identifier or runtime version.
pub const INVALID: i32 = 1;
/// Patch application failed; the source tree was left untouched.
pub const PATCH_FAILED: i32 = 2;
