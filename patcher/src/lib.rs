//! Patch selection and composition for statically packaging a Ruby runtime.
//!
//! Before the runtime sources are compiled, a set of literal search/replace
//! edits is applied to specific files. Which edits apply depends on the OS
//! family and the runtime version. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic selection of the patch set. No I/O,
//!   safe to call from any thread.
//! - **[`io`]**: Side-effecting operations (configuration, applying a patch
//!   set to a source tree).
//!
//! [`request`] coordinates both to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod request;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::os_family::{OsFamily, Target};
pub use crate::core::patch_map::{build, build_for, build_with};
pub use crate::core::types::{EditSet, PatchSet};
pub use crate::core::version::{RuntimeVersion, VersionError};
