//! Deterministic, pure patch selection.
//!
//! Core modules must be free of I/O side effects. Given a target, a
//! dependency library directory and a runtime version they return the same
//! patch set every time, and can be called from any thread.

pub mod c_sources;
pub mod linker;
pub mod literals;
pub mod makefile;
pub mod os_family;
pub mod patch_map;
pub mod types;
pub mod version;
