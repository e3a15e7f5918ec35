//! I/O helpers for patcher commands.

pub mod apply;
pub mod atomic;
pub mod config;
