//! Patcher configuration stored in `patcher.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::os_family::Target;
use crate::core::version::RuntimeVersion;

pub const DEFAULT_CONFIG_FILE: &str = "patcher.toml";

/// Patcher configuration (TOML).
///
/// Every field may be overridden on the command line. Missing fields default
/// to a generic Unix target building the newest supported runtime.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatcherConfig {
    /// Free-form OS identifier (e.g. `linux-gnu`, `x86_64-linux-musl`, `msys`).
    pub ostype: String,

    /// Directory holding the static dependency libraries; passed verbatim to
    /// the linker flags.
    pub deps_lib_dir: PathBuf,

    /// Runtime version, `MAJOR.MINOR[.PATCH]`.
    pub ruby_version: String,

    /// Root of the extracted runtime source tree.
    pub source_dir: PathBuf,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            ostype: "linux-gnu".to_string(),
            deps_lib_dir: PathBuf::from("deps/lib"),
            ruby_version: "3.3.7".to_string(),
            source_dir: PathBuf::from("."),
        }
    }
}

impl PatcherConfig {
    /// Only the runtime version can be invalid; any `ostype`, even an empty
    /// one, resolves to some OS family.
    pub fn validate(&self) -> Result<()> {
        self.runtime_version()?;
        Ok(())
    }

    pub fn target(&self) -> Target {
        Target::new(self.ostype.trim())
    }

    pub fn runtime_version(&self) -> Result<RuntimeVersion> {
        self.ruby_version
            .parse()
            .with_context(|| "invalid ruby_version in configuration")
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `PatcherConfig::default()`.
pub fn load_config(path: &Path) -> Result<PatcherConfig> {
    if !path.exists() {
        return Ok(PatcherConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PatcherConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
