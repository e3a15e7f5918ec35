//! Resolution of configuration plus command-line overrides into one
//! patching request, and the commands that act on it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::os_family::Target;
use crate::core::patch_map;
use crate::core::types::PatchSet;
use crate::core::version::RuntimeVersion;
use crate::io::apply::{ApplyReport, apply_patch_set};
use crate::io::config::{PatcherConfig, load_config};

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ostype: Option<String>,
    pub deps_lib_dir: Option<PathBuf>,
    pub ruby_version: Option<String>,
    pub source_dir: Option<PathBuf>,
}

/// Fully validated inputs for one patching run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    pub target: Target,
    pub deps_lib_dir: PathBuf,
    pub version: RuntimeVersion,
    pub source_dir: PathBuf,
}

impl PatchRequest {
    pub fn resolve(mut cfg: PatcherConfig, overrides: Overrides) -> Result<Self> {
        if let Some(ostype) = overrides.ostype {
            cfg.ostype = ostype;
        }
        if let Some(dir) = overrides.deps_lib_dir {
            cfg.deps_lib_dir = dir;
        }
        if let Some(version) = overrides.ruby_version {
            cfg.ruby_version = version;
        }
        if let Some(dir) = overrides.source_dir {
            cfg.source_dir = dir;
        }
        cfg.validate()?;
        let request = Self {
            target: cfg.target(),
            deps_lib_dir: cfg.deps_lib_dir.clone(),
            version: cfg.runtime_version()?,
            source_dir: cfg.source_dir.clone(),
        };
        debug!(
            ostype = %request.target.ostype,
            family = %request.target.family,
            version = %request.version,
            "resolved request"
        );
        Ok(request)
    }

    /// Load `config_path` (missing file means defaults) and apply overrides.
    pub fn load(config_path: &Path, overrides: Overrides) -> Result<Self> {
        let cfg = load_config(config_path).context("load patcher config")?;
        Self::resolve(cfg, overrides)
    }

    pub fn patch_set(&self) -> PatchSet {
        patch_map::build(&self.target, &self.deps_lib_dir, &self.version)
    }

    pub fn apply(&self) -> Result<ApplyReport> {
        apply_patch_set(&self.source_dir, &self.patch_set())
            .with_context(|| format!("patch sources in {}", self.source_dir.display()))
    }
}
