//! Test-only helpers for building scratch runtime source trees.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::types::PatchSet;

/// Temporary source tree whose files contain every anchor a patch set needs.
pub struct SourceTree {
    dir: TempDir,
}

impl SourceTree {
    /// Write one file per patched path, each holding all of its anchors
    /// surrounded by unrelated lines.
    pub fn for_patch_set(patch_set: &PatchSet) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp source tree")?;
        for (file, edits) in patch_set {
            let mut contents = format!("/* {file} */\n");
            for (search, _) in edits {
                contents.push_str(search);
                contents.push_str("\n/* filler */\n");
            }
            write_file(dir.path(), file, &contents)?;
        }
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, file: &str) -> PathBuf {
        self.dir.path().join(file)
    }

    pub fn read(&self, file: &str) -> Result<String> {
        let path = self.file(file);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }

    pub fn write(&self, file: &str, contents: &str) -> Result<()> {
        write_file(self.dir.path(), file, contents)
    }
}

fn write_file(root: &Path, file: &str, contents: &str) -> Result<()> {
    let path = root.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
}
