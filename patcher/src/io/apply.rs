//! Applies a composed patch set to an extracted runtime source tree.
//!
//! Application is all-or-nothing: every file is patched in memory first and
//! nothing touches the disk unless all of them succeed. A failed write rolls
//! back the files already written in the same run.
//!
//! Each patched file keeps its pristine text in a sibling `<file>.old`. When
//! that backup exists it is the input for patching, so re-applying a patch
//! set (or a different one after a target change) starts from clean sources.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, instrument, warn};

use crate::core::types::{EditSet, PatchSet};
use crate::io::atomic::write_atomic;

/// Suffix of the pristine backup kept next to each patched file.
pub const BACKUP_SUFFIX: &str = ".old";

/// One file that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedFile {
    pub file: String,
    pub edits: usize,
}

/// Summary of a successful application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub files: Vec<PatchedFile>,
}

impl ApplyReport {
    pub fn total_edits(&self) -> usize {
        self.files.iter().map(|file| file.edits).sum()
    }
}

struct Staged {
    path: PathBuf,
    backup: PathBuf,
    pristine: String,
    had_backup: bool,
    /// On-disk text before this run, `None` if the file was absent.
    previous: Option<String>,
    patched: String,
}

/// Path of the pristine backup for `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

#[instrument(skip_all, fields(root = %source_root.display(), files = patch_set.len()))]
pub fn apply_patch_set(source_root: &Path, patch_set: &PatchSet) -> Result<ApplyReport> {
    let mut staged = Vec::with_capacity(patch_set.len());
    let mut report = ApplyReport::default();

    for (file, edits) in patch_set {
        let entry =
            stage_file(source_root, file, edits).with_context(|| format!("patch {file}"))?;
        debug!(file = %file, edits = edits.len(), restored = entry.had_backup, "staged");
        report.files.push(PatchedFile {
            file: file.clone(),
            edits: edits.len(),
        });
        staged.push(entry);
    }

    let mut committed = Vec::with_capacity(staged.len());
    let mut created_backups = Vec::new();
    if let Err(err) = commit(&staged, &mut committed, &mut created_backups) {
        rollback(&committed, &created_backups);
        return Err(err.context("patch set rolled back"));
    }

    info!(
        files = report.files.len(),
        edits = report.total_edits(),
        "patch set applied"
    );
    Ok(report)
}

fn stage_file(source_root: &Path, file: &str, edits: &EditSet) -> Result<Staged> {
    let path = source_root.join(file);
    let backup = backup_path(&path);
    let had_backup = backup.is_file();
    let source = if had_backup { &backup } else { &path };
    if !source.is_file() {
        bail!("file does not exist at {}", path.display());
    }
    let pristine =
        fs::read_to_string(source).with_context(|| format!("read {}", source.display()))?;
    let previous = if !had_backup {
        Some(pristine.clone())
    } else if path.is_file() {
        Some(fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?)
    } else {
        None
    };
    let patched = apply_edits(&pristine, edits)?;
    Ok(Staged {
        path,
        backup,
        pristine,
        had_backup,
        previous,
        patched,
    })
}

fn commit<'a>(
    staged: &'a [Staged],
    committed: &mut Vec<&'a Staged>,
    created_backups: &mut Vec<&'a Path>,
) -> Result<()> {
    for file in staged {
        if !file.had_backup {
            write_atomic(&file.backup, &file.pristine)?;
            created_backups.push(&file.backup);
        }
        write_atomic(&file.path, &file.patched)?;
        committed.push(file);
    }
    Ok(())
}

/// Best effort: put committed files back and drop backups created by this run.
fn rollback(committed: &[&Staged], created_backups: &[&Path]) {
    for file in committed {
        let restored = match &file.previous {
            Some(text) => fs::write(&file.path, text),
            None => fs::remove_file(&file.path),
        };
        if let Err(err) = restored {
            warn!(path = %file.path.display(), error = %err, "rollback failed");
        }
    }
    for backup in created_backups {
        if let Err(err) = fs::remove_file(backup) {
            warn!(path = %backup.display(), error = %err, "remove backup failed");
        }
    }
}

/// Replace the first literal occurrence of each anchor, in key order, on the
/// progressively edited text. A missing anchor is an error.
pub fn apply_edits(contents: &str, edits: &EditSet) -> Result<String> {
    let mut out = contents.to_string();
    for (search, replace) in edits {
        if !out.contains(search.as_str()) {
            bail!("anchor not found: {search:?}");
        }
        out = out.replacen(search.as_str(), replace, 1);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, file: &str, contents: &str) {
        let path = root.join(file);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write");
    }

    fn read(root: &Path, file: &str) -> String {
        fs::read_to_string(root.join(file)).expect("read")
    }

    #[test]
    fn apply_edits_replaces_first_occurrence_only() {
        let edits = EditSet::one("foo", "bar");
        assert_eq!(apply_edits("foo foo", &edits).expect("apply"), "bar foo");
    }

    #[test]
    fn apply_edits_rejects_missing_anchor() {
        let err = apply_edits("nothing here", &EditSet::one("foo", "bar")).unwrap_err();
        assert!(err.to_string().contains("anchor not found"));
    }

    #[test]
    fn apply_writes_patch_and_backup() {
        let temp = tempfile::tempdir().expect("tempdir");
        write(temp.path(), "util.c", "a\n#ifndef S_ISDIR\nb\n");
        let set = PatchSet::one("util.c", EditSet::one("#ifndef S_ISDIR", "X\n#ifndef S_ISDIR"));

        let report = apply_patch_set(temp.path(), &set).expect("apply");

        assert_eq!(report.total_edits(), 1);
        assert_eq!(read(temp.path(), "util.c"), "a\nX\n#ifndef S_ISDIR\nb\n");
        assert_eq!(read(temp.path(), "util.c.old"), "a\n#ifndef S_ISDIR\nb\n");
    }

    #[test]
    fn reapplying_is_idempotent() {
        let temp = tempfile::tempdir().expect("tempdir");
        write(temp.path(), "io.c", "anchor\n");
        let set = PatchSet::one("io.c", EditSet::one("anchor", "shim\nanchor"));

        apply_patch_set(temp.path(), &set).expect("first");
        apply_patch_set(temp.path(), &set).expect("second");

        assert_eq!(read(temp.path(), "io.c"), "shim\nanchor\n");
        assert_eq!(read(temp.path(), "io.c.old"), "anchor\n");
    }

    #[test]
    fn failure_leaves_tree_untouched() {
        let temp = tempfile::tempdir().expect("tempdir");
        write(temp.path(), "a.c", "alpha\n");
        write(temp.path(), "b.c", "beta\n");
        let mut set = PatchSet::new();
        set.insert("a.c", EditSet::one("alpha", "ALPHA"));
        set.insert("b.c", EditSet::one("gamma", "GAMMA"));

        let err = apply_patch_set(temp.path(), &set).unwrap_err();

        assert!(format!("{err:#}").contains("b.c"));
        assert_eq!(read(temp.path(), "a.c"), "alpha\n");
        assert!(!temp.path().join("a.c.old").exists());
    }

    #[test]
    fn failed_write_rolls_back_committed_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        write(temp.path(), "a.c", "alpha\n");
        write(temp.path(), "b.c", "beta\n");
        fs::create_dir(temp.path().join("b.c.tmp")).expect("block temp file");
        let mut set = PatchSet::new();
        set.insert("a.c", EditSet::one("alpha", "ALPHA"));
        set.insert("b.c", EditSet::one("beta", "BETA"));

        let err = apply_patch_set(temp.path(), &set).unwrap_err();

        assert!(format!("{err:#}").contains("b.c.tmp"));
        assert_eq!(read(temp.path(), "a.c"), "alpha\n");
        assert_eq!(read(temp.path(), "b.c"), "beta\n");
        assert!(!temp.path().join("a.c.old").exists());
        assert!(!temp.path().join("b.c.old").exists());
    }

    #[test]
    fn rollback_restores_previously_patched_text() {
        let temp = tempfile::tempdir().expect("tempdir");
        write(temp.path(), "a.c", "alpha\n");
        write(temp.path(), "b.c", "beta\n");
        let first = PatchSet::one("a.c", EditSet::one("alpha", "ALPHA"));
        apply_patch_set(temp.path(), &first).expect("first apply");

        fs::create_dir(temp.path().join("b.c.tmp")).expect("block temp file");
        let mut second = PatchSet::new();
        second.insert("a.c", EditSet::one("alpha", "Alpha"));
        second.insert("b.c", EditSet::one("beta", "BETA"));
        apply_patch_set(temp.path(), &second).unwrap_err();

        assert_eq!(read(temp.path(), "a.c"), "ALPHA\n");
        assert_eq!(read(temp.path(), "a.c.old"), "alpha\n");
    }

    #[test]
    fn missing_file_and_missing_anchor_share_error_shape() {
        let temp = tempfile::tempdir().expect("tempdir");
        write(temp.path(), "io.c", "nothing\n");
        let missing_file = PatchSet::one("dln.c", EditSet::one("x", "y"));
        let missing_anchor = PatchSet::one("io.c", EditSet::one("x", "y"));

        let file_err = apply_patch_set(temp.path(), &missing_file).unwrap_err();
        let anchor_err = apply_patch_set(temp.path(), &missing_anchor).unwrap_err();

        assert_eq!(file_err.to_string(), "patch dln.c");
        assert!(format!("{file_err:#}").contains("does not exist"));
        assert_eq!(anchor_err.to_string(), "patch io.c");
        assert!(format!("{anchor_err:#}").contains("anchor not found"));
    }

    #[test]
    fn missing_file_is_named_in_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let set = PatchSet::one("dln.c", EditSet::one("x", "y"));
        let err = apply_patch_set(temp.path(), &set).unwrap_err();
        assert!(err.to_string().contains("dln.c"));
    }
}
