//! CLI tests for `patcher show`, `files` and `apply`.
//!
//! Spawns the patcher binary and verifies output and exit codes.

use std::path::PathBuf;
use std::process::Command;

use patcher::exit_codes;
use patcher::io::apply::backup_path;
use patcher::test_support::SourceTree;
use patcher::{RuntimeVersion, build_for};

fn patcher() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_patcher"));
    cmd.arg("--config").arg("does-not-exist.toml");
    cmd
}

#[test]
fn files_lists_msys_overlay() {
    let output = patcher()
        .args(["files", "--os", "msys", "--ruby", "3.2.0"])
        .output()
        .expect("patcher files");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let files: Vec<&str> = stdout.lines().collect();
    assert!(files.contains(&"cygwin/GNUmakefile.in"));
    assert!(files.contains(&"win32/file.c"));
    assert!(!files.contains(&"common.mk"));
    assert_eq!(files.len(), 12);
}

#[test]
fn show_prints_json_patch_set() {
    let output = patcher()
        .args(["show", "--os", "linux-gnu", "--ruby", "3.1.0"])
        .output()
        .expect("patcher show");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let common = value["common.mk"].as_object().expect("common.mk object");
    assert_eq!(common.len(), 1);
}

#[test]
fn malformed_version_exits_invalid() {
    let status = patcher()
        .args(["show", "--ruby", "three.two"])
        .status()
        .expect("patcher show");
    assert_eq!(status.code(), Some(exit_codes::INVALID));
}

#[test]
fn apply_patches_source_tree() {
    let deps = PathBuf::from("/deps/lib");
    let set = build_for("x86_64-linux-musl", &deps, &RuntimeVersion::new(3, 2, 0));
    let tree = SourceTree::for_patch_set(&set).expect("tree");

    let status = patcher()
        .args(["apply", "--os", "x86_64-linux-musl", "--ruby", "3.2.0"])
        .arg("--deps-lib-dir")
        .arg(&deps)
        .arg("--source-dir")
        .arg(tree.path())
        .status()
        .expect("patcher apply");

    assert_eq!(status.code(), Some(exit_codes::OK));
    let main_c = tree.read("main.c").expect("main.c");
    assert!(main_c.contains("tebako_main(&argc, &argv)"));
    let makefile = tree.read("template/Makefile.in").expect("makefile");
    assert!(makefile.contains("MAINLIBS = $(YJIT_LIBS) -L/deps/lib"));
    assert!(backup_path(&tree.file("thread_pthread.c")).exists());
}

#[test]
fn apply_missing_anchor_fails_without_writing() {
    let deps = PathBuf::from("/deps/lib");
    let set = build_for("linux-gnu", &deps, &RuntimeVersion::new(3, 3, 0));
    let tree = SourceTree::for_patch_set(&set).expect("tree");
    tree.write("util.c", "no anchors here\n").expect("overwrite util.c");
    let io_before = tree.read("io.c").expect("io.c");

    let output = patcher()
        .args(["apply", "--os", "linux-gnu", "--ruby", "3.3.0"])
        .arg("--deps-lib-dir")
        .arg(&deps)
        .arg("--source-dir")
        .arg(tree.path())
        .output()
        .expect("patcher apply");

    assert_eq!(output.status.code(), Some(exit_codes::PATCH_FAILED));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("util.c"), "stderr: {stderr}");
    assert_eq!(tree.read("io.c").expect("io.c"), io_before);
    assert!(!backup_path(&tree.file("io.c")).exists());
}
