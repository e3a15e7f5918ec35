//! Composition of the full patch set for one target.
//!
//! The base set always covers the same nine files. Overlays are computed as
//! (possibly empty) fragments and merged over it with [`PatchSet::overlay`].

use std::path::Path;

use tracing::debug;

use crate::core::c_sources;
use crate::core::linker::{LinkerFlags, StaticLibraries};
use crate::core::literals::{
    COMMON_MK_PATCH, LINUX_MUSL_THREAD_PTHREAD_PATCH, RUBY_C_MSYS_PATCHES,
    WIN32_FILE_C_MSYS_PATCHES,
};
use crate::core::makefile;
use crate::core::os_family::{OsFamily, Target};
use crate::core::types::{EditSet, PatchSet};
use crate::core::version::RuntimeVersion;

/// Files every patch set contains.
pub const BASE_FILES: [&str; 9] = [
    "template/Makefile.in",
    "tool/mkconfig.rb",
    "gem_prelude.rb",
    "dir.c",
    "dln.c",
    "io.c",
    "file.c",
    "main.c",
    "util.c",
];

/// Files the MSYS overlay contributes.
pub const MSYS_FILES: [&str; 3] = ["cygwin/GNUmakefile.in", "ruby.c", "win32/file.c"];

/// Build with the default static link line.
pub fn build(target: &Target, deps_lib_dir: &Path, version: &RuntimeVersion) -> PatchSet {
    build_with(&StaticLibraries, target, deps_lib_dir, version)
}

/// Resolve a raw OS identifier, then build.
pub fn build_for(ostype: &str, deps_lib_dir: &Path, version: &RuntimeVersion) -> PatchSet {
    build(&Target::new(ostype), deps_lib_dir, version)
}

pub fn build_with<L: LinkerFlags + ?Sized>(
    linker: &L,
    target: &Target,
    deps_lib_dir: &Path,
    version: &RuntimeVersion,
) -> PatchSet {
    debug!(ostype = %target.ostype, family = %target.family, %version, "building patch set");
    base(linker, target, deps_lib_dir, version)
        .overlay(musl_overlay(target.family))
        .overlay(platform_overlay(target.family, version))
}

fn base<L: LinkerFlags + ?Sized>(
    linker: &L,
    target: &Target,
    deps_lib_dir: &Path,
    version: &RuntimeVersion,
) -> PatchSet {
    let family = target.family;
    let mut set = PatchSet::new();
    set.insert(
        "template/Makefile.in",
        makefile::template_makefile_in(linker, target, deps_lib_dir, version),
    );
    set.insert("tool/mkconfig.rb", c_sources::mkconfig_rb(family));
    set.insert("gem_prelude.rb", c_sources::gem_prelude_rb());
    set.insert("dir.c", c_sources::dir_c(family));
    set.insert("dln.c", c_sources::dln_c(family));
    set.insert("io.c", c_sources::io_c(family));
    set.insert("file.c", c_sources::file_c());
    set.insert("main.c", c_sources::main_c());
    set.insert("util.c", c_sources::util_c());
    set
}

fn musl_overlay(family: OsFamily) -> PatchSet {
    if family != OsFamily::LinuxMusl {
        return PatchSet::new();
    }
    debug!("adding musl thread_pthread.c overlay");
    PatchSet::one(
        "thread_pthread.c",
        EditSet::from_pairs(LINUX_MUSL_THREAD_PTHREAD_PATCH),
    )
}

/// MSYS overlay, or `common.mk` for any other 3.x target, never both.
// TODO: confirm whether non-Windows targets need the common.mk patch at all.
fn platform_overlay(family: OsFamily, version: &RuntimeVersion) -> PatchSet {
    if family.is_msys() {
        debug!("adding msys overlay");
        msys_overlay(version)
    } else if version.is_3x() {
        debug!("adding common.mk overlay");
        PatchSet::one("common.mk", EditSet::from_pairs(COMMON_MK_PATCH))
    } else {
        PatchSet::new()
    }
}

fn msys_overlay(version: &RuntimeVersion) -> PatchSet {
    let mut set = PatchSet::new();
    set.insert(
        "cygwin/GNUmakefile.in",
        makefile::cygwin_gnumakefile_in(version),
    );
    set.insert("ruby.c", EditSet::from_pairs(RUBY_C_MSYS_PATCHES));
    set.insert("win32/file.c", EditSet::from_pairs(WIN32_FILE_C_MSYS_PATCHES));
    set
}
