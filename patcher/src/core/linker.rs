//! Linker flags spliced into the runtime's `MAINLIBS` make variable.

use std::path::Path;

use crate::core::os_family::{OsFamily, Target};
use crate::core::version::RuntimeVersion;

/// Builds the literal linker-flags string for a target.
///
/// Implementations must be pure: equal inputs yield equal output.
pub trait LinkerFlags {
    fn linker_flags(&self, target: &Target, deps_lib_dir: &Path, version: &RuntimeVersion)
    -> String;
}

/// Static link line against the dependency libraries built for packaging.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLibraries;

/// Packaged filesystem libraries, always linked first.
const FS_LIBRARIES: &[&str] = &[
    "tebako-fs",
    "dwarfs-wr",
    "dwarfs",
    "folly",
    "fsst",
    "metadata_thrift",
    "thrift_light",
    "xxhash",
    "zstd",
    "glog",
    "gflags",
    "fmt",
    "double-conversion",
    "boost_chrono",
    "boost_program_options",
    "boost_filesystem",
    "archive",
];

/// Third-party libraries the runtime's extensions link against.
const COMMON_LIBRARIES: &[&str] = &[
    "ssl", "crypto", "z", "lzma", "lz4", "brotlienc", "brotlidec", "brotlicommon", "ffi",
    "yaml", "gdbm", "readline", "ncurses",
];

/// Libraries whose archives only exist on 3.x dependency sets.
const RUNTIME_3X_LIBRARIES: &[&str] = &["gmp"];

const LINUX_SYSTEM: &[&str] = &["-l:libstdc++.a", "-l:libdl.a", "-lpthread", "-lrt", "-lm"];
const MSYS_SYSTEM: &[&str] = &[
    "-l:libstdc++.a",
    "-lws2_32",
    "-liphlpapi",
    "-lshlwapi",
    "-limagehlp",
    "-luserenv",
    "-lbcrypt",
    "-ldbghelp",
    "-lpthread",
];
const DARWIN_SYSTEM: &[&str] = &["-lc++", "-lc++abi", "-lpthread"];
const BSD_SYSTEM: &[&str] = &["-lc++", "-lexecinfo", "-lpthread", "-lm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Platform {
    Linux,
    Msys,
    Darwin,
    Bsd,
}

impl Platform {
    fn of(target: &Target) -> Self {
        match target.family {
            OsFamily::LinuxMusl => Self::Linux,
            OsFamily::MsysWindows => Self::Msys,
            OsFamily::GenericUnix if target.ostype.contains("darwin") => Self::Darwin,
            OsFamily::GenericUnix if target.ostype.contains("bsd") => Self::Bsd,
            OsFamily::GenericUnix => Self::Linux,
        }
    }

    fn lib(self, name: &str) -> String {
        match self {
            Self::Linux | Self::Msys => format!("-l:lib{name}.a"),
            Self::Darwin | Self::Bsd => format!("-l{name}"),
        }
    }

    fn system(self) -> &'static [&'static str] {
        match self {
            Self::Linux => LINUX_SYSTEM,
            Self::Msys => MSYS_SYSTEM,
            Self::Darwin => DARWIN_SYSTEM,
            Self::Bsd => BSD_SYSTEM,
        }
    }
}

impl LinkerFlags for StaticLibraries {
    fn linker_flags(
        &self,
        target: &Target,
        deps_lib_dir: &Path,
        version: &RuntimeVersion,
    ) -> String {
        let platform = Platform::of(target);
        let mut libs = COMMON_LIBRARIES.to_vec();
        if version.is_3x() {
            libs.extend_from_slice(RUNTIME_3X_LIBRARIES);
        }

        let mut parts = vec![format!("-L{}", deps_lib_dir.display())];
        let grouped = platform == Platform::Linux || platform == Platform::Msys;
        if grouped {
            parts.push("-Wl,--start-group".to_string());
        }
        parts.extend(FS_LIBRARIES.iter().map(|name| platform.lib(name)));
        parts.extend(libs.iter().map(|name| platform.lib(name)));
        if grouped {
            parts.push("-Wl,--end-group".to_string());
        }
        parts.extend(platform.system().iter().map(|flag| flag.to_string()));
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn flags(ostype: &str, version: &str) -> String {
        StaticLibraries.linker_flags(
            &Target::new(ostype),
            &PathBuf::from("/deps/lib"),
            &version.parse().expect("version"),
        )
    }

    #[test]
    fn starts_with_deps_lib_dir_verbatim() {
        assert!(flags("linux-gnu", "3.1.0").starts_with("-L/deps/lib "));
    }

    #[test]
    fn linux_uses_archive_names_in_a_group() {
        let out = flags("linux-gnu", "3.1.0");
        assert!(out.contains("-Wl,--start-group -l:libtebako-fs.a"));
        assert!(out.contains("-l:libz.a"));
        assert!(out.ends_with("-lrt -lm"));
    }

    #[test]
    fn darwin_uses_plain_library_names() {
        let out = flags("darwin23", "3.2.0");
        assert!(out.contains(" -ltebako-fs "));
        assert!(!out.contains("--start-group"));
        assert!(out.ends_with("-lc++ -lc++abi -lpthread"));
    }

    #[test]
    fn msys_links_windows_system_libraries() {
        let out = flags("msys", "3.2.0");
        assert!(out.contains("-lws2_32"));
        assert!(out.contains("-l:libgmp.a"));
    }

    #[test]
    fn gmp_only_for_3x() {
        assert!(!flags("linux-gnu", "2.7.8").contains("gmp"));
        assert!(flags("linux-gnu", "3.0.0").contains("-l:libgmp.a"));
    }

    #[test]
    fn no_trailing_newline() {
        assert!(!flags("linux-musl", "3.3.0").ends_with('\n'));
    }
}
