//! Resolution of a free-form OS identifier into a coarse family tag.
//!
//! Resolution happens once, at the boundary. Patch selection switches on
//! [`OsFamily`] and never re-matches the raw identifier.

use std::fmt;

/// Coarse target classification driving patch selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    LinuxMusl,
    MsysWindows,
    GenericUnix,
}

impl OsFamily {
    /// Match markers in priority order: `linux-musl`, then `msys`/`cygwin`.
    ///
    /// Unrecognized identifiers fall through to `GenericUnix` silently.
    pub fn resolve(ostype: &str) -> Self {
        if ostype.contains("linux-musl") {
            Self::LinuxMusl
        } else if ostype.contains("msys") || ostype.contains("cygwin") {
            Self::MsysWindows
        } else {
            Self::GenericUnix
        }
    }

    pub fn is_msys(self) -> bool {
        self == Self::MsysWindows
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LinuxMusl => "linux-musl",
            Self::MsysWindows => "msys-windows",
            Self::GenericUnix => "generic-unix",
        };
        f.write_str(name)
    }
}

/// Raw OS identifier paired with its resolved family.
///
/// The raw string is kept only for collaborators that need finer platform
/// detail than the family (the linker flags builder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub ostype: String,
    pub family: OsFamily,
}

impl Target {
    pub fn new(ostype: impl Into<String>) -> Self {
        let ostype = ostype.into();
        let family = OsFamily::resolve(&ostype);
        Self { ostype, family }
    }
}
