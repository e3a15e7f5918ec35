//! Edit sets for the runtime's makefile templates.

use std::path::Path;

use crate::core::linker::LinkerFlags;
use crate::core::literals::{
    GNUMAKEFILE_IN_WINMAIN_SUBST, PATCH_END_MARKER, PATCH_START_MARKER,
    TEMPLATE_MAKEFILE_IN_BASE_PATCH, TEMPLATE_MAKEFILE_IN_BASE_PATCH_MSYS,
    TEMPLATE_MAKEFILE_IN_BASE_PATCH_PRE_3_1, TEMPLATE_MAKEFILE_IN_BASE_PATTERN,
    TEMPLATE_MAKEFILE_IN_BASE_PATTERN_PRE_3_1, YJIT_LIBS_TOKEN,
};
use crate::core::os_family::Target;
use crate::core::types::EditSet;
use crate::core::version::RuntimeVersion;

/// Which link-rule rewrite `template/Makefile.in` receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseRule {
    Msys,
    Post31,
    Pre31,
}

impl BaseRule {
    /// MSYS wins regardless of version; the upstream anchor changed at 3.1.
    pub fn select(target: &Target, version: &RuntimeVersion) -> Self {
        if target.family.is_msys() {
            Self::Msys
        } else if version.is_31_or_above() {
            Self::Post31
        } else {
            Self::Pre31
        }
    }

    pub fn pattern(self) -> &'static str {
        match self {
            Self::Msys | Self::Post31 => TEMPLATE_MAKEFILE_IN_BASE_PATTERN,
            Self::Pre31 => TEMPLATE_MAKEFILE_IN_BASE_PATTERN_PRE_3_1,
        }
    }

    pub fn patch(self) -> &'static str {
        match self {
            Self::Msys => TEMPLATE_MAKEFILE_IN_BASE_PATCH_MSYS,
            Self::Post31 => TEMPLATE_MAKEFILE_IN_BASE_PATCH,
            Self::Pre31 => TEMPLATE_MAKEFILE_IN_BASE_PATCH_PRE_3_1,
        }
    }
}

fn yjit_token(version: &RuntimeVersion) -> &'static str {
    if version.is_32_exact() {
        YJIT_LIBS_TOKEN
    } else {
        ""
    }
}

/// Replace `@MAINLIBS@` with the static link line, keeping the YJIT token
/// the 3.2 template places in front of it.
pub fn mainlibs_subst<L: LinkerFlags + ?Sized>(
    linker: &L,
    target: &Target,
    deps_lib_dir: &Path,
    version: &RuntimeVersion,
) -> EditSet {
    let yjit = yjit_token(version);
    let flags = linker.linker_flags(target, deps_lib_dir, version);
    EditSet::one(
        format!("MAINLIBS = {yjit}@MAINLIBS@"),
        format!("{PATCH_START_MARKER}\nMAINLIBS = {yjit}{flags}\n{PATCH_END_MARKER}\n"),
    )
}

pub fn template_makefile_in<L: LinkerFlags + ?Sized>(
    linker: &L,
    target: &Target,
    deps_lib_dir: &Path,
    version: &RuntimeVersion,
) -> EditSet {
    let rule = BaseRule::select(target, version);
    EditSet::one(rule.pattern(), rule.patch())
        .with(mainlibs_subst(linker, target, deps_lib_dir, version))
}

/// Link rules for `cygwin/GNUmakefile.in`; `ruby.exp` regeneration is disabled.
///
/// The object extension macro was renamed upstream at 3.2.
pub fn cygwin_gnumakefile_in(version: &RuntimeVersion) -> EditSet {
    let objext = if version.is_32_or_above() {
        "$(OBJEXT)"
    } else {
        "@OBJEXT@"
    };
    let mut edits = EditSet::new();
    edits.insert(
        format!("$(WPROGRAM): $(RUBYW_INSTALL_NAME).res.{objext}"),
        format!("$(WPROGRAM): $(RUBYW_INSTALL_NAME).res.{objext} $(WINMAINOBJ)  # tebako patched"),
    );
    edits.insert(
        "$(MAINOBJ) $(EXTOBJS) $(LIBRUBYARG) $(LIBS) -o $@",
        "$(WINMAINOBJ) $(EXTOBJS) $(LIBRUBYARG) $(MAINLIBS) -o $@  # tebako patched",
    );
    edits.insert("RUBYDEF = $(DLL_BASE_NAME).def", GNUMAKEFILE_IN_WINMAIN_SUBST);
    edits.insert(
        "$(RUBY_EXP): $(LIBRUBY_A)",
        "dummy.exp: $(LIBRUBY_A) # tebako patched",
    );
    edits.insert(
        format!("$(PROGRAM): $(RUBY_INSTALL_NAME).res.{objext}"),
        format!(
            "$(PROGRAM): $(RUBY_INSTALL_NAME).res.{objext} $(LIBRUBY_A) # tebako patched\n\
             $(LIBRUBY_A): $(LIBRUBY_A_OBJS) $(INITOBJS) # tebako patched\n"
        ),
    );
    edits
}
