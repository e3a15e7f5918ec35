//! Immutable patch bodies, keyed by what they patch.
//!
//! Every constant here is opaque text spliced into the runtime sources. The
//! builder decides which of them apply; nothing in this module branches.

/// Header block inserted ahead of system API definitions in C sources.
pub const C_FILE_SUBST: &str = "\
/* -- Start of tebako patch -- */
#include <tebako/tebako-config.h>
#include <tebako/tebako-defines.h>
#include <tebako/tebako-io-rb-w32.h>
#include <tebako/tebako-io.h>
/* -- End of tebako patch -- */";

/// Reduced header block for `dln.c` on Windows, where the dynamic loader
/// wrappers are not substituted.
pub const C_FILE_SUBST_LESS: &str = "\
/* -- Start of tebako patch -- */
#include <tebako/tebako-config.h>
#include <tebako/tebako-io.h>
/* -- End of tebako patch -- */";

pub const IO_C_ANCHOR: &str = "/* define system APIs */";
pub const FILE_C_ANCHOR: &str = "/* define system APIs */";
pub const UTIL_C_ANCHOR: &str = "#ifndef S_ISDIR";
pub const DIR_C_ANCHOR: &str = "#ifdef HAVE_GETATTRLIST";
pub const DIR_C_ANCHOR_MSYS: &str = "/* define system APIs */";

pub const DLN_C_ANCHOR: &str =
    "static const char funcname_prefix[sizeof(FUNCNAME_PREFIX) - 1] = FUNCNAME_PREFIX;";

pub const DIR_C_BASE_PATCH: &[(&str, &str)] = &[
    (
        "#if defined HAVE_GETATTRLIST && defined ATTR_DIR_ENTRYCOUNT",
        "#if defined HAVE_GETATTRLIST && defined ATTR_DIR_ENTRYCOUNT && !defined(TEBAKO_HAS_MEMFS) /* tebako patched */",
    ),
    (
        "    if (is_case_sensitive(dirp, path) == 0)",
        "    if (is_case_sensitive(dirp, path) == 0 && !within_tebako_memfs(path)) /* tebako patched */",
    ),
];

pub const DLN_C_MSYS_PATCH: &[(&str, &str)] = &[(
    "    winfile = rb_w32_mbstr_to_wstr(CP_UTF8, file, -1, NULL);",
    "    /* -- Start of tebako patch -- */
    if (within_tebako_memfs(file)) {
        file = tebako_dlmap2file(file);
    }
    /* -- End of tebako patch -- */
    winfile = rb_w32_mbstr_to_wstr(CP_UTF8, file, -1, NULL);",
)];

pub const IO_C_MSYS_PATCH: &[(&str, &str)] = &[(
    "#define open\trb_w32_uopen",
    "#define open(p, f, m) tebako_open(3, (p), (f), (m)) /* tebako patched */",
)];

pub const MAIN_C_PATCH: &[(&str, &str)] = &[
    (
        "int\nmain(int argc, char **argv)",
        "#include <tebako/tebako-main.h>\n\nint\nmain(int argc, char **argv)",
    ),
    (
        "    ruby_sysinit(&argc, &argv);",
        "    ruby_sysinit(&argc, &argv);
    /* -- Start of tebako patch -- */
    if (tebako_main(&argc, &argv) != 0) {
        return -1;
    }
    /* -- End of tebako patch -- */",
    ),
];

pub const GEM_PRELUDE_RB_PATCH: &[(&str, &str)] = &[(
    "if defined?(DidYouMean)",
    "# -- Start of tebako patch --
begin
  require 'tebako-runtime'
rescue LoadError
  warn \"'tebako-runtime' was not loaded.\"
end
# -- End of tebako patch --
if defined?(DidYouMean)",
)];

pub const TOOL_MKCONFIG_RB_PATCH: &[(&str, &str)] = &[(
    "    if fast[name]",
    "# -- Start of tebako patch --
    v.sub!(/\"prefix\"\\]\\s*=\\s*\".*\"$/, '\"prefix\"] = \"/__tebako_memfs__\"')
# -- End of tebako patch --
    if fast[name]",
)];

pub const TOOL_MKCONFIG_RB_PATCH_MSYS: &[(&str, &str)] = &[
    (
        "    if fast[name]",
        "# -- Start of tebako patch --
    v.sub!(/\"prefix\"\\]\\s*=\\s*\".*\"$/, '\"prefix\"] = \"A:/__tebako_memfs__\"')
# -- End of tebako patch --
    if fast[name]",
    ),
    (
        "    when /^prefix$/",
        "# -- Start of tebako patch --
    when /^prefix$/
      val = \"A:/__tebako_memfs__\"
# -- End of tebako patch --",
    ),
];

pub const LINUX_MUSL_THREAD_PTHREAD_PATCH: &[(&str, &str)] = &[(
    "#if defined(__linux__) && !defined(__ANDROID__) && !defined(__EMSCRIPTEN__)",
    "/* -- Start of tebako patch -- */
#if defined(__linux__) && !defined(__ANDROID__) && !defined(__EMSCRIPTEN__) && defined(__GLIBC__)
/* -- End of tebako patch -- */",
)];

pub const COMMON_MK_PATCH: &[(&str, &str)] = &[(
    "ext/extinit.c: $(srcdir)/template/extinit.c.tmpl $(PREP)",
    "ext/extinit.c: $(srcdir)/template/extinit.c.tmpl $(PREP) $(EXTS_MK) # tebako patched",
)];

pub const RUBY_C_MSYS_PATCHES: &[(&str, &str)] = &[
    (
        "#ifndef MAXPATHLEN",
        "/* -- Start of tebako patch -- */
#include <tebako/tebako-main.h>
/* -- End of tebako patch -- */
#ifndef MAXPATHLEN",
    ),
    (
        "    if (!GetModuleFileNameW(libruby, wlibpath, MAXPATHLEN))",
        "    if (tebako_get_module_path(libruby, wlibpath, MAXPATHLEN) == 0) /* tebako patched */",
    ),
];

pub const WIN32_FILE_C_MSYS_PATCHES: &[(&str, &str)] = &[
    (
        "#include \"win32/file.h\"",
        "#include \"win32/file.h\"
/* -- Start of tebako patch -- */
#include <tebako/tebako-config.h>
#include <tebako/tebako-io.h>
/* -- End of tebako patch -- */",
    ),
    (
        "    wpath = mbstr_to_wstr(CP_UTF8, path, -1, &len);",
        "    if (within_tebako_memfs(path)) {
        return tebako_readlink_str(path, enc); /* tebako patched */
    }
    wpath = mbstr_to_wstr(CP_UTF8, path, -1, &len);",
    ),
];

/// Link rule block appended after the `RUBYDEF` line of the Cygwin/MSYS
/// makefile so that the console and windowed programs link `winmain`.
pub const GNUMAKEFILE_IN_WINMAIN_SUBST: &str = "\
RUBYDEF = $(DLL_BASE_NAME).def

# -- Start of tebako patch --
WINMAINOBJ = win32/winmain.$(OBJEXT)
$(WINMAINOBJ): win32/winmain.c
\t@$(ECHO) compiling $<
\t$(Q) $(CC) $(CFLAGS) $(XCFLAGS) $(CPPFLAGS) $(COUTFLAG)$@ -c $<
# -- End of tebako patch --";

pub const TEMPLATE_MAKEFILE_IN_BASE_PATTERN_PRE_3_1: &str = "\t\t$(Q) $(PURIFY) $(CC) $(LDFLAGS) $(XLDFLAGS) $(MAINOBJ) \
$(EXTOBJS) $(LIBRUBYARG) $(MAINLIBS) $(LIBS) $(EXTLIBS) $(OUTFLAG)$@";

pub const TEMPLATE_MAKEFILE_IN_BASE_PATCH_PRE_3_1: &str = "# -- Start of tebako patch --
\t\t$(Q) $(PURIFY) $(CC) $(LDFLAGS) $(XLDFLAGS) $(MAINOBJ) \
$(EXTOBJS) $(LIBRUBYARG_STATIC) $(LIBS) $(MAINLIBS) $(EXTLIBS) $(OUTFLAG)$@
# -- End of tebako patch --";

pub const TEMPLATE_MAKEFILE_IN_BASE_PATTERN: &str = "\t\t$(Q) $(PURIFY) $(CC) $(EXE_LDFLAGS) $(XLDFLAGS) $(MAINOBJ) \
$(EXTOBJS) $(LIBRUBYARG) $(MAINLIBS) $(EXTLIBS) $(OUTFLAG)$@";

pub const TEMPLATE_MAKEFILE_IN_BASE_PATCH: &str = "# -- Start of tebako patch --
\t\t$(Q) $(PURIFY) $(CC) $(EXE_LDFLAGS) $(XLDFLAGS) $(MAINOBJ) \
$(EXTOBJS) $(LIBRUBYARG_STATIC) $(MAINLIBS) $(EXTLIBS) $(OUTFLAG)$@
# -- End of tebako patch --";

pub const TEMPLATE_MAKEFILE_IN_BASE_PATCH_MSYS: &str = "# -- Start of tebako patch --
\t\t$(Q) $(PURIFY) $(CC) $(EXE_LDFLAGS) $(XLDFLAGS) $(RUBY_EXP) $(MAINOBJ) \
$(EXTOBJS) $(LIBRUBYARG_STATIC) $(MAINLIBS) $(EXTLIBS) $(OUTFLAG)$@
# -- End of tebako patch --";

pub const PATCH_START_MARKER: &str = "# -- Start of tebako patch -- ";
pub const PATCH_END_MARKER: &str = "# -- End of tebako patch -- ";

/// Extra library token kept in front of `@MAINLIBS@` by the 3.2 template.
pub const YJIT_LIBS_TOKEN: &str = "$(YJIT_LIBS) ";
