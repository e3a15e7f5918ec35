//! Per-file edit sets for the runtime's C and Ruby sources.

use crate::core::literals::{
    C_FILE_SUBST, C_FILE_SUBST_LESS, DIR_C_ANCHOR, DIR_C_ANCHOR_MSYS, DIR_C_BASE_PATCH,
    DLN_C_ANCHOR, DLN_C_MSYS_PATCH, FILE_C_ANCHOR, GEM_PRELUDE_RB_PATCH, IO_C_ANCHOR,
    IO_C_MSYS_PATCH, MAIN_C_PATCH, TOOL_MKCONFIG_RB_PATCH, TOOL_MKCONFIG_RB_PATCH_MSYS,
    UTIL_C_ANCHOR,
};
use crate::core::os_family::OsFamily;
use crate::core::types::EditSet;

/// Insert the system API shim immediately before `anchor`, keeping the anchor.
pub fn insert_shim(anchor: &str) -> EditSet {
    EditSet::one(anchor, format!("{C_FILE_SUBST}\n{anchor}"))
}

pub fn dir_c(family: OsFamily) -> EditSet {
    let anchor = if family.is_msys() {
        DIR_C_ANCHOR_MSYS
    } else {
        DIR_C_ANCHOR
    };
    insert_shim(anchor).with(EditSet::from_pairs(DIR_C_BASE_PATCH))
}

/// The loader wrappers are not substituted on Windows, hence the smaller block.
pub fn dln_c(family: OsFamily) -> EditSet {
    let subst = if family.is_msys() {
        C_FILE_SUBST_LESS
    } else {
        C_FILE_SUBST
    };
    let edits = EditSet::one(DLN_C_ANCHOR, format!("{subst}\n{DLN_C_ANCHOR}\n"));
    if family.is_msys() {
        edits.with(EditSet::from_pairs(DLN_C_MSYS_PATCH))
    } else {
        edits
    }
}

pub fn io_c(family: OsFamily) -> EditSet {
    let edits = insert_shim(IO_C_ANCHOR);
    if family.is_msys() {
        edits.with(EditSet::from_pairs(IO_C_MSYS_PATCH))
    } else {
        edits
    }
}

pub fn file_c() -> EditSet {
    insert_shim(FILE_C_ANCHOR)
}

pub fn util_c() -> EditSet {
    insert_shim(UTIL_C_ANCHOR)
}

pub fn main_c() -> EditSet {
    EditSet::from_pairs(MAIN_C_PATCH)
}

pub fn gem_prelude_rb() -> EditSet {
    EditSet::from_pairs(GEM_PRELUDE_RB_PATCH)
}

pub fn mkconfig_rb(family: OsFamily) -> EditSet {
    if family.is_msys() {
        EditSet::from_pairs(TOOL_MKCONFIG_RB_PATCH_MSYS)
    } else {
        EditSet::from_pairs(TOOL_MKCONFIG_RB_PATCH)
    }
}
