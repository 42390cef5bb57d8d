//! Shared library for the SSP recombiner.
//!
//! Component teams keep their control narratives as one YAML file per control
//! family under `components/<component>/`. This crate loads those files with a
//! control standard, sorts every narrative into SSP order, and renders the
//! result as Markdown, either as one document or one file per family. The
//! `recombine-controls` binary is a thin CLI over [`assemble_ssp`] and the
//! writers in [`markdown`].

use anyhow::{Result, bail};
use std::path::Path;
use tracing::info;

pub mod catalog;
pub mod component;
pub mod markdown;
pub mod record;
pub mod roster;

pub use catalog::{ControlIds, FamilyCode, StandardControl, StandardIndex, load_standard_from_path};
pub use component::{
    ComponentControlFamily, LoadedFamily, SatisfiedControl, collect_component_families,
};
pub use markdown::{write_records_json, write_separate, write_ssp};
pub use record::{NormalizeOptions, SspRecord, build_ssp};
pub use roster::{ComponentRoster, ComponentSlot, RosterEntry};

/// Component root used when none is given.
pub const DEFAULT_COMPONENTS_DIR: &str = "components";
/// Control standard used when none is given.
pub const DEFAULT_STANDARD_PATH: &str = "standards/nist-sp-800-53-rev4.yaml";

/// Fail with the usage error for a components root that is not a directory.
///
/// Callers run this before any other input (roster, standard) is read.
pub fn ensure_components_dir(components_dir: &Path) -> Result<()> {
    if !components_dir.is_dir() {
        bail!("Can't find directory: {}", components_dir.display());
    }
    Ok(())
}

/// Load everything under `components_dir` and return the records in SSP order.
///
/// The components directory is checked before the standard is read so a typo
/// in the directory is reported as such rather than as a standard error.
pub fn assemble_ssp(
    components_dir: &Path,
    standard_path: &Path,
    roster: &ComponentRoster,
    options: &NormalizeOptions,
) -> Result<Vec<SspRecord>> {
    ensure_components_dir(components_dir)?;

    let standard = StandardIndex::load(standard_path)?;
    let families = collect_component_families(components_dir)?;
    info!(
        components = %components_dir.display(),
        files = families.len(),
        standard_controls = standard.len(),
        "collected component families"
    );
    build_ssp(&families, roster, &standard, options)
}
