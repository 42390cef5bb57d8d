//! Loading of per-component control family files.
//!
//! A components root holds one directory per component (`LINCS/`, `AWS/`, ...)
//! and each component directory holds one YAML file per control family
//! (`AC-ACCESS_CONTROL.yaml`). Files are read in sorted path order so the SSP
//! does not depend on directory listing order.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// One component's implementation of a single control family.
pub struct ComponentControlFamily {
    /// Component id looked up in the roster; null means "no component".
    #[serde(default)]
    pub name: Option<String>,
    pub family: String,
    pub satisfies: Vec<SatisfiedControl>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// A single control (or control part) a component claims to satisfy.
pub struct SatisfiedControl {
    pub control_key: String,
    pub control_name: String,
    #[serde(default)]
    pub control_key_part: Option<String>,
    pub narrative: String,
    #[serde(default)]
    pub security_control_type: Option<String>,
    #[serde(default)]
    pub control_description: Option<String>,
}

#[derive(Clone, Debug)]
/// A parsed family file plus where it came from.
pub struct LoadedFamily {
    pub path: PathBuf,
    pub document: ComponentControlFamily,
}

impl ComponentControlFamily {
    /// Parse a family file, naming the file in any error.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("{} is not a valid control family file", path.display()))
    }
}

/// Load every `*.yaml` file one level below each component directory.
///
/// The root must exist; a missing root is reported before anything is read.
pub fn collect_component_families(root: &Path) -> Result<Vec<LoadedFamily>> {
    if !root.is_dir() {
        bail!("Can't find directory: {}", root.display());
    }

    let mut families = Vec::new();
    for path in collect_family_files(root)? {
        let document = ComponentControlFamily::from_path(&path)?;
        debug!(
            path = %path.display(),
            family = %document.family,
            controls = document.satisfies.len(),
            "loaded control family"
        );
        families.push(LoadedFamily { path, document });
    }
    Ok(families)
}

/// List family files in sorted order without parsing them.
///
/// Dot-prefixed names (`.git/`, `._AC.yaml`) are skipped at both levels.
pub fn collect_family_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for component_dir in sorted_entries(root)? {
        if !component_dir.is_dir() {
            continue;
        }
        for path in sorted_entries(&component_dir)? {
            if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("yaml") {
                files.push(path);
            }
        }
    }
    Ok(files)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
