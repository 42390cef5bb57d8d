//! Deserializable representation of a control standard such as
//! `standards/nist-sp-800-53-rev4.yaml`.
//!
//! The file is a YAML mapping from control id to a control record. Standards
//! exported by govready also carry scalar top-level keys (`name`, `source`);
//! those are not controls and are skipped while loading.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// One control entry of the standard.
pub struct StandardControl {
    pub description: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
}

#[derive(Clone, Debug, Default)]
/// All controls of a standard keyed by control id (e.g., `AC-2`, `AC-2 (1)`).
pub struct StandardCatalog {
    pub controls: BTreeMap<String, StandardControl>,
}

/// Read and parse a control standard from disk.
///
/// Any I/O or YAML failure is fatal; the SSP cannot be assembled without the
/// standard.
pub fn load_standard_from_path(path: &Path) -> Result<StandardCatalog> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading standard {}", path.display()))?;
    parse_standard(&data).with_context(|| format!("parsing standard {}", path.display()))
}

fn parse_standard(data: &str) -> Result<StandardCatalog> {
    let root: Value = serde_yaml::from_str(data)?;
    let Value::Mapping(entries) = root else {
        bail!("standard must be a mapping of control ids to controls");
    };

    let mut controls = BTreeMap::new();
    for (key, value) in entries {
        let Some(id) = key.as_str() else {
            continue;
        };
        if !value.is_mapping() {
            continue;
        }
        let control: StandardControl = serde_yaml::from_value(value)
            .with_context(|| format!("control {id} is malformed"))?;
        controls.insert(id.to_string(), control);
    }
    Ok(StandardCatalog { controls })
}
