//! Component display names and their preferred order in the SSP.
//!
//! The roster is an ordered association list. Position in the list is the
//! component's rank, and rank 0 always belongs to the unnamed entry so
//! narratives without a component sort ahead of everyone else and render
//! without a component header.

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const DEFAULT_COMPONENTS: &[(&str, &str)] = &[
    ("LINCS", "LINCS specific control or LINCS Responsibility"),
    ("CivicActions", "CivicActions Responsibility"),
    ("Drupal", "Drupal specific control support"),
    ("AWS", "Amazon Web Services (AWS) US-East/West control support"),
];

#[derive(Clone, Debug, Eq, PartialEq)]
/// Where a component lands in the SSP.
pub struct ComponentSlot {
    pub rank: u32,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// One named entry of a roster file.
pub struct RosterEntry {
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    components: Vec<RosterEntry>,
}

#[derive(Clone, Debug)]
/// Immutable component id → (rank, display name) table.
pub struct ComponentRoster {
    entries: Vec<RosterEntry>,
}

impl Default for ComponentRoster {
    fn default() -> Self {
        Self {
            entries: DEFAULT_COMPONENTS
                .iter()
                .map(|(name, display_name)| RosterEntry {
                    name: (*name).to_string(),
                    display_name: (*display_name).to_string(),
                })
                .collect(),
        }
    }
}

impl ComponentRoster {
    /// Build a roster from named entries in preferred order.
    pub fn new(entries: Vec<RosterEntry>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                bail!("roster entries must have a non-empty name");
            }
            if !seen.insert(entry.name.as_str()) {
                bail!("duplicate roster entry '{}'", entry.name);
            }
        }
        Ok(Self { entries })
    }

    /// Load a roster from a YAML file with a top-level `components` list.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading roster {}", path.display()))?;
        let file: RosterFile = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing roster {}", path.display()))?;
        Self::new(file.components).with_context(|| format!("validating roster {}", path.display()))
    }

    /// Resolve a component id. `None` maps to the unranked slot; an id that is
    /// not in the roster is an error.
    pub fn slot(&self, component: Option<&str>) -> Result<ComponentSlot> {
        let Some(name) = component else {
            return Ok(ComponentSlot {
                rank: 0,
                display_name: None,
            });
        };
        let position = self
            .entries
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| anyhow!("component '{name}' is not in the component roster"))?;
        Ok(ComponentSlot {
            rank: position as u32 + 1,
            display_name: Some(self.entries[position].display_name.clone()),
        })
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }
}
