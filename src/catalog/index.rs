//! Indexed view of a loaded control standard.
//!
//! Lookups are strict: asking for a control the standard does not define is an
//! error, because a long-form SSP would otherwise silently lose descriptions.

use crate::catalog::model::{StandardCatalog, StandardControl, load_standard_from_path};
use anyhow::{Result, anyhow};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Default)]
/// Read-only standard catalog keyed by normalized control id.
pub struct StandardIndex {
    catalog: StandardCatalog,
}

impl StandardIndex {
    /// Load the standard from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let catalog = load_standard_from_path(path)?;
        debug!(
            path = %path.display(),
            controls = catalog.controls.len(),
            "loaded control standard"
        );
        Ok(Self::from_catalog(catalog))
    }

    pub fn from_catalog(catalog: StandardCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve a control by its normalized id (`AC-2 (1)`).
    pub fn control(&self, control_id: &str) -> Option<&StandardControl> {
        self.catalog.controls.get(control_id)
    }

    /// Description text for a control, failing when the id is unknown.
    pub fn description(&self, control_id: &str) -> Result<&str> {
        self.control(control_id)
            .map(|control| control.description.as_str())
            .ok_or_else(|| anyhow!("control '{control_id}' not found in standard catalog"))
    }

    /// Iterates control ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.catalog.controls.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.catalog.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.controls.is_empty()
    }
}
