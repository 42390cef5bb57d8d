//! Normalization of component declarations into sortable SSP records.
//!
//! Each `SspRecord` field is declared in sort priority order, so the derived
//! `Ord` is the SSP order: family, control, part (whole-control text before
//! lettered parts), then component rank with the unnamed component first.

use crate::catalog::{ControlIds, FamilyCode, StandardIndex};
use crate::component::{ComponentControlFamily, LoadedFamily, SatisfiedControl};
use crate::roster::ComponentRoster;
use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Clone, Debug, Default)]
/// Knobs that change which records are produced and how they read.
pub struct NormalizeOptions {
    /// Use the standard's full description instead of a link-only summary.
    pub include_descriptions: bool,
    /// Keep only controls of this family code; an empty code keeps everything.
    pub family: Option<FamilyCode>,
}

impl NormalizeOptions {
    fn keeps(&self, family: &FamilyCode) -> bool {
        self.family
            .as_ref()
            .filter(|wanted| !wanted.as_str().is_empty())
            .is_none_or(|wanted| wanted == family)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
/// One narrative of one component for one control (or control part).
pub struct SspRecord {
    pub family_code: FamilyCode,
    pub family_name: String,
    pub control_key: String,
    pub control_name: String,
    pub part: String,
    pub component_rank: u32,
    pub component_name: Option<String>,
    pub narrative: String,
    pub description: String,
}

/// Resolve the description shown under a control header.
///
/// An explicit `control_description` always wins. Otherwise the text is built
/// from the govready link and security control type, prefixed by the standard's
/// description in long form.
pub fn resolve_description(
    control: &SatisfiedControl,
    ids: &ControlIds,
    standard: &StandardIndex,
    include_descriptions: bool,
) -> Result<String> {
    if let Some(description) = &control.control_description {
        return Ok(description.clone());
    }

    let control_type = control.security_control_type.as_deref().ok_or_else(|| {
        anyhow!(
            "control {} has neither control_description nor security_control_type",
            control.control_key
        )
    })?;

    if include_descriptions {
        let description = standard.description(&ids.control_id)?;
        Ok(format!(
            "{description}\n\n_(<{}>)_\n\nSecurity control type: {control_type}",
            ids.link()
        ))
    } else {
        Ok(format!(
            "Control description: <{}>\n\nSecurity control type: {control_type}",
            ids.link()
        ))
    }
}

/// Turn one family document into records, dropping filtered-out controls.
pub fn normalize_family(
    document: &ComponentControlFamily,
    roster: &ComponentRoster,
    standard: &StandardIndex,
    options: &NormalizeOptions,
) -> Result<Vec<SspRecord>> {
    let mut records = Vec::new();
    for control in &document.satisfies {
        let family_code = FamilyCode::from_control_key(&control.control_key);
        if !options.keeps(&family_code) {
            debug!(control = %control.control_key, "skipping control outside family filter");
            continue;
        }

        let ids = ControlIds::from_key(&control.control_key);
        let description =
            resolve_description(control, &ids, standard, options.include_descriptions)?;
        let slot = roster.slot(document.name.as_deref())?;

        records.push(SspRecord {
            family_code,
            family_name: document.family.clone(),
            control_key: control.control_key.clone(),
            control_name: control.control_name.clone(),
            part: control.control_key_part.clone().unwrap_or_default(),
            component_rank: slot.rank,
            component_name: slot.display_name,
            narrative: control.narrative.clone(),
            description,
        });
    }
    Ok(records)
}

/// Normalize every loaded family and sort the result into SSP order.
///
/// The sort is stable, so exact duplicates keep their load order.
pub fn build_ssp(
    families: &[LoadedFamily],
    roster: &ComponentRoster,
    standard: &StandardIndex,
    options: &NormalizeOptions,
) -> Result<Vec<SspRecord>> {
    let mut ssp = Vec::new();
    for family in families {
        let records = normalize_family(&family.document, roster, standard, options)
            .with_context(|| format!("normalizing {}", family.path.display()))?;
        ssp.extend(records);
    }
    ssp.sort();
    info!(records = ssp.len(), files = families.len(), "assembled SSP records");
    Ok(ssp)
}
