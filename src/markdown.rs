//! Markdown rendering of sorted SSP records.
//!
//! Rendering is a single pass. Headers are emitted only when the family,
//! control, or part differs from the previous record, so the input must
//! already be in SSP order (see `record::build_ssp`).

use crate::catalog::FamilyCode;
use crate::record::SspRecord;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Convert plain text to Markdown as far as the narratives need it: every
/// newline starts a new paragraph and `•` bullets become list items.
pub fn plain_text_to_markdown(text: &str) -> String {
    text.replace('\n', "\n\n").replace('•', "*")
}

/// Quote every line of `text`, ignoring surrounding whitespace.
pub fn blockquote(text: &str) -> String {
    let mut quoted = text
        .trim()
        .split('\n')
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    quoted.push('\n');
    quoted
}

/// Write records as one Markdown document.
pub fn write_ssp<W: Write>(out: &mut W, records: &[SspRecord]) -> std::io::Result<()> {
    let mut current_family: Option<&str> = None;
    let mut current_control: Option<&str> = None;
    let mut current_part: Option<&str> = None;

    for record in records {
        if current_family != Some(record.family_name.as_str()) {
            write!(out, "# {}\n\n", record.family_name)?;
            current_family = Some(record.family_name.as_str());
            current_control = None;
            current_part = None;
        }

        if current_control != Some(record.control_key.as_str()) {
            write!(out, "## {} {}\n\n", record.control_key, record.control_name)?;
            let description = plain_text_to_markdown(&record.description);
            write!(out, "{}\n\n", blockquote(&description))?;
            current_control = Some(record.control_key.as_str());
            current_part = None;
        }

        if current_part != Some(record.part.as_str()) {
            // An empty part is the whole control and gets no header.
            if !record.part.is_empty() {
                write!(out, "### Part {})\n\n", record.part)?;
            }
            current_part = Some(record.part.as_str());
        }

        if let Some(component) = &record.component_name {
            write!(out, "#### {component}\n\n")?;
        }

        write!(out, "{}\n\n", plain_text_to_markdown(&record.narrative))?;
    }
    Ok(())
}

/// Write one `<FAMILY-CODE>.md` per family present in `records`.
///
/// The directory is created when missing. Returns the written paths in family
/// code order.
pub fn write_separate(dir: &Path, records: &[SspRecord]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let codes: BTreeSet<&FamilyCode> = records.iter().map(|r| &r.family_code).collect();
    let mut written = Vec::new();
    for code in codes {
        let family: Vec<SspRecord> = records
            .iter()
            .filter(|r| &r.family_code == code)
            .cloned()
            .collect();
        let path = dir.join(format!("{code}.md"));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);
        write_ssp(&mut out, &family).with_context(|| format!("writing {}", path.display()))?;
        out.flush()
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), records = family.len(), "wrote family file");
        written.push(path);
    }
    Ok(written)
}

/// Write records as newline-delimited JSON, one record per line.
pub fn write_records_json<W: Write>(out: &mut W, records: &[SspRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record).context("serializing SSP record")?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
