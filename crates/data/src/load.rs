use crate::schema::{EntryDef, SheetDef};
use anyhow::{bail, Context};
use scoresheet_core::{Category, GameVariant, RoleLabels, Section};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const SHEET_FILE: &str = "yatzy.json";

const BUILTIN_SHEET: &str = include_str!("../../../assets/yatzy.json");

/// The dice sheet compiled into the binary, used when no asset directory is
/// available.
pub fn builtin_sheet() -> anyhow::Result<GameVariant> {
    parse_sheet(BUILTIN_SHEET).context("parse builtin sheet")
}

/// Load `yatzy.json` from `dir`, falling back to the builtin sheet when the
/// file does not exist. A file that exists but is broken is an error.
pub fn load_sheet_dir(dir: &Path) -> anyhow::Result<GameVariant> {
    let path = dir.join(SHEET_FILE);
    if !path.exists() {
        return builtin_sheet();
    }
    load_sheet(&path)
}

pub fn load_sheet(path: &Path) -> anyhow::Result<GameVariant> {
    let def: SheetDef = load_json(path)?;
    sheet_from_def(def).with_context(|| format!("validate {}", path.display()))
}

pub fn parse_sheet(raw: &str) -> anyhow::Result<GameVariant> {
    let def: SheetDef = serde_json::from_str(raw).context("parse sheet")?;
    sheet_from_def(def)
}

pub fn sheet_from_def(def: SheetDef) -> anyhow::Result<GameVariant> {
    let title = def.title.trim();
    if title.is_empty() {
        bail!("sheet title cannot be empty");
    }
    let labels = def.role_labels.unwrap_or_default();
    let upper = resolve_section(&def.upper_section, Section::Upper, &labels)?;
    let lower = resolve_section(&def.lower_section, Section::Lower, &labels)?;

    // Scores are keyed by name alone, so an editable name may appear once.
    let mut editable = HashSet::new();
    for category in upper.iter().chain(lower.iter()) {
        if category.is_editable() && !editable.insert(category.name.as_str()) {
            bail!(
                "editable category {} appears in both sections",
                category.name
            );
        }
    }

    Ok(GameVariant::dice(title, upper, lower))
}

fn resolve_section(
    entries: &[EntryDef],
    section: Section,
    labels: &RoleLabels,
) -> anyhow::Result<Vec<Category>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = entry.name.trim();
        if name.is_empty() {
            bail!("category name cannot be empty in {section:?} section");
        }
        if !seen.insert(name) {
            bail!("duplicate category {name} in {section:?} section");
        }
        out.push(Category {
            name: name.to_string(),
            max_point: entry.max_point,
            role: entry.role.unwrap_or_else(|| labels.infer(section, name)),
        });
    }
    Ok(out)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
