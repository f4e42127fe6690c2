use serde::{Deserialize, Serialize};

pub use scoresheet_core::{Category, CategoryRole, RoleLabels, Section};

/// One line as written in a sheet file. `role` may be omitted; it is then
/// assigned from the sheet's role labels at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDef {
    pub name: String,
    #[serde(default)]
    pub max_point: Option<u32>,
    #[serde(default)]
    pub role: Option<CategoryRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDef {
    pub title: String,
    pub upper_section: Vec<EntryDef>,
    pub lower_section: Vec<EntryDef>,
    #[serde(default)]
    pub role_labels: Option<RoleLabels>,
}
