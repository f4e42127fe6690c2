use serde::{Deserialize, Serialize};

/// What a sheet line does. Attached once per category when the sheet is
/// built, never re-derived from the display text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryRole {
    #[default]
    Editable,
    UpperSubtotal,
    Bonus,
    GrandTotal,
}

impl CategoryRole {
    pub fn is_computed(self) -> bool {
        !matches!(self, Self::Editable)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Upper,
    Lower,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub max_point: Option<u32>,
    #[serde(default)]
    pub role: CategoryRole,
}

impl Category {
    pub fn editable(name: impl Into<String>, max_point: Option<u32>) -> Self {
        Self {
            name: name.into(),
            max_point,
            role: CategoryRole::Editable,
        }
    }

    pub fn computed(name: impl Into<String>, role: CategoryRole) -> Self {
        Self {
            name: name.into(),
            max_point: None,
            role,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.role == CategoryRole::Editable
    }
}

/// Display labels that older sheets used as role markers. Only consulted when
/// a sheet entry carries no explicit role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleLabels {
    pub upper_subtotal: Vec<String>,
    pub bonus_prefixes: Vec<String>,
    pub grand_total: Vec<String>,
}

impl Default for RoleLabels {
    fn default() -> Self {
        Self {
            upper_subtotal: vec!["TOTAL".to_string()],
            bonus_prefixes: vec!["BONUS".to_string()],
            grand_total: vec!["I alt".to_string(), "TOTAL".to_string()],
        }
    }
}

impl RoleLabels {
    pub fn infer(&self, section: Section, name: &str) -> CategoryRole {
        match section {
            Section::Upper => {
                if self.upper_subtotal.iter().any(|label| label == name) {
                    CategoryRole::UpperSubtotal
                } else if self
                    .bonus_prefixes
                    .iter()
                    .any(|prefix| name.starts_with(prefix.as_str()))
                {
                    CategoryRole::Bonus
                } else {
                    CategoryRole::Editable
                }
            }
            Section::Lower => {
                if self.grand_total.iter().any(|label| label == name) {
                    CategoryRole::GrandTotal
                } else {
                    CategoryRole::Editable
                }
            }
        }
    }
}
