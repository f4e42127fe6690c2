use crate::{Category, CategoryRole, Section};
use serde::{Deserialize, Serialize};

pub const HOLE_PREFIX: &str = "Hole ";
pub const HOLE_TOTAL_NAME: &str = "TOTAL";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    Dice,
    Holes,
}

/// Which sheet a session is playing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VariantChoice {
    #[default]
    Yatzy,
    MiniGolf,
}

impl VariantChoice {
    pub fn toggled(self) -> Self {
        match self {
            Self::Yatzy => Self::MiniGolf,
            Self::MiniGolf => Self::Yatzy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Yatzy => "Yatzy",
            Self::MiniGolf => "Mini Golf",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameVariant {
    pub kind: VariantKind,
    pub title: String,
    pub upper: Vec<Category>,
    pub lower: Vec<Category>,
}

impl GameVariant {
    pub fn dice(title: impl Into<String>, upper: Vec<Category>, lower: Vec<Category>) -> Self {
        Self {
            kind: VariantKind::Dice,
            title: title.into(),
            upper,
            lower,
        }
    }

    /// `holes` editable lines followed by one computed total line.
    pub fn mini_golf(holes: u32) -> Self {
        let mut upper: Vec<Category> = (1..=holes)
            .map(|hole| Category::editable(hole_category_name(hole), None))
            .collect();
        upper.push(Category::computed(HOLE_TOTAL_NAME, CategoryRole::GrandTotal));
        Self {
            kind: VariantKind::Holes,
            title: format!("Mini Golf - {holes} holes"),
            upper,
            lower: Vec::new(),
        }
    }

    pub fn section(&self, section: Section) -> &[Category] {
        match section {
            Section::Upper => &self.upper,
            Section::Lower => &self.lower,
        }
    }

    pub fn find(&self, name: &str) -> Option<(Section, &Category)> {
        self.upper
            .iter()
            .map(|category| (Section::Upper, category))
            .chain(self.lower.iter().map(|category| (Section::Lower, category)))
            .find(|(_, category)| category.name == name)
    }

    pub fn upper_editable_names(&self) -> Vec<&str> {
        self.upper
            .iter()
            .filter(|category| category.is_editable())
            .map(|category| category.name.as_str())
            .collect()
    }
}

pub fn hole_category_name(hole: u32) -> String {
    format!("{HOLE_PREFIX}{hole}")
}

pub fn is_hole_category(name: &str) -> bool {
    name.starts_with(HOLE_PREFIX)
}
