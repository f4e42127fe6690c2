use crate::{
    Category, CategoryRole, GameVariant, Player, ScoreCalculator, Section, VariantKind,
    VariantParameters,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowercase name fragments of combinations that need every one of the six
/// dice.
pub const SIX_DICE_MARKERS: &[&str] = &[
    "three pairs",
    "3 pairs",
    "3 par",
    "two three",
    "2 x 3",
    "royal",
];

pub fn requires_all_dice(name: &str) -> bool {
    let lowered = name.to_lowercase();
    SIX_DICE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Whether a lower-section category exists under the given parameters.
pub fn is_playable(category: &Category, params: &VariantParameters) -> bool {
    params.has_all_dice() || !requires_all_dice(&category.name)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    UpperTotal,
    Bonus,
    LowerTotal,
    GrandTotal,
    HoleTotal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "aggregate", rename_all = "snake_case")]
pub enum RowKind {
    Editable,
    Computed(Aggregate),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowClass {
    #[default]
    Normal,
    SectionSubtotal,
    Bonus,
    GrandTotal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowDescriptor {
    pub kind: RowKind,
    pub class: RowClass,
}

impl Default for RowDescriptor {
    fn default() -> Self {
        Self::EDITABLE
    }
}

impl RowDescriptor {
    pub const EDITABLE: Self = Self {
        kind: RowKind::Editable,
        class: RowClass::Normal,
    };

    pub const fn computed(aggregate: Aggregate, class: RowClass) -> Self {
        Self {
            kind: RowKind::Computed(aggregate),
            class,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.kind, RowKind::Editable)
    }

    /// Computed value for `player`; `None` for editable rows.
    pub fn value(&self, calc: &ScoreCalculator, player: &Player) -> Option<i64> {
        match self.kind {
            RowKind::Editable => None,
            RowKind::Computed(aggregate) => Some(calc.evaluate(aggregate, player)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub category: Category,
    pub descriptor: RowDescriptor,
}

/// Fully enumerated row layout for one render pass.
#[derive(Debug, Clone, Default)]
pub struct RowConfig {
    upper: Vec<Row>,
    lower: Vec<Row>,
    index: HashMap<(Section, String), RowDescriptor>,
}

impl RowConfig {
    pub fn section(&self, section: Section) -> &[Row] {
        match section {
            Section::Upper => &self.upper,
            Section::Lower => &self.lower,
        }
    }

    /// Unknown names are treated as plain editable rows.
    pub fn descriptor(&self, section: Section, name: &str) -> RowDescriptor {
        self.index
            .get(&(section, name.to_string()))
            .copied()
            .unwrap_or(RowDescriptor::EDITABLE)
    }

    pub fn contains(&self, section: Section, name: &str) -> bool {
        self.index.contains_key(&(section, name.to_string()))
    }

    pub fn rows(&self) -> impl Iterator<Item = (Section, &Row)> {
        self.upper
            .iter()
            .map(|row| (Section::Upper, row))
            .chain(self.lower.iter().map(|row| (Section::Lower, row)))
    }

    /// Editable category names in display order.
    pub fn editable_names(&self) -> Vec<&str> {
        self.rows()
            .filter(|(_, row)| row.descriptor.is_editable())
            .map(|(_, row)| row.category.name.as_str())
            .collect()
    }

    fn push(&mut self, section: Section, category: &Category, descriptor: RowDescriptor) {
        self.index.insert((section, category.name.clone()), descriptor);
        let row = Row {
            category: category.clone(),
            descriptor,
        };
        match section {
            Section::Upper => self.upper.push(row),
            Section::Lower => self.lower.push(row),
        }
    }
}

pub fn build_rows(variant: &GameVariant, params: &VariantParameters) -> RowConfig {
    let mut config = RowConfig::default();
    for category in &variant.upper {
        config.push(
            Section::Upper,
            category,
            describe(variant.kind, category.role),
        );
    }
    for category in variant
        .lower
        .iter()
        .filter(|category| is_playable(category, params))
    {
        config.push(
            Section::Lower,
            category,
            describe(variant.kind, category.role),
        );
    }
    config
}

fn describe(kind: VariantKind, role: CategoryRole) -> RowDescriptor {
    match role {
        CategoryRole::Editable => RowDescriptor::EDITABLE,
        CategoryRole::UpperSubtotal => {
            RowDescriptor::computed(Aggregate::UpperTotal, RowClass::SectionSubtotal)
        }
        CategoryRole::Bonus => RowDescriptor::computed(Aggregate::Bonus, RowClass::Bonus),
        CategoryRole::GrandTotal => match kind {
            VariantKind::Dice => {
                RowDescriptor::computed(Aggregate::GrandTotal, RowClass::GrandTotal)
            }
            VariantKind::Holes => {
                RowDescriptor::computed(Aggregate::HoleTotal, RowClass::GrandTotal)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> GameVariant {
        GameVariant::dice(
            "Yatzy",
            vec![
                Category::editable("Ones", Some(6)),
                Category::editable("Sixes", Some(36)),
                Category::computed("TOTAL", CategoryRole::UpperSubtotal),
                Category::computed("BONUS", CategoryRole::Bonus),
            ],
            vec![
                Category::editable("One Pair", Some(12)),
                Category::editable("Three Pairs", Some(33)),
                Category::editable("Two Three of a Kind", Some(33)),
                Category::editable("Royal Straight", Some(21)),
                Category::editable("Chance", Some(36)),
                Category::computed("TOTAL", CategoryRole::GrandTotal),
            ],
        )
    }

    #[test]
    fn marker_matching_is_case_insensitive() {
        assert!(requires_all_dice("THREE PAIRS"));
        assert!(requires_all_dice("2 x 3 ens"));
        assert!(requires_all_dice("Royal"));
        assert!(requires_all_dice("3 par"));
        assert!(!requires_all_dice("Two Pairs"));
        assert!(!requires_all_dice("Small Straight"));
    }

    #[test]
    fn upper_section_descriptors() {
        let rows = build_rows(&sheet(), &VariantParameters::default());
        assert_eq!(
            rows.descriptor(Section::Upper, "Ones"),
            RowDescriptor::EDITABLE
        );
        assert_eq!(
            rows.descriptor(Section::Upper, "TOTAL"),
            RowDescriptor::computed(Aggregate::UpperTotal, RowClass::SectionSubtotal)
        );
        assert_eq!(
            rows.descriptor(Section::Upper, "BONUS"),
            RowDescriptor::computed(Aggregate::Bonus, RowClass::Bonus)
        );
    }

    #[test]
    fn same_name_in_both_sections_keeps_separate_descriptors() {
        let rows = build_rows(&sheet(), &VariantParameters::default());
        assert_eq!(
            rows.descriptor(Section::Lower, "TOTAL"),
            RowDescriptor::computed(Aggregate::GrandTotal, RowClass::GrandTotal)
        );
        assert_eq!(
            rows.descriptor(Section::Upper, "TOTAL").class,
            RowClass::SectionSubtotal
        );
    }

    #[test]
    fn six_dice_rows_present_only_with_six_dice() {
        let six = build_rows(&sheet(), &VariantParameters::default());
        assert_eq!(six.section(Section::Lower).len(), 6);
        assert!(six.contains(Section::Lower, "Three Pairs"));
        assert!(six.contains(Section::Lower, "Royal Straight"));

        let five = build_rows(
            &sheet(),
            &VariantParameters {
                dice_count: 5,
                ..VariantParameters::default()
            },
        );
        let names: Vec<_> = five
            .section(Section::Lower)
            .iter()
            .map(|row| row.category.name.as_str())
            .collect();
        assert_eq!(names, vec!["One Pair", "Chance", "TOTAL"]);
        assert!(!five.contains(Section::Lower, "Two Three of a Kind"));
    }

    #[test]
    fn unknown_names_default_to_editable() {
        let rows = build_rows(&sheet(), &VariantParameters::default());
        assert_eq!(
            rows.descriptor(Section::Lower, "Something New"),
            RowDescriptor::EDITABLE
        );
        assert!(!rows.contains(Section::Lower, "Something New"));
    }

    #[test]
    fn hole_rows_bind_total_to_hole_sum() {
        let variant = GameVariant::mini_golf(4);
        let rows = build_rows(&variant, &VariantParameters::default());
        assert_eq!(rows.section(Section::Upper).len(), 5);
        assert_eq!(
            rows.descriptor(Section::Upper, "Hole 3"),
            RowDescriptor::EDITABLE
        );
        assert_eq!(
            rows.descriptor(Section::Upper, "TOTAL"),
            RowDescriptor::computed(Aggregate::HoleTotal, RowClass::GrandTotal)
        );
        assert_eq!(
            rows.editable_names(),
            vec!["Hole 1", "Hole 2", "Hole 3", "Hole 4"]
        );
    }

    #[test]
    fn descriptor_values_come_from_calculator() {
        let variant = sheet();
        let params = VariantParameters::default();
        let rows = build_rows(&variant, &params);
        let calc = ScoreCalculator::new(&variant, &params);
        let player = Player::new("1", "Player 1")
            .with_score("Ones", Some(4))
            .with_score("Chance", Some(20));
        let subtotal = rows.descriptor(Section::Upper, "TOTAL");
        let grand = rows.descriptor(Section::Lower, "TOTAL");
        assert_eq!(subtotal.value(&calc, &player), Some(4));
        assert_eq!(grand.value(&calc, &player), Some(24));
        assert_eq!(RowDescriptor::EDITABLE.value(&calc, &player), None);
    }
}
