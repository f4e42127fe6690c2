use crate::{
    RowClass, RowDescriptor, ScoreBreakdown, Section, Session, VariantChoice, VariantKind,
    VariantParameters,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlayerHeader {
    pub id: String,
    pub name: String,
    /// `None` while totals are hidden, so serialized state carries no sums.
    pub totals: Option<ScoreBreakdown>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CellView {
    pub player_id: String,
    /// Entered score for editable rows, computed value otherwise. `None` is an
    /// unset cell or a hidden total.
    pub value: Option<i64>,
    pub editable: bool,
    pub hidden: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RowView {
    pub name: String,
    pub max_point: Option<u32>,
    pub descriptor: RowDescriptor,
    pub cells: Vec<CellView>,
}

impl RowView {
    pub fn class(&self) -> RowClass {
        self.descriptor.class
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SectionView {
    pub section: Section,
    pub title: String,
    pub rows: Vec<RowView>,
}

/// Everything a front end needs to draw one frame of the sheet.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SheetView {
    pub title: String,
    pub variant: VariantChoice,
    pub params: VariantParameters,
    pub hide_totals: bool,
    pub can_remove_player: bool,
    pub players: Vec<PlayerHeader>,
    pub sections: Vec<SectionView>,
}

impl SheetView {
    pub fn build(session: &Session) -> Self {
        let variant = session.active_variant();
        let rows = session.rows();
        let calc = session.calculator();
        let players = session.roster.players();

        let sections = [Section::Upper, Section::Lower]
            .into_iter()
            .filter(|section| !rows.section(*section).is_empty())
            .map(|section| SectionView {
                section,
                title: section_title(variant.kind, section, &variant.title),
                rows: rows
                    .section(section)
                    .iter()
                    .map(|row| RowView {
                        name: row.category.name.clone(),
                        max_point: row.category.max_point,
                        descriptor: row.descriptor,
                        cells: players
                            .iter()
                            .map(|player| {
                                let computed = row.descriptor.value(&calc, player);
                                let hidden = computed.is_some() && session.hide_totals;
                                CellView {
                                    player_id: player.id.clone(),
                                    value: if hidden {
                                        None
                                    } else {
                                        computed.or_else(|| player.entry(&row.category.name))
                                    },
                                    editable: row.descriptor.is_editable(),
                                    hidden,
                                }
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: variant.title.clone(),
            variant: session.choice,
            params: session.params,
            hide_totals: session.hide_totals,
            can_remove_player: session.roster.can_remove_player(),
            players: players
                .iter()
                .map(|player| PlayerHeader {
                    id: player.id.clone(),
                    name: player.name.clone(),
                    totals: (!session.hide_totals).then(|| calc.breakdown(player)),
                })
                .collect(),
            sections,
        }
    }
}

fn section_title(kind: VariantKind, section: Section, variant_title: &str) -> String {
    match (kind, section) {
        (VariantKind::Holes, _) => variant_title.to_string(),
        (VariantKind::Dice, Section::Upper) => "Upper Section".to_string(),
        (VariantKind::Dice, Section::Lower) => "Lower Section".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, CategoryRole, GameVariant, SessionAction};

    fn session() -> Session {
        Session::new(GameVariant::dice(
            "Yatzy",
            vec![
                Category::editable("Ones", Some(6)),
                Category::computed("TOTAL", CategoryRole::UpperSubtotal),
            ],
            vec![
                Category::editable("Chance", Some(36)),
                Category::computed("Grand Total", CategoryRole::GrandTotal),
            ],
        ))
        .apply(&SessionAction::SetScore {
            player_id: "1".to_string(),
            category: "Ones".to_string(),
            value: "3".to_string(),
        })
        .expect("score")
    }

    #[test]
    fn cells_show_entries_and_computed_values() {
        let view = SheetView::build(&session());
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.sections[0].title, "Upper Section");
        let ones = &view.sections[0].rows[0];
        assert_eq!(ones.cells[0].value, Some(3));
        assert!(ones.cells[0].editable);
        assert_eq!(ones.cells[1].value, None);
        let total = &view.sections[0].rows[1];
        assert_eq!(total.class(), RowClass::SectionSubtotal);
        assert_eq!(total.cells[0].value, Some(3));
        assert!(!total.cells[0].editable);
        assert_eq!(view.players[0].totals.map(|t| t.grand_total), Some(3));
    }

    #[test]
    fn hidden_totals_mask_only_computed_cells() {
        let session = session()
            .apply(&SessionAction::ToggleHideTotals)
            .expect("toggle");
        let view = SheetView::build(&session);
        let ones = &view.sections[0].rows[0];
        assert_eq!(ones.cells[0].value, Some(3));
        assert!(!ones.cells[0].hidden);
        let total = &view.sections[0].rows[1];
        assert_eq!(total.cells[0].value, None);
        assert!(total.cells[0].hidden);
        assert_eq!(view.players[0].totals, None);
    }

    #[test]
    fn mini_golf_view_has_single_section() {
        let session = session()
            .apply(&SessionAction::SelectVariant {
                variant: VariantChoice::MiniGolf,
            })
            .expect("variant");
        let view = SheetView::build(&session);
        assert_eq!(view.title, "Mini Golf - 9 holes");
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].title, "Mini Golf - 9 holes");
        assert_eq!(view.sections[0].rows.len(), 10);
    }
}
