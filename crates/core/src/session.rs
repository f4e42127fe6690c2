use crate::{
    build_rows, GameVariant, RowConfig, Roster, ScoreCalculator, SessionError, VariantChoice,
    VariantParameters,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Partial settings change; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub dice_count: Option<u8>,
    #[serde(default)]
    pub bonus_threshold: Option<i64>,
    #[serde(default)]
    pub bonus_points: Option<i64>,
    #[serde(default)]
    pub holes: Option<u32>,
}

impl SettingsUpdate {
    pub fn apply_to(self, params: VariantParameters) -> VariantParameters {
        VariantParameters {
            dice_count: self.dice_count.unwrap_or(params.dice_count),
            bonus_threshold: self.bonus_threshold.unwrap_or(params.bonus_threshold),
            bonus_points: self.bonus_points.unwrap_or(params.bonus_points),
            holes: self.holes.unwrap_or(params.holes),
        }
        .sanitized()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionAction {
    AddPlayer,
    RemovePlayer,
    RenamePlayer {
        player_id: String,
        name: String,
    },
    SetScore {
        player_id: String,
        category: String,
        value: String,
    },
    ResetGame,
    ToggleHideTotals,
    SelectVariant {
        variant: VariantChoice,
    },
    UpdateSettings {
        #[serde(flatten)]
        settings: SettingsUpdate,
    },
}

/// Top-level application state. Actions produce a new session; the old one
/// stays valid until the caller swaps it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub sheet: GameVariant,
    pub choice: VariantChoice,
    pub params: VariantParameters,
    pub roster: Roster,
    pub hide_totals: bool,
}

impl Session {
    pub fn new(sheet: GameVariant) -> Self {
        Self {
            sheet,
            choice: VariantChoice::default(),
            params: VariantParameters::default(),
            roster: Roster::default(),
            hide_totals: false,
        }
    }

    pub fn active_variant(&self) -> Cow<'_, GameVariant> {
        match self.choice {
            VariantChoice::Yatzy => Cow::Borrowed(&self.sheet),
            VariantChoice::MiniGolf => Cow::Owned(GameVariant::mini_golf(self.params.holes)),
        }
    }

    pub fn rows(&self) -> RowConfig {
        build_rows(&self.active_variant(), &self.params)
    }

    pub fn calculator(&self) -> ScoreCalculator {
        ScoreCalculator::new(&self.active_variant(), &self.params)
    }

    pub fn apply(&self, action: &SessionAction) -> Result<Self, SessionError> {
        let next = match action {
            SessionAction::AddPlayer => self.with_roster(self.roster.add_player()),
            SessionAction::RemovePlayer => self.with_roster(self.roster.remove_latest_player()),
            SessionAction::RenamePlayer { player_id, name } => {
                self.with_roster(self.roster.rename_player(player_id, name)?)
            }
            SessionAction::SetScore {
                player_id,
                category,
                value,
            } => {
                self.ensure_editable(category)?;
                self.with_roster(self.roster.update_score(player_id, category, value)?)
            }
            SessionAction::ResetGame => self.with_roster(self.roster.reset()),
            SessionAction::ToggleHideTotals => Self {
                hide_totals: !self.hide_totals,
                ..self.clone()
            },
            SessionAction::SelectVariant { variant } => Self {
                choice: *variant,
                ..self.clone()
            },
            SessionAction::UpdateSettings { settings } => Self {
                params: settings.apply_to(self.params),
                ..self.clone()
            },
        };
        Ok(next)
    }

    /// Scores may only land on rows the active sheet shows as editable.
    fn ensure_editable(&self, category: &str) -> Result<(), SessionError> {
        let editable = self
            .rows()
            .rows()
            .any(|(_, row)| row.descriptor.is_editable() && row.category.name == category);
        if editable {
            Ok(())
        } else {
            Err(SessionError::UnknownCategory(category.to_string()))
        }
    }

    fn with_roster(&self, roster: Roster) -> Self {
        Self {
            roster,
            ..self.clone()
        }
    }
}
