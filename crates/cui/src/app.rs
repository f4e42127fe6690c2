use crate::LaunchOptions;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use scoresheet_core::{
    Section, Session, SessionAction, SettingsUpdate, VariantChoice, VariantParameters,
    MAX_PLAYER_NAME_LENGTH,
};
use scoresheet_data::{
    default_state_path, load_sheet_dir, persist_changes, restore_session, JsonFileStore,
    KeyValueStore, MemoryStore,
};
use std::collections::VecDeque;
use std::path::Path;

const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    DiceCount,
    BonusThreshold,
    BonusPoints,
    Holes,
}

impl SettingField {
    pub fn label(self) -> &'static str {
        match self {
            Self::DiceCount => "Dice (5 or 6)",
            Self::BonusThreshold => "Bonus threshold",
            Self::BonusPoints => "Bonus points",
            Self::Holes => "Holes (1-36)",
        }
    }

    fn for_variant(choice: VariantChoice) -> &'static [SettingField] {
        match choice {
            VariantChoice::Yatzy => &[Self::DiceCount, Self::BonusThreshold, Self::BonusPoints],
            VariantChoice::MiniGolf => &[Self::Holes],
        }
    }

    fn current(self, params: &VariantParameters) -> String {
        match self {
            Self::DiceCount => params.dice_count.to_string(),
            Self::BonusThreshold => params.bonus_threshold.to_string(),
            Self::BonusPoints => params.bonus_points.to_string(),
            Self::Holes => params.holes.to_string(),
        }
    }
}

/// Editable copy of the settings for the active variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub fields: Vec<(SettingField, String)>,
    pub selected: usize,
}

impl SettingsDraft {
    fn new(choice: VariantChoice, params: &VariantParameters) -> Self {
        Self {
            fields: SettingField::for_variant(choice)
                .iter()
                .map(|field| (*field, field.current(params)))
                .collect(),
            selected: 0,
        }
    }

    fn select(&mut self, forward: bool) {
        let len = self.fields.len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    fn input_mut(&mut self) -> Option<&mut String> {
        self.fields.get_mut(self.selected).map(|(_, value)| value)
    }

    pub fn to_update(&self) -> Result<SettingsUpdate, String> {
        let mut update = SettingsUpdate::default();
        for (field, raw) in &self.fields {
            let raw = raw.trim();
            let invalid = || format!("{}: {raw:?} is not a valid number", field.label());
            match field {
                SettingField::DiceCount => {
                    update.dice_count = Some(raw.parse().map_err(|_| invalid())?)
                }
                SettingField::BonusThreshold => {
                    update.bonus_threshold = Some(raw.parse().map_err(|_| invalid())?)
                }
                SettingField::BonusPoints => {
                    update.bonus_points = Some(raw.parse().map_err(|_| invalid())?)
                }
                SettingField::Holes => update.holes = Some(raw.parse().map_err(|_| invalid())?),
            }
        }
        Ok(update)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Score {
        player_id: String,
        category: String,
        input: String,
    },
    Rename {
        player_id: String,
        input: String,
    },
    Settings(SettingsDraft),
    ConfirmReset,
}

pub struct App {
    pub session: Session,
    pub store: Box<dyn KeyValueStore>,
    pub store_label: String,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub prompt: Option<Prompt>,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(options: &LaunchOptions) -> Result<Self> {
        let assets = options
            .assets
            .clone()
            .unwrap_or_else(|| Path::new("assets").to_path_buf());
        let sheet = load_sheet_dir(&assets)
            .with_context(|| format!("load sheet from {}", assets.display()))?;

        let mut notes = Vec::new();
        let (store, store_label): (Box<dyn KeyValueStore>, String) =
            match options.state.clone().or_else(default_state_path) {
                Some(path) => {
                    let mut store = JsonFileStore::open(path);
                    notes.extend(store.take_warning());
                    let label = store.path().display().to_string();
                    (Box::new(store), label)
                }
                None => {
                    notes.push("no state path available, scores are kept in memory".to_string());
                    (Box::new(MemoryStore::new()), "memory".to_string())
                }
            };
        let (session, warnings) = restore_session(store.as_ref(), sheet);
        notes.extend(warnings);

        let mut app = Self::new(session, store, store_label);
        for note in notes {
            app.push_event_line(format!("warning: {note}"));
        }
        Ok(app)
    }

    pub fn new(session: Session, store: Box<dyn KeyValueStore>, store_label: String) -> Self {
        let mut app = Self {
            session,
            store,
            store_label,
            cursor_row: 0,
            cursor_col: 0,
            prompt: None,
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        };
        app.push_event_line(format!("state: {}", app.store_label));
        app
    }

    /// Editable rows in display order; the cursor moves over these only.
    pub fn editable_rows(&self) -> Vec<(Section, String)> {
        self.session
            .rows()
            .rows()
            .filter(|(_, row)| row.descriptor.is_editable())
            .map(|(section, row)| (section, row.category.name.clone()))
            .collect()
    }

    pub fn cursor_target(&self) -> Option<(Section, String)> {
        self.editable_rows().into_iter().nth(self.cursor_row)
    }

    pub fn move_cursor(&mut self, rows: isize, cols: isize) {
        self.cursor_row = self.cursor_row.saturating_add_signed(rows);
        self.cursor_col = self.cursor_col.saturating_add_signed(cols);
        self.normalize_cursors();
    }

    fn normalize_cursors(&mut self) {
        let rows = self.editable_rows().len();
        let cols = self.session.roster.len();
        self.cursor_row = self.cursor_row.min(rows.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(cols.saturating_sub(1));
    }

    fn selected_player_id(&self) -> Option<String> {
        self.session
            .roster
            .players()
            .get(self.cursor_col)
            .map(|player| player.id.clone())
    }

    pub fn begin_score_edit(&mut self, first_digit: Option<char>) {
        let (Some(player_id), Some((_, category))) =
            (self.selected_player_id(), self.cursor_target())
        else {
            self.push_status("no cell selected");
            return;
        };
        let input = match first_digit {
            Some(digit) => digit.to_string(),
            None => self
                .session
                .roster
                .get(&player_id)
                .and_then(|player| player.entry(&category))
                .map(|value| value.to_string())
                .unwrap_or_default(),
        };
        self.prompt = Some(Prompt::Score {
            player_id,
            category,
            input,
        });
    }

    pub fn begin_rename(&mut self) {
        let Some(player) = self.session.roster.players().get(self.cursor_col) else {
            return;
        };
        self.prompt = Some(Prompt::Rename {
            player_id: player.id.clone(),
            input: player.name.clone(),
        });
    }

    pub fn open_settings(&mut self) {
        self.prompt = Some(Prompt::Settings(SettingsDraft::new(
            self.session.choice,
            &self.session.params,
        )));
    }

    pub fn confirm_new_game(&mut self) {
        self.prompt = Some(Prompt::ConfirmReset);
    }

    pub fn remove_player(&mut self) {
        if !self.session.roster.can_remove_player() {
            self.push_status("at least two players are required");
            return;
        }
        self.apply(SessionAction::RemovePlayer);
    }

    /// Run one action against the session. Rejected actions leave the
    /// session untouched and report on the status line.
    pub fn apply(&mut self, action: SessionAction) -> bool {
        let next = match self.session.apply(&action) {
            Ok(next) => next,
            Err(err) => {
                self.push_status(format!("error: {err}"));
                return false;
            }
        };
        let warnings = persist_changes(self.store.as_mut(), &self.session, &next);
        self.session = next;
        self.normalize_cursors();
        let line = describe_action(&action, &self.session);
        self.push_status(line.clone());
        self.push_event_line(line);
        for warning in warnings {
            self.push_event_line(format!("persist warning: {warning}"));
        }
        true
    }

    /// Feed a key to the open prompt. Returns false when no prompt is open.
    pub fn handle_prompt_key(&mut self, key: KeyEvent) -> bool {
        let Some(prompt) = self.prompt.take() else {
            return false;
        };
        if key.code == KeyCode::Esc {
            self.push_status("cancelled");
            return true;
        }
        self.prompt = match prompt {
            Prompt::Score {
                player_id,
                category,
                mut input,
            } => match key.code {
                KeyCode::Enter => {
                    let action = SessionAction::SetScore {
                        player_id: player_id.clone(),
                        category: category.clone(),
                        value: input.clone(),
                    };
                    if self.apply(action) {
                        None
                    } else {
                        Some(Prompt::Score {
                            player_id,
                            category,
                            input,
                        })
                    }
                }
                code => {
                    edit_text(&mut input, code, key.modifiers, usize::MAX);
                    Some(Prompt::Score {
                        player_id,
                        category,
                        input,
                    })
                }
            },
            Prompt::Rename {
                player_id,
                mut input,
            } => match key.code {
                KeyCode::Enter => {
                    self.apply(SessionAction::RenamePlayer {
                        player_id,
                        name: input,
                    });
                    None
                }
                code => {
                    edit_text(&mut input, code, key.modifiers, MAX_PLAYER_NAME_LENGTH);
                    Some(Prompt::Rename { player_id, input })
                }
            },
            Prompt::Settings(mut draft) => match key.code {
                KeyCode::Enter => match draft.to_update() {
                    Ok(settings) => {
                        self.apply(SessionAction::UpdateSettings { settings });
                        None
                    }
                    Err(err) => {
                        self.push_status(err);
                        Some(Prompt::Settings(draft))
                    }
                },
                KeyCode::Up | KeyCode::BackTab => {
                    draft.select(false);
                    Some(Prompt::Settings(draft))
                }
                KeyCode::Down | KeyCode::Tab => {
                    draft.select(true);
                    Some(Prompt::Settings(draft))
                }
                code => {
                    if let Some(input) = draft.input_mut() {
                        edit_text(input, code, key.modifiers, 9);
                    }
                    Some(Prompt::Settings(draft))
                }
            },
            Prompt::ConfirmReset => {
                if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                    self.apply(SessionAction::ResetGame);
                } else {
                    self.push_status("new game cancelled");
                }
                None
            }
        };
        true
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

fn edit_text(input: &mut String, code: KeyCode, modifiers: KeyModifiers, max_len: usize) {
    match code {
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(ch) => {
            if !modifiers.contains(KeyModifiers::CONTROL)
                && !modifiers.contains(KeyModifiers::ALT)
                && input.chars().count() < max_len
            {
                input.push(ch);
            }
        }
        _ => {}
    }
}

fn player_name(session: &Session, player_id: &str) -> String {
    session
        .roster
        .get(player_id)
        .map(|player| player.name.clone())
        .unwrap_or_else(|| player_id.to_string())
}

fn describe_action(action: &SessionAction, session: &Session) -> String {
    match action {
        SessionAction::AddPlayer => match session.roster.players().last() {
            Some(player) => format!("added {}", player.name),
            None => "added player".to_string(),
        },
        SessionAction::RemovePlayer => {
            format!("{} players remain", session.roster.len())
        }
        SessionAction::RenamePlayer { player_id, .. } => {
            format!("renamed to {}", player_name(session, player_id))
        }
        SessionAction::SetScore {
            player_id,
            category,
            value,
        } => {
            let name = player_name(session, player_id);
            if value.trim().is_empty() {
                format!("{name}: cleared {category}")
            } else {
                format!("{name}: {category} = {}", value.trim())
            }
        }
        SessionAction::ResetGame => "new game".to_string(),
        SessionAction::ToggleHideTotals => {
            if session.hide_totals {
                "totals hidden".to_string()
            } else {
                "totals shown".to_string()
            }
        }
        SessionAction::SelectVariant { variant } => format!("playing {}", variant.label()),
        SessionAction::UpdateSettings { .. } => {
            let params = session.params;
            format!(
                "settings: {} dice, bonus {} at {}, {} holes",
                params.dice_count, params.bonus_points, params.bonus_threshold, params.holes
            )
        }
    }
}
