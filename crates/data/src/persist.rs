use crate::store::{KeyValueStore, StoreError};
use scoresheet_core::{GameVariant, Player, Roster, Session, VariantChoice, VariantParameters};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

pub const PLAYERS_KEY: &str = "yatzy-players";
pub const SETTINGS_KEY: &str = "yatzy-settings";
pub const VARIANT_KEY: &str = "yatzy-variant";
pub const HIDE_TOTALS_KEY: &str = "yatzy-hide-totals";

/// Rebuild a session from the store. Each key falls back to its default on
/// its own; the returned strings describe what was discarded.
pub fn restore_session(store: &dyn KeyValueStore, sheet: GameVariant) -> (Session, Vec<String>) {
    let mut warnings = Vec::new();
    let mut session = Session::new(sheet);

    if let Some(players) = read_key::<Vec<Player>>(store, PLAYERS_KEY, &mut warnings) {
        match restore_roster(players) {
            Ok(roster) => session.roster = roster,
            Err(err) => warnings.push(format!("discarding {PLAYERS_KEY}: {err}")),
        }
    }
    if let Some(params) = read_key::<VariantParameters>(store, SETTINGS_KEY, &mut warnings) {
        session.params = params.sanitized();
    }
    if let Some(choice) = read_key::<VariantChoice>(store, VARIANT_KEY, &mut warnings) {
        session.choice = choice;
    }
    if let Some(hide) = read_key::<bool>(store, HIDE_TOTALS_KEY, &mut warnings) {
        session.hide_totals = hide;
    }
    (session, warnings)
}

/// Write every persisted key.
pub fn persist_session(store: &mut dyn KeyValueStore, session: &Session) -> Vec<String> {
    let mut warnings = Vec::new();
    write_key(store, PLAYERS_KEY, session.roster.players(), &mut warnings);
    write_key(store, SETTINGS_KEY, &session.params, &mut warnings);
    write_key(store, VARIANT_KEY, &session.choice, &mut warnings);
    write_key(store, HIDE_TOTALS_KEY, &session.hide_totals, &mut warnings);
    warnings
}

/// Write only the keys whose value differs between two snapshots.
pub fn persist_changes(
    store: &mut dyn KeyValueStore,
    before: &Session,
    after: &Session,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if before.roster != after.roster {
        write_key(store, PLAYERS_KEY, after.roster.players(), &mut warnings);
    }
    if before.params != after.params {
        write_key(store, SETTINGS_KEY, &after.params, &mut warnings);
    }
    if before.choice != after.choice {
        write_key(store, VARIANT_KEY, &after.choice, &mut warnings);
    }
    if before.hide_totals != after.hide_totals {
        write_key(store, HIDE_TOTALS_KEY, &after.hide_totals, &mut warnings);
    }
    warnings
}

fn restore_roster(players: Vec<Player>) -> Result<Roster, String> {
    let mut ids = HashSet::new();
    for player in &players {
        if player.id.trim().is_empty() {
            return Err("player with empty id".to_string());
        }
        if !ids.insert(player.id.as_str()) {
            return Err(format!("duplicate player id {}", player.id));
        }
    }
    let players = players
        .into_iter()
        .map(|player| player.with_name(&player.name))
        .collect();
    Ok(Roster::from_players(players))
}

fn read_key<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let value = store.load(key)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warnings.push(format!("discarding {key}: {err}"));
            None
        }
    }
}

fn write_key<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
    warnings: &mut Vec<String>,
) {
    let result = serde_json::to_value(value)
        .map_err(StoreError::from)
        .and_then(|json| store.save(key, json));
    if let Err(err) = result {
        warnings.push(format!("save {key} failed: {err}"));
    }
}
