use crate::{parse_score_input, Player, SessionError};
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 2;

/// Ordered player list. Every operation returns a new roster; the receiver is
/// never modified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            players: (1..=MIN_PLAYERS)
                .map(|n| Player::new(n.to_string(), default_player_name(n)))
                .collect(),
        }
    }
}

impl Roster {
    /// Rosters restored from storage may be short; top them up with default
    /// players so the minimum holds.
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut roster = Self { players };
        while roster.players.len() < MIN_PLAYERS {
            roster = roster.add_player();
        }
        roster
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn can_remove_player(&self) -> bool {
        self.players.len() > MIN_PLAYERS
    }

    pub fn add_player(&self) -> Self {
        let mut players = self.players.clone();
        players.push(Player::new(
            self.next_id(),
            default_player_name(self.players.len() + 1),
        ));
        Self { players }
    }

    /// Drops the most recently added player. Below the minimum this is a no-op.
    pub fn remove_latest_player(&self) -> Self {
        if !self.can_remove_player() {
            return self.clone();
        }
        let mut players = self.players.clone();
        players.pop();
        Self { players }
    }

    pub fn rename_player(&self, id: &str, name: &str) -> Result<Self, SessionError> {
        self.replace_player(id, |player| player.with_name(name))
    }

    pub fn update_score(
        &self,
        id: &str,
        category: &str,
        raw: &str,
    ) -> Result<Self, SessionError> {
        let value = parse_score_input(raw)?;
        self.set_score(id, category, value)
    }

    pub fn set_score(
        &self,
        id: &str,
        category: &str,
        value: Option<i64>,
    ) -> Result<Self, SessionError> {
        self.replace_player(id, |player| player.with_score(category, value))
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }

    fn replace_player(
        &self,
        id: &str,
        update: impl FnOnce(&Player) -> Player,
    ) -> Result<Self, SessionError> {
        let idx = self
            .players
            .iter()
            .position(|player| player.id == id)
            .ok_or_else(|| SessionError::UnknownPlayer(id.to_string()))?;
        let mut players = self.players.clone();
        players[idx] = update(&self.players[idx]);
        Ok(Self { players })
    }

    fn next_id(&self) -> String {
        let highest = self
            .players
            .iter()
            .filter_map(|player| player.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let mut candidate = highest + 1;
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}

pub fn default_player_name(position: usize) -> String {
    format!("Player {position}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_has_two_named_players() {
        let roster = Roster::default();
        let names: Vec<_> = roster.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Player 1", "Player 2"]);
        assert_eq!(roster.players()[0].id, "1");
        assert!(roster.players().iter().all(|p| p.scores.is_empty()));
    }

    #[test]
    fn cannot_remove_below_minimum() {
        let roster = Roster::default();
        assert!(!roster.can_remove_player());
        let after = roster.remove_latest_player();
        assert_eq!(after, roster);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn add_then_remove_is_last_in_first_out() {
        let roster = Roster::default().add_player().add_player().add_player();
        assert_eq!(roster.len(), 5);
        let newest = roster.players()[4].clone();
        assert_eq!(newest.name, "Player 5");

        let after = roster.remove_latest_player();
        assert_eq!(after.len(), 4);
        assert!(after.get(&newest.id).is_none());
        assert_eq!(after.players(), &roster.players()[..4]);
    }

    #[test]
    fn new_ids_are_unique() {
        let roster = Roster::default()
            .add_player()
            .remove_latest_player()
            .add_player()
            .add_player();
        let mut ids: Vec<_> = roster.players().iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn update_score_replaces_only_target_player() {
        let roster = Roster::default();
        let next = roster.update_score("2", "Ones", "3").expect("score");
        assert_eq!(next.get("2").and_then(|p| p.entry("Ones")), Some(3));
        assert_eq!(next.get("1"), roster.get("1"));
        assert!(roster.get("2").map(|p| p.scores.is_empty()).unwrap_or(false));

        let cleared = next.update_score("2", "Ones", "").expect("clear");
        assert_eq!(cleared.get("2").and_then(|p| p.entry("Ones")), None);
    }

    #[test]
    fn bad_input_and_unknown_players_are_rejected() {
        let roster = Roster::default();
        assert!(matches!(
            roster.update_score("1", "Ones", "x"),
            Err(SessionError::InvalidScore(_))
        ));
        assert_eq!(
            roster.rename_player("9", "Nobody"),
            Err(SessionError::UnknownPlayer("9".to_string()))
        );
    }

    #[test]
    fn short_restored_rosters_are_topped_up() {
        let roster = Roster::from_players(vec![Player::new("7", "Solo")]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.players()[1].id, "8");
        assert_eq!(roster.players()[1].name, "Player 2");
    }

    #[test]
    fn reset_restores_defaults() {
        let roster = Roster::default()
            .add_player()
            .update_score("1", "Ones", "4")
            .expect("score");
        assert_eq!(roster.reset(), Roster::default());
    }
}
