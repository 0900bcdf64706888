//! The player collection: keyed by color, kept in setup-slot order.

use crate::models::player::{Player, PlayerColor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Most players a board supports (one per color).
pub const MAX_PLAYERS: usize = 5;

/// Why a list of players cannot form a scoreboard.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ScoreboardError {
    #[error("Color {0} is used by more than one player")]
    DuplicateColor(PlayerColor),
    #[error("At most 5 players are supported (got {0})")]
    TooManyPlayers(usize),
}

/// Shapes the stored collection can take. The realtime store may hand back
/// an array as an object keyed by index, and arrays may contain holes.
#[doc(hidden)]
#[derive(Deserialize)]
#[serde(untagged)]
pub enum StoredPlayers {
    List(Vec<Option<Player>>),
    Keyed(HashMap<String, Player>),
}

impl From<StoredPlayers> for Vec<Player> {
    fn from(stored: StoredPlayers) -> Self {
        match stored {
            StoredPlayers::List(list) => list.into_iter().flatten().collect(),
            StoredPlayers::Keyed(map) => {
                let mut entries: Vec<(String, Player)> = map.into_iter().collect();
                entries.sort_by(|(a, _), (b, _)| {
                    (a.parse::<u64>().ok(), a.as_str()).cmp(&(b.parse::<u64>().ok(), b.as_str()))
                });
                entries.into_iter().map(|(_, p)| p).collect()
            }
        }
    }
}

/// All players on the board. Serialized as a JSON array in slot order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredPlayers", into = "Vec<Player>")]
pub struct Scoreboard {
    order: Vec<PlayerColor>,
    players: HashMap<PlayerColor, Player>,
}

impl TryFrom<StoredPlayers> for Scoreboard {
    type Error = ScoreboardError;

    fn try_from(stored: StoredPlayers) -> Result<Self, Self::Error> {
        Scoreboard::from_players(Vec::from(stored))
    }
}

impl From<Scoreboard> for Vec<Player> {
    fn from(board: Scoreboard) -> Self {
        board.into_players()
    }
}

impl Scoreboard {
    /// Build a board from players in slot order. Colors must be unique.
    pub fn from_players(list: Vec<Player>) -> Result<Self, ScoreboardError> {
        if list.len() > MAX_PLAYERS {
            return Err(ScoreboardError::TooManyPlayers(list.len()));
        }
        let mut board = Self::default();
        for player in list {
            let color = player.color;
            if board.players.insert(color, player).is_some() {
                return Err(ScoreboardError::DuplicateColor(color));
            }
            board.order.push(color);
        }
        Ok(board)
    }

    /// Decode a stored collection keeping the first player of each color.
    /// Returns the board and the players that did not fit on it.
    pub fn decode_lenient(value: serde_json::Value) -> Result<(Self, Vec<Player>), serde_json::Error> {
        let stored: StoredPlayers = serde_json::from_value(value)?;
        let mut board = Self::default();
        let mut dropped = Vec::new();
        for player in Vec::from(stored) {
            if board.players.contains_key(&player.color) || board.len() >= MAX_PLAYERS {
                dropped.push(player);
                continue;
            }
            board.order.push(player.color);
            board.players.insert(player.color, player);
        }
        Ok((board, dropped))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, color: PlayerColor) -> Option<&Player> {
        self.players.get(&color)
    }

    pub fn get_mut(&mut self, color: PlayerColor) -> Option<&mut Player> {
        self.players.get_mut(&color)
    }

    /// Players in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> + '_ {
        self.order.iter().filter_map(|c| self.players.get(c))
    }

    /// Every player, in no particular order.
    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> + '_ {
        self.players.values_mut()
    }

    /// Colors in slot order.
    pub fn colors(&self) -> &[PlayerColor] {
        &self.order
    }

    /// True when every player has a stored password.
    pub fn all_have_credentials(&self) -> bool {
        self.players.values().all(Player::has_credential)
    }

    pub fn into_players(mut self) -> Vec<Player> {
        self.order
            .iter()
            .filter_map(|c| self.players.remove(c))
            .collect()
    }
}
