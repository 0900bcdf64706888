//! Player and PlayerColor data structures.

use crate::models::credential::Credential;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board color of a player. Colors are unique, so they double as the player key.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
}

impl PlayerColor {
    /// All colors in the order the setup form offers them.
    pub const ALL: [PlayerColor; 5] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Orange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Orange => "orange",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the five colors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownColor(pub String);

impl fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown color '{}'", self.0)
    }
}

impl std::error::Error for UnknownColor {}

impl FromStr for PlayerColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PlayerColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownColor(wanted.to_string()))
    }
}

/// A persisted player record. Field names match the stored JSON document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub team: String,
    pub color: PlayerColor,
    #[serde(default)]
    pub losses: u32,
    /// Loss dates, oldest first. The store drops empty arrays, hence the default.
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub pass_salt: String,
    #[serde(default)]
    pub pass_hash: String,
}

impl Player {
    /// Create a player with no losses and no password.
    pub fn new(name: impl Into<String>, team: impl Into<String>, color: PlayerColor) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            color,
            losses: 0,
            dates: Vec::new(),
            pass_salt: String::new(),
            pass_hash: String::new(),
        }
    }

    /// The stored password, if both halves are present.
    pub fn credential(&self) -> Option<Credential> {
        if self.pass_salt.is_empty() || self.pass_hash.is_empty() {
            return None;
        }
        Some(Credential {
            salt: self.pass_salt.clone(),
            hash: self.pass_hash.clone(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    pub fn set_credential(&mut self, credential: Credential) {
        self.pass_salt = credential.salt;
        self.pass_hash = credential.hash;
    }

    /// Record a loss on the given (already formatted) date.
    pub fn add_loss(&mut self, date: impl Into<String>) {
        self.losses += 1;
        self.dates.push(date.into());
    }

    /// Zero the loss counter and forget every loss date.
    pub fn reset_score(&mut self) {
        self.losses = 0;
        self.dates.clear();
    }

    /// Whether there is exactly one date per recorded loss.
    pub fn dates_consistent(&self) -> bool {
        self.dates.len() == self.losses as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parses_case_insensitively() {
        assert_eq!(" Red ".parse::<PlayerColor>(), Ok(PlayerColor::Red));
        assert_eq!("ORANGE".parse::<PlayerColor>(), Ok(PlayerColor::Orange));
        assert!("".parse::<PlayerColor>().is_err());
        assert!("purple".parse::<PlayerColor>().is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let p: Player = serde_json::from_str(r#"{"name":"A","color":"green","losses":0}"#).unwrap();
        assert_eq!(p.team, "");
        assert!(p.dates.is_empty());
        assert!(!p.has_credential());
    }

    #[test]
    fn serializes_with_stored_key_names() {
        let mut p = Player::new("A", "", PlayerColor::Blue);
        p.pass_salt = "ab".into();
        p.pass_hash = "cd".into();
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["color"], "blue");
        assert_eq!(v["passSalt"], "ab");
        assert_eq!(v["passHash"], "cd");
    }

    #[test]
    fn add_loss_keeps_dates_in_step() {
        let mut p = Player::new("A", "", PlayerColor::Red);
        p.add_loss("1/2/2026");
        assert_eq!(p.losses, 1);
        assert!(p.dates_consistent());
        p.reset_score();
        assert_eq!(p.losses, 0);
        assert!(p.dates.is_empty());
    }
}
