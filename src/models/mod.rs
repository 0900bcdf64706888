//! Data structures for the tracker: players, credentials, the scoreboard.

mod credential;
mod player;
mod scoreboard;

pub use credential::{hash_secret, Credential, SALT_BYTES};
pub use player::{Player, PlayerColor, UnknownColor};
pub use scoreboard::{Scoreboard, ScoreboardError, MAX_PLAYERS};
