//! Ludo loss tracker web app: library with models, business logic and store access.

pub mod error;
pub mod logic;
pub mod models;
pub mod store;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use logic::{
    leaderboard, leaderboard_text, monthly_leaderboard, reconcile_players, record_loss,
    reset_all_scores, reset_player_password, scoreboard_csv, select_view, setup_slots, AppView,
    FlowOutcome, LeaderboardEntry, SetupSubmission, SlotInput,
};
pub use models::{Credential, Player, PlayerColor, Scoreboard, ScoreboardError};
pub use store::{FileStore, MemoryStore, Store, StoreError, ADMIN_PATH, PLAYERS_PATH};
pub use tracker::{FlowResult, PageState, Tracker};
