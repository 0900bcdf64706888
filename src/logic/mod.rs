//! Tracker business logic: setup, losses, admin actions, leaderboard, views.

mod admin;
mod export;
mod leaderboard;
mod losses;
mod setup;
mod view;

use serde::Serialize;

pub use admin::{authorize_admin, reset_all_scores, reset_player_password};
pub use export::scoreboard_csv;
pub use leaderboard::{leaderboard, leaderboard_text, monthly_leaderboard, LeaderboardEntry};
pub use losses::{loss_date, record_loss};
pub use setup::{
    reconcile_players, setup_slots, SavePlan, SetupSubmission, SlotInput, SlotPrefill, SETUP_SLOTS,
};
pub use view::{color_options, scoreboard_rows, select_view, AppView, ColorOption, ScoreboardRow};

/// How a prompt-driven flow ended when it did not fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowOutcome {
    Done,
    /// The user dismissed a prompt or declined the confirmation. Nothing changed.
    Cancelled,
}
