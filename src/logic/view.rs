//! View models for the page: which screen to show, the scoreboard rows, the dropdowns.

use crate::models::{PlayerColor, Scoreboard};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppView {
    Setup,
    Game,
}

/// Setup until there is at least one player and every player has a password.
pub fn select_view(players: Option<&Scoreboard>) -> AppView {
    match players {
        Some(board) if !board.is_empty() && board.all_have_credentials() => AppView::Game,
        _ => AppView::Setup,
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ScoreboardRow {
    pub name: String,
    pub team: Option<String>,
    pub color: PlayerColor,
    pub losses: u32,
    /// Loss dates joined with ", ", or "-" when there are none.
    pub dates: String,
}

pub fn scoreboard_rows(board: &Scoreboard) -> Vec<ScoreboardRow> {
    board
        .iter()
        .map(|p| ScoreboardRow {
            name: p.name.clone(),
            team: (!p.team.is_empty()).then(|| p.team.clone()),
            color: p.color,
            losses: p.losses,
            dates: if p.dates.is_empty() {
                "-".to_string()
            } else {
                p.dates.join(", ")
            },
        })
        .collect()
}

/// An entry of the player dropdowns (loss recording and password reset).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ColorOption {
    pub value: PlayerColor,
    pub label: String,
}

pub fn color_options(board: &Scoreboard) -> Vec<ColorOption> {
    board
        .iter()
        .map(|p| ColorOption {
            value: p.color,
            label: format!("{} ({})", p.name, p.color),
        })
        .collect()
}
