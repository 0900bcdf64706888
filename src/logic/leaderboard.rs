//! Leaderboard: players ranked by losses, most first.

use crate::models::{PlayerColor, Scoreboard};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One ranked line of the leaderboard.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub color: PlayerColor,
    pub losses: u32,
}

/// Rank every player by total losses. Ties keep slot order (the sort is stable).
pub fn leaderboard(board: &Scoreboard) -> Vec<LeaderboardEntry> {
    rank(board.iter().map(|p| (p.name.clone(), p.color, p.losses)).collect())
}

/// Formats loss dates have been written in, tried in order. Month-first wins when ambiguous.
const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%d/%m/%Y", "%Y-%m-%d", "%d.%m.%Y"];

fn parse_loss_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
}

/// Rank by losses dated in the given month. Dates that do not parse are not counted.
pub fn monthly_leaderboard(board: &Scoreboard, year: i32, month: u32) -> Vec<LeaderboardEntry> {
    rank(
        board
            .iter()
            .map(|p| {
                let in_month = p
                    .dates
                    .iter()
                    .filter_map(|d| parse_loss_date(d))
                    .filter(|d| d.year() == year && d.month() == month)
                    .count();
                (p.name.clone(), p.color, in_month as u32)
            })
            .collect(),
    )
}

fn rank(mut rows: Vec<(String, PlayerColor, u32)>) -> Vec<LeaderboardEntry> {
    rows.sort_by(|a, b| b.2.cmp(&a.2));
    rows.into_iter()
        .enumerate()
        .map(|(i, (name, color, losses))| LeaderboardEntry {
            rank: i + 1,
            name,
            color,
            losses,
        })
        .collect()
}

/// Text block shown when the leaderboard is opened.
pub fn leaderboard_text(entries: &[LeaderboardEntry]) -> String {
    let mut text = String::from("🏆 Monthly Leaderboard:\n\n");
    for e in entries {
        text.push_str(&format!(
            "{}. {} ({}) - Losses: {}\n",
            e.rank, e.name, e.color, e.losses
        ));
    }
    text
}
