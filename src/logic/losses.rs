//! Recording a loss behind the losing player's password.

use crate::error::{Result, TrackerError};
use crate::logic::FlowOutcome;
use crate::models::{PlayerColor, Scoreboard};
use chrono::{Datelike, NaiveDate};

/// Short date as the page has always shown it, e.g. `10/19/2026`.
pub fn loss_date(day: NaiveDate) -> String {
    format!("{}/{}/{}", day.month(), day.day(), day.year())
}

/// Record one loss for `color` dated `day`, if `answer` is that player's password.
///
/// `answer == None` means the prompt was cancelled: nothing happens.
/// On a wrong password the board is left untouched.
pub fn record_loss(
    board: &mut Scoreboard,
    color: PlayerColor,
    answer: Option<&str>,
    day: NaiveDate,
) -> Result<FlowOutcome> {
    let player = board
        .get_mut(color)
        .ok_or(TrackerError::PlayerNotFound(color))?;
    let credential = player
        .credential()
        .ok_or(TrackerError::MissingCredential(color))?;
    let Some(password) = answer else {
        return Ok(FlowOutcome::Cancelled);
    };
    if !credential.verify(password) {
        log::warn!("Wrong password for {} ({})", player.name, color);
        return Err(TrackerError::AuthFailed(format!(
            "Wrong password for {}",
            player.name
        )));
    }
    player.add_loss(loss_date(day));
    log::info!("Recorded loss #{} for {} ({})", player.losses, player.name, color);
    Ok(FlowOutcome::Done)
}
