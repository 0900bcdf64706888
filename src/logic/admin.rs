//! Admin-gated actions: reset every score, reset one player's password.

use crate::error::{Result, TrackerError};
use crate::logic::FlowOutcome;
use crate::models::{Credential, PlayerColor, Scoreboard};

/// Check the admin challenge. `Ok(false)` means the prompt was cancelled.
pub fn authorize_admin(admin: Option<&Credential>, answer: Option<&str>) -> Result<bool> {
    let admin = admin.ok_or(TrackerError::AdminNotConfigured)?;
    let Some(password) = answer else {
        return Ok(false);
    };
    if !admin.verify(password) {
        log::warn!("Wrong admin password");
        return Err(TrackerError::AuthFailed("Wrong admin password".to_string()));
    }
    Ok(true)
}

/// Zero every player's losses and dates once the admin is authorized and the reset is confirmed.
pub fn reset_all_scores(
    board: &mut Scoreboard,
    admin: Option<&Credential>,
    answer: Option<&str>,
    confirmed: bool,
) -> Result<FlowOutcome> {
    if !authorize_admin(admin, answer)? || !confirmed {
        return Ok(FlowOutcome::Cancelled);
    }
    for player in board.players_mut() {
        player.reset_score();
    }
    log::info!("Reset scores for {} player(s)", board.len());
    Ok(FlowOutcome::Done)
}

/// Give the player with `color` a new password. Needs the admin password and a matching confirmation.
pub fn reset_player_password(
    board: &mut Scoreboard,
    admin: Option<&Credential>,
    answer: Option<&str>,
    color: PlayerColor,
    new_password: &str,
    confirm_password: &str,
) -> Result<FlowOutcome> {
    if !authorize_admin(admin, answer)? {
        return Ok(FlowOutcome::Cancelled);
    }
    let player = board
        .get_mut(color)
        .ok_or(TrackerError::PlayerNotFound(color))?;
    if new_password.is_empty() || confirm_password.is_empty() {
        return Err(TrackerError::validation("Please enter the new password twice"));
    }
    if new_password != confirm_password {
        return Err(TrackerError::validation("Passwords do not match"));
    }
    player.set_credential(Credential::new(new_password));
    log::info!("Password reset for {} ({})", player.name, color);
    Ok(FlowOutcome::Done)
}
