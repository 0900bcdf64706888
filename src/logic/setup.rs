//! Setup phase: pre-fill the player form and reconcile a submitted form with what is stored.

use crate::error::{Result, TrackerError};
use crate::models::{Credential, Player, PlayerColor, Scoreboard, MAX_PLAYERS};
use serde::{Deserialize, Serialize};

/// Number of rows the setup form always shows.
pub const SETUP_SLOTS: usize = MAX_PLAYERS;

/// One row of the setup form as it is shown (never carries a password).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SlotPrefill {
    pub name: String,
    pub team: String,
    pub color: Option<PlayerColor>,
    /// A password is already stored, so the password field may stay empty.
    pub has_password: bool,
}

/// One row of the setup form as it is submitted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SlotInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team: String,
    /// Raw select value; empty means "Select Color".
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub password: String,
}

/// The whole setup form. Admin fields only matter while no admin password exists.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SetupSubmission {
    pub slots: Vec<SlotInput>,
    #[serde(default)]
    pub admin_password: String,
    #[serde(default)]
    pub admin_confirm: String,
}

/// What a valid submission turns into: the full collection and, on first save, the admin credential.
#[derive(Clone, Debug)]
pub struct SavePlan {
    pub players: Scoreboard,
    pub new_admin: Option<Credential>,
}

/// Rows for the setup form, pre-filled in slot order from the stored players.
pub fn setup_slots(previous: Option<&Scoreboard>) -> Vec<SlotPrefill> {
    let mut slots: Vec<SlotPrefill> = previous
        .into_iter()
        .flat_map(|board| board.iter())
        .take(SETUP_SLOTS)
        .map(|p| SlotPrefill {
            name: p.name.clone(),
            team: p.team.clone(),
            color: Some(p.color),
            has_password: p.has_credential(),
        })
        .collect();
    slots.resize_with(SETUP_SLOTS, SlotPrefill::default);
    slots
}

/// Validate a submission against the stored players and build the collection to write.
///
/// 1. Every slot needs a name and a color; colors must not repeat.
/// 2. Stored players are matched by color; losses, dates and password carry forward.
/// 3. A non-empty password replaces the stored one; a player with none must get one now.
/// 4. With no admin password stored, the two admin fields must be filled and equal.
pub fn reconcile_players(
    previous: Option<&Scoreboard>,
    admin_exists: bool,
    submission: &SetupSubmission,
) -> Result<SavePlan> {
    if submission.slots.is_empty() {
        return Err(TrackerError::validation("Please fill all names and colors!"));
    }
    if submission.slots.len() > MAX_PLAYERS {
        return Err(TrackerError::validation(format!(
            "At most {} players can be saved",
            MAX_PLAYERS
        )));
    }

    let mut players = Vec::with_capacity(submission.slots.len());
    for slot in &submission.slots {
        let name = slot.name.trim();
        let color_raw = slot.color.trim();
        if name.is_empty() || color_raw.is_empty() {
            return Err(TrackerError::validation("Please fill all names and colors!"));
        }
        let color: PlayerColor = color_raw
            .parse()
            .map_err(|e: crate::models::UnknownColor| TrackerError::validation(e.to_string()))?;
        if players.iter().any(|p: &Player| p.color == color) {
            return Err(TrackerError::validation(format!(
                "Color {} is chosen for more than one player",
                color
            )));
        }

        let mut player = Player::new(name, slot.team.trim(), color);
        let prior = previous.and_then(|board| board.get(color));
        if let Some(prior) = prior {
            player.losses = prior.losses;
            player.dates = prior.dates.clone();
        }
        let credential = match (prior.and_then(Player::credential), slot.password.is_empty()) {
            (_, false) => Credential::new(&slot.password),
            (Some(existing), true) => existing,
            (None, true) => {
                return Err(TrackerError::validation(format!(
                    "Please set a password for {}",
                    name
                )))
            }
        };
        player.set_credential(credential);
        players.push(player);
    }

    let new_admin = if admin_exists {
        None
    } else {
        Some(new_admin_credential(
            &submission.admin_password,
            &submission.admin_confirm,
        )?)
    };

    let players = Scoreboard::from_players(players)
        .map_err(|e| TrackerError::validation(e.to_string()))?;
    Ok(SavePlan { players, new_admin })
}

fn new_admin_credential(password: &str, confirm: &str) -> Result<Credential> {
    if password.is_empty() || confirm.is_empty() {
        return Err(TrackerError::validation(
            "Please set an admin password (and confirm it) to finish setup",
        ));
    }
    if password != confirm {
        return Err(TrackerError::validation("Admin passwords do not match"));
    }
    Ok(Credential::new(password))
}
