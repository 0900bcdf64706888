//! Application service: loads state from a store, runs one flow, writes the result back.

use crate::error::{Result, TrackerError};
use crate::logic::{
    self, color_options, scoreboard_rows, select_view, setup_slots, AppView, ColorOption,
    FlowOutcome, LeaderboardEntry, ScoreboardRow, SetupSubmission, SlotPrefill,
};
use crate::models::{PlayerColor, Scoreboard};
use crate::store::{self, Store};
use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;

/// Everything the page needs to render either screen. Credentials are left out.
#[derive(Clone, Debug, Serialize)]
pub struct PageState {
    pub view: AppView,
    pub admin_configured: bool,
    pub setup_slots: Vec<SlotPrefill>,
    pub rows: Vec<ScoreboardRow>,
    pub options: Vec<ColorOption>,
    /// Set when the store could not be read; the page falls back to setup.
    pub error: Option<String>,
}

/// Result of a mutation flow: how it ended and the collection as it now stands.
#[derive(Clone, Debug)]
pub struct FlowResult {
    pub outcome: FlowOutcome,
    pub players: Scoreboard,
}

/// Tracker state shared by all requests. Mutations run one at a time.
pub struct Tracker<S> {
    store: S,
    gate: Mutex<()>,
}

impl<S: Store> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored players, if any.
    pub async fn players(&self) -> Result<Option<Scoreboard>> {
        Ok(store::load_players(&self.store).await?)
    }

    pub async fn admin_configured(&self) -> Result<bool> {
        Ok(store::load_admin(&self.store).await?.is_some())
    }

    /// Build the page state. A failing store is logged and shown as the setup screen.
    pub async fn page_state(&self) -> PageState {
        let _gate = self.gate.lock().await;
        let loaded = async {
            let players = store::load_players(&self.store).await?;
            let admin = store::load_admin(&self.store).await?;
            Ok::<_, store::StoreError>((players, admin.is_some()))
        }
        .await;
        match loaded {
            Ok((players, admin_configured)) => {
                let board = players.as_ref();
                PageState {
                    view: select_view(board),
                    admin_configured,
                    setup_slots: setup_slots(board),
                    rows: board.map(scoreboard_rows).unwrap_or_default(),
                    options: board.map(color_options).unwrap_or_default(),
                    error: None,
                }
            }
            Err(e) => {
                log::error!("Error fetching data: {}", e);
                // Pre-fill what can still be read so the form can overwrite bad data.
                let repairable = store::load_players_lenient(&self.store).await.ok().flatten();
                let admin_configured = matches!(store::load_admin(&self.store).await, Ok(Some(_)));
                PageState {
                    view: AppView::Setup,
                    admin_configured,
                    setup_slots: setup_slots(repairable.as_ref()),
                    rows: Vec::new(),
                    options: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Save the setup form. Writes players, then the admin credential if this is the first save.
    ///
    /// A stored collection that repeats a color is read leniently here, so saving the form
    /// replaces it instead of failing.
    pub async fn save_players(&self, submission: &SetupSubmission) -> Result<Scoreboard> {
        let _gate = self.gate.lock().await;
        let previous = store::load_players_lenient(&self.store).await?;
        let admin_exists = store::load_admin(&self.store).await?.is_some();
        let plan = logic::reconcile_players(previous.as_ref(), admin_exists, submission)?;
        store::save_players(&self.store, &plan.players).await?;
        if let Some(admin) = &plan.new_admin {
            store::save_admin(&self.store, admin).await?;
        }
        Ok(plan.players)
    }

    /// Record a loss for `color` dated today (local time).
    pub async fn record_loss(&self, color: PlayerColor, answer: Option<&str>) -> Result<FlowResult> {
        self.record_loss_on(color, answer, chrono::Local::now().date_naive())
            .await
    }

    /// Record a loss for `color` dated `day`.
    pub async fn record_loss_on(
        &self,
        color: PlayerColor,
        answer: Option<&str>,
        day: NaiveDate,
    ) -> Result<FlowResult> {
        let _gate = self.gate.lock().await;
        let mut players = self.require_players().await?;
        let outcome = logic::record_loss(&mut players, color, answer, day)?;
        if outcome == FlowOutcome::Done {
            store::save_players(&self.store, &players).await?;
        }
        Ok(FlowResult { outcome, players })
    }

    /// Zero all scores. Needs the admin password and an explicit confirmation.
    pub async fn reset_all_scores(&self, answer: Option<&str>, confirmed: bool) -> Result<FlowResult> {
        let _gate = self.gate.lock().await;
        let admin = store::load_admin(&self.store).await?;
        if admin.is_none() {
            return Err(TrackerError::AdminNotConfigured);
        }
        let mut players = self.require_players().await?;
        let outcome = logic::reset_all_scores(&mut players, admin.as_ref(), answer, confirmed)?;
        if outcome == FlowOutcome::Done {
            store::save_players(&self.store, &players).await?;
        }
        Ok(FlowResult { outcome, players })
    }

    /// Replace one player's password. Needs the admin password.
    pub async fn reset_player_password(
        &self,
        answer: Option<&str>,
        color: PlayerColor,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<FlowResult> {
        let _gate = self.gate.lock().await;
        let admin = store::load_admin(&self.store).await?;
        if admin.is_none() {
            return Err(TrackerError::AdminNotConfigured);
        }
        let mut players = self.require_players().await?;
        let outcome = logic::reset_player_password(
            &mut players,
            admin.as_ref(),
            answer,
            color,
            new_password,
            confirm_password,
        )?;
        if outcome == FlowOutcome::Done {
            store::save_players(&self.store, &players).await?;
        }
        Ok(FlowResult { outcome, players })
    }

    /// Overall leaderboard, or the one for `(year, month)`.
    pub async fn leaderboard(&self, month: Option<(i32, u32)>) -> Result<Vec<LeaderboardEntry>> {
        let players = self.players().await?.unwrap_or_default();
        Ok(match month {
            Some((year, month)) => logic::monthly_leaderboard(&players, year, month),
            None => logic::leaderboard(&players),
        })
    }

    pub async fn export_csv(&self) -> Result<String> {
        let players = self.players().await?.unwrap_or_default();
        Ok(logic::scoreboard_csv(&players)?)
    }

    async fn require_players(&self) -> Result<Scoreboard> {
        match store::load_players(&self.store).await? {
            Some(players) if !players.is_empty() => Ok(players),
            _ => Err(TrackerError::validation("No players yet!")),
        }
    }
}
