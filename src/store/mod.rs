//! Datastore access: one JSON document per named path, fully replaced on write.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::models::{Credential, Scoreboard};
use serde_json::Value;
use std::future::Future;

/// Path holding the player collection.
pub const PLAYERS_PATH: &str = "ludoPlayers";
/// Path holding the admin credential.
pub const ADMIN_PATH: &str = "admin";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored value is valid JSON but not a valid record.
    #[error("Invalid data at '{path}': {reason}")]
    Decode { path: String, reason: String },

    #[error("{0}")]
    Unavailable(String),
}

/// A remote-style document store. Reads report existence, writes replace the whole value.
pub trait Store: Send + Sync {
    fn read(&self, path: &str) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    fn write(&self, path: &str, value: Value) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Load the player collection. `None` when nothing has been saved yet.
pub async fn load_players<S: Store>(store: &S) -> Result<Option<Scoreboard>, StoreError> {
    match store.read(PLAYERS_PATH).await? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Decode {
                path: PLAYERS_PATH.to_string(),
                reason: e.to_string(),
            }),
    }
}

/// Load the player collection so the setup form can repair it. Players repeating an
/// earlier color are left out and logged.
pub async fn load_players_lenient<S: Store>(store: &S) -> Result<Option<Scoreboard>, StoreError> {
    match store.read(PLAYERS_PATH).await? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let (board, dropped) =
                Scoreboard::decode_lenient(value).map_err(|e| StoreError::Decode {
                    path: PLAYERS_PATH.to_string(),
                    reason: e.to_string(),
                })?;
            for p in &dropped {
                log::warn!("Ignoring stored player {} ({}): color already taken", p.name, p.color);
            }
            Ok(Some(board))
        }
    }
}

/// Replace the stored player collection.
pub async fn save_players<S: Store>(store: &S, players: &Scoreboard) -> Result<(), StoreError> {
    let value = serde_json::to_value(players)?;
    store.write(PLAYERS_PATH, value).await?;
    log::info!("Saved {} player(s)", players.len());
    Ok(())
}

/// Load the admin credential. `None` until the first save of players.
pub async fn load_admin<S: Store>(store: &S) -> Result<Option<Credential>, StoreError> {
    match store.read(ADMIN_PATH).await? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Decode {
                path: ADMIN_PATH.to_string(),
                reason: e.to_string(),
            }),
    }
}

pub async fn save_admin<S: Store>(store: &S, admin: &Credential) -> Result<(), StoreError> {
    let value = serde_json::to_value(admin)?;
    store.write(ADMIN_PATH, value).await?;
    log::info!("Saved admin credential");
    Ok(())
}
