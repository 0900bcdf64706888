//! Integration tests for the store accessors and backends.

use ludo_tracker_web::store::{load_admin, load_players, save_admin, save_players};
use ludo_tracker_web::{
    AppView, Credential, FileStore, MemoryStore, Player, PlayerColor, Scoreboard, Store,
    SetupSubmission, SlotInput, StoreError, Tracker, TrackerError, ADMIN_PATH, PLAYERS_PATH,
};
use std::time::Duration;
use rand::Rng;
use serde_json::{json, Value};

/// A store whose network is down.
struct DownStore;

impl Store for DownStore {
    async fn read(&self, _path: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    async fn write(&self, _path: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

/// Memory store whose admin write takes a while.
#[derive(Default)]
struct SlowAdminStore {
    inner: MemoryStore,
}

impl Store for SlowAdminStore {
    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        self.inner.read(path).await
    }

    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError> {
        if path == ADMIN_PATH {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.inner.write(path, value).await
    }
}

fn sample_board() -> Scoreboard {
    let mut a = Player::new("A", "Team", PlayerColor::Red);
    a.add_loss("1/2/2026");
    a.set_credential(Credential::new("pw"));
    Scoreboard::from_players(vec![a, Player::new("B", "", PlayerColor::Blue)]).unwrap()
}

#[tokio::test]
async fn nothing_stored_reads_as_none() {
    let store = MemoryStore::new();
    assert!(load_players(&store).await.unwrap().is_none());
    assert!(load_admin(&store).await.unwrap().is_none());
    store.insert(PLAYERS_PATH, Value::Null);
    assert!(load_players(&store).await.unwrap().is_none());
}

#[tokio::test]
async fn memory_store_round_trips_players_and_admin() {
    let store = MemoryStore::new();
    let board = sample_board();
    save_players(&store, &board).await.unwrap();
    assert_eq!(load_players(&store).await.unwrap(), Some(board));

    let admin = Credential::new("boss");
    save_admin(&store, &admin).await.unwrap();
    assert_eq!(load_admin(&store).await.unwrap(), Some(admin));
}

#[tokio::test]
async fn reads_collections_stored_as_objects() {
    let store = MemoryStore::new();
    store.insert(
        PLAYERS_PATH,
        json!({
            "1": { "name": "B", "color": "blue", "losses": 0 },
            "0": { "name": "A", "color": "red", "losses": 1, "dates": ["1/1/2026"] }
        }),
    );
    let board = load_players(&store).await.unwrap().unwrap();
    let names: Vec<_> = board.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
}

#[tokio::test]
async fn invalid_collection_is_a_decode_error() {
    let store = MemoryStore::new();
    store.insert(PLAYERS_PATH, json!([{ "name": "A", "color": "purple" }]));
    assert!(matches!(
        load_players(&store).await,
        Err(StoreError::Decode { .. })
    ));
}

#[tokio::test]
async fn file_store_round_trips_and_replaces() {
    let suffix: u64 = rand::thread_rng().gen();
    let dir = std::env::temp_dir().join(format!("ludo-tracker-test-{suffix:x}"));
    let store = FileStore::new(&dir);

    assert!(load_players(&store).await.unwrap().is_none());
    let board = sample_board();
    save_players(&store, &board).await.unwrap();
    assert!(dir.join("ludoPlayers.json").exists());
    assert_eq!(load_players(&store).await.unwrap(), Some(board));

    let single = Scoreboard::from_players(vec![Player::new("Z", "", PlayerColor::Green)]).unwrap();
    save_players(&store, &single).await.unwrap();
    assert_eq!(load_players(&store).await.unwrap(), Some(single));

    assert!(store.read("../escape").await.is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn unreachable_store_falls_back_to_setup() {
    let tracker = Tracker::new(DownStore);
    let page = tracker.page_state().await;
    assert_eq!(page.view, AppView::Setup);
    assert!(page.error.is_some());
    assert_eq!(page.setup_slots.len(), 5);
    assert!(matches!(
        tracker.record_loss(PlayerColor::Red, Some("pw")).await,
        Err(TrackerError::Store(_))
    ));
}

#[tokio::test]
async fn page_state_waits_for_a_save_in_progress() {
    let tracker = Tracker::new(SlowAdminStore::default());
    let sub = SetupSubmission {
        slots: vec![SlotInput {
            name: "A".into(),
            color: "red".into(),
            password: "ruby".into(),
            ..Default::default()
        }],
        admin_password: "admin".into(),
        admin_confirm: "admin".into(),
    };
    let (saved, page) = tokio::join!(tracker.save_players(&sub), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        tracker.page_state().await
    });
    saved.unwrap();
    assert_eq!(page.view, AppView::Game);
    assert!(page.admin_configured);
}
