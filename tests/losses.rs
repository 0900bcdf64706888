//! Integration tests for recording losses behind a player's password.

use chrono::NaiveDate;
use ludo_tracker_web::logic::loss_date;
use ludo_tracker_web::{
    FlowOutcome, MemoryStore, PlayerColor, SetupSubmission, SlotInput, Tracker, TrackerError,
};

async fn tracker_with_two_players() -> Tracker<MemoryStore> {
    let tracker = Tracker::new(MemoryStore::new());
    let slots = vec![
        SlotInput {
            name: "A".into(),
            team: "Home".into(),
            color: "red".into(),
            password: "ruby".into(),
        },
        SlotInput {
            name: "B".into(),
            team: String::new(),
            color: "blue".into(),
            password: "sky".into(),
        },
    ];
    tracker
        .save_players(&SetupSubmission {
            slots,
            admin_password: "admin".into(),
            admin_confirm: "admin".into(),
        })
        .await
        .unwrap();
    tracker
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
}

#[test]
fn loss_date_is_month_day_year_without_padding() {
    assert_eq!(loss_date(day()), "3/7/2026");
    assert_eq!(
        loss_date(NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()),
        "12/25/2026"
    );
}

#[tokio::test]
async fn correct_password_adds_one_loss_and_one_date() {
    let tracker = tracker_with_two_players().await;
    let result = tracker
        .record_loss_on(PlayerColor::Red, Some("ruby"), day())
        .await
        .unwrap();
    assert_eq!(result.outcome, FlowOutcome::Done);

    let red = result.players.get(PlayerColor::Red).unwrap();
    assert_eq!(red.losses, 1);
    assert_eq!(red.dates, ["3/7/2026"]);

    let stored = tracker.players().await.unwrap().unwrap();
    assert_eq!(stored, result.players);
    assert_eq!(stored.get(PlayerColor::Blue).unwrap().losses, 0);
}

#[tokio::test]
async fn loss_without_explicit_day_is_dated_today() {
    let tracker = tracker_with_two_players().await;
    let before = chrono::Local::now().date_naive();
    let result = tracker
        .record_loss(PlayerColor::Blue, Some("sky"))
        .await
        .unwrap();
    let after = chrono::Local::now().date_naive();
    // The call may straddle midnight; either side of it is today.
    let allowed = [loss_date(before), loss_date(after)];
    let blue = result.players.get(PlayerColor::Blue).unwrap();
    assert_eq!(blue.dates.len(), 1);
    assert!(allowed.contains(&blue.dates[0]));
}

#[tokio::test]
async fn wrong_password_changes_nothing() {
    let tracker = tracker_with_two_players().await;
    let writes_before = tracker.store().write_log().len();
    for wrong in ["", "Ruby", "sky", "ruby "] {
        let err = tracker
            .record_loss_on(PlayerColor::Red, Some(wrong), day())
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::AuthFailed(_)));
    }
    let red = tracker
        .players()
        .await
        .unwrap()
        .unwrap()
        .get(PlayerColor::Red)
        .cloned()
        .unwrap();
    assert_eq!(red.losses, 0);
    assert!(red.dates.is_empty());
    assert_eq!(tracker.store().write_log().len(), writes_before);
}

#[tokio::test]
async fn cancelled_prompt_is_a_no_op() {
    let tracker = tracker_with_two_players().await;
    let writes_before = tracker.store().write_log().len();
    let result = tracker
        .record_loss_on(PlayerColor::Red, None, day())
        .await
        .unwrap();
    assert_eq!(result.outcome, FlowOutcome::Cancelled);
    assert_eq!(result.players.get(PlayerColor::Red).unwrap().losses, 0);
    assert_eq!(tracker.store().write_log().len(), writes_before);
}

#[tokio::test]
async fn unknown_color_is_not_found() {
    let tracker = tracker_with_two_players().await;
    let err = tracker
        .record_loss_on(PlayerColor::Green, Some("x"), day())
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::PlayerNotFound(PlayerColor::Green)));
}

#[tokio::test]
async fn no_players_yet_is_a_validation_error() {
    let tracker = Tracker::new(MemoryStore::new());
    let err = tracker
        .record_loss_on(PlayerColor::Red, Some("x"), day())
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
}

#[tokio::test]
async fn repeated_losses_keep_dates_in_step() {
    let tracker = tracker_with_two_players().await;
    for _ in 0..3 {
        tracker
            .record_loss_on(PlayerColor::Blue, Some("sky"), day())
            .await
            .unwrap();
    }
    let board = tracker.players().await.unwrap().unwrap();
    let blue = board.get(PlayerColor::Blue).unwrap();
    assert_eq!(blue.losses, 3);
    assert!(blue.dates_consistent());
}
