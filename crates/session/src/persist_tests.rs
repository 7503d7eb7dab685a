use super::*;
use crate::config::Opponent;
use crate::player::{MoveOrigin, PlayerId};
use crate::session::TurnState;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{name}-{}.json", Uuid::new_v4()))
}

fn played_game() -> GameSession {
    let config = SessionConfig {
        opponent: Opponent::Local,
        ..Default::default()
    };
    let mut session = GameSession::new(config, &PlayerId::new("me"));
    for m in ["e4", "d5", "exd5", "Qxd5", "Nc3"] {
        assert!(session
            .submit_text(m, MoveOrigin::Local)
            .unwrap()
            .is_accepted());
    }
    session
}

#[test]
fn test_snapshot_json_round_trip() {
    let session = played_game();
    let snapshot = session.snapshot();
    let json = snapshot.to_json().unwrap();
    let back = GameSnapshot::from_json(&json).unwrap();
    assert_eq!(back, snapshot);

    let restored = GameSession::restore(back).unwrap();
    assert_eq!(restored.id(), session.id());
    assert_eq!(restored.position(), session.position());
    assert_eq!(restored.record(), session.record());
    assert_eq!(restored.state(), TurnState::AwaitingHumanMove);
}

#[test]
fn test_save_and_load_file() {
    let session = played_game();
    let path = temp_path("saved-game");
    session.save_json(&path).unwrap();
    let loaded = GameSession::load_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.position().to_fen(), session.position().to_fen());
    assert_eq!(loaded.record().movetext(), "1. e4 d5 2. exd5 Qxd5 3. Nc3");
}

#[test]
fn test_unknown_version_is_rejected() {
    let mut value = serde_json::to_value(played_game().snapshot()).unwrap();
    value["version"] = serde_json::json!(99);
    let err = GameSnapshot::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(err, SessionError::UnsupportedSnapshot(99)));
}

#[test]
fn test_tampered_record_is_rejected() {
    let mut value = serde_json::to_value(played_game().snapshot()).unwrap();
    // Replace the last move with one the knight cannot make.
    value["record"]["moves"][4] = serde_json::json!("b1b3");
    let err = GameSnapshot::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(err, SessionError::Json(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = GameSession::load_json(&temp_path("missing")).unwrap_err();
    assert!(matches!(err, SessionError::Io { .. }));
}

#[test]
fn test_snapshot_file_round_trip() {
    let snapshot = played_game().snapshot();
    let path = temp_path("snapshot");
    snapshot.save(&path).unwrap();
    let back = GameSnapshot::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(back, snapshot);
}

#[test]
fn test_unwritable_path_is_io_error() {
    let dir = std::env::temp_dir().join(format!("no-such-dir-{}", Uuid::new_v4()));
    let err = played_game().snapshot().save(&dir.join("game.json")).unwrap_err();
    match err {
        SessionError::Io { path, .. } => assert_eq!(path, dir.join("game.json")),
        other => panic!("expected Io error, got {other:?}"),
    }
}
