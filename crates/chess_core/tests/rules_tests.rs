//! End-to-end rules scenarios played through the public API.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use chess_core::{
    evaluate, is_legal, legal_moves, ChessError, Color, GameRecord, IllegalReason, Move, Outcome,
    Position,
};

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

fn play(moves: &[&str]) -> Position {
    moves
        .iter()
        .fold(Position::startpos(), |pos, m| pos.apply(mv(m)).unwrap())
}

#[test]
fn test_fools_mate() {
    let pos = play(&["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(
        evaluate(&pos),
        Outcome::Checkmate {
            winner: Color::Black
        }
    );
    assert!(legal_moves(&pos).is_empty());
}

#[test]
fn test_known_stalemate() {
    let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(evaluate(&pos), Outcome::Stalemate);
    assert!(legal_moves(&pos).is_empty());
}

#[test]
fn test_illegal_queen_move_leaves_position_unchanged() {
    let pos = play(&["e2e4", "e7e5"]);
    let before = pos.clone();
    // d2 still blocks the queen's file.
    assert_eq!(
        pos.apply(mv("d1d5")),
        Err(ChessError::IllegalMove {
            mv: mv("d1d5"),
            reason: IllegalReason::NotPseudoLegal
        })
    );
    assert_eq!(pos, before);
    assert!(pos.apply(mv("d1h5")).is_ok());
}

#[test]
fn test_en_passant_available_for_one_ply_only() {
    let pos = play(&["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert!(is_legal(&pos, mv("e5d6")));

    let later = play(&["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "a6a5"]);
    assert!(!is_legal(&later, mv("e5d6")));
}

#[test]
fn test_random_playouts_never_leave_king_in_check() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..40 {
        let mut pos = Position::startpos();
        for _ in 0..200 {
            let moves = legal_moves(&pos);
            let Some(&m) = moves.choose(&mut rng) else {
                break;
            };
            let mover = pos.side_to_move();
            let next = pos.apply(m).unwrap();
            assert!(!next.in_check(mover), "{m} left {mover} in check");
            assert!(next.validate().is_ok());

            let outcome = evaluate(&next);
            assert_eq!(outcome, evaluate(&next));
            pos = next;
            if outcome.is_terminal() {
                break;
            }
        }
    }
}

#[test]
fn test_serde_round_trip_of_played_game() {
    let mut record = GameRecord::new(Position::startpos());
    for m in ["e2e4", "c7c5", "e4e5", "d7d5", "e5d6", "e7d6", "g1f3", "b8c6"] {
        record.play(mv(m)).unwrap();
    }
    let pos_json = serde_json::to_string(record.position()).unwrap();
    let pos: Position = serde_json::from_str(&pos_json).unwrap();
    assert_eq!(&pos, record.position());

    let record_json = serde_json::to_string(&record).unwrap();
    let back: GameRecord = serde_json::from_str(&record_json).unwrap();
    assert_eq!(back, record);
    assert_eq!(back.movetext(), "1. e4 c5 2. e5 d5 3. exd6 exd6 4. Nf3 Nc6");
}
