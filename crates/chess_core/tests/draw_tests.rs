//! Game-ending conditions as reported by `evaluate` / `evaluate_with`.

use chess_core::{
    evaluate, evaluate_with, Color, DrawReason, DrawRules, GameRecord, Outcome, Position,
};

fn outcome(fen: &str) -> Outcome {
    evaluate(&Position::from_fen(fen).unwrap())
}

fn draw(reason: DrawReason) -> Outcome {
    Outcome::Draw { reason }
}

fn record_of(moves: &[&str]) -> GameRecord {
    let mut record = GameRecord::new(Position::startpos());
    for m in moves {
        record.play(m.parse().unwrap()).unwrap();
    }
    record
}

const KNIGHT_SHUFFLE: [&str; 4] = ["f3g1", "c6b8", "g1f3", "b8c6"];

#[test]
fn test_stalemates() {
    for fen in [
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        "6k1/6P1/6K1/8/8/8/8/8 b - - 0 1",
        // Stalemate wins over the fifty-move rule.
        "7k/5Q2/6K1/8/8/8/8/8 b - - 120 90",
    ] {
        assert_eq!(outcome(fen), Outcome::Stalemate, "{fen}");
    }
}

#[test]
fn test_mate_and_check_are_told_apart() {
    assert_eq!(
        outcome("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"),
        Outcome::Checkmate {
            winner: Color::White
        }
    );
    assert_eq!(
        outcome("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2"),
        Outcome::Check
    );
}

#[test]
fn test_mate_on_the_hundredth_halfmove_is_still_mate() {
    // Back-rank mate delivered with the clock already past the limit.
    assert_eq!(
        outcome("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 80"),
        Outcome::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn test_fifty_move_threshold() {
    assert_eq!(
        outcome("8/8/8/4k3/8/3K4/4P3/8 w - - 100 60"),
        draw(DrawReason::FiftyMoveRule)
    );
    assert_eq!(outcome("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60"), Outcome::Ongoing);
}

#[test]
fn test_fifty_move_rule_reached_by_quiet_move() {
    let pos = Position::from_fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60").unwrap();
    let pos = pos.apply("d3c3".parse().unwrap()).unwrap();
    assert_eq!(evaluate(&pos), draw(DrawReason::FiftyMoveRule));
}

#[test]
fn test_pawn_move_resets_fifty_move_count() {
    let pos = Position::from_fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60").unwrap();
    let pos = pos.apply("e2e4".parse().unwrap()).unwrap();
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(evaluate(&pos), Outcome::Ongoing);
}

#[test]
fn test_fifty_move_rule_can_be_disabled() {
    let pos = Position::from_fen("8/8/8/4k3/8/3K4/4P3/8 w - - 100 60").unwrap();
    let rules = DrawRules {
        fifty_move_rule: false,
        ..DrawRules::default()
    };
    assert_eq!(evaluate_with(&pos, &rules, None), Outcome::Ongoing);
}

#[test]
fn test_insufficient_material() {
    let dead = [
        ("K v K", "8/8/8/4k3/8/4K3/8/8 w - - 0 1"),
        ("KB v K", "8/8/8/4k3/8/4KB2/8/8 w - - 0 1"),
        ("KN v K", "8/8/8/4k3/8/4K3/5N2/8 w - - 0 1"),
        ("K v KB", "8/8/4b3/4k3/8/4K3/8/8 w - - 0 1"),
        ("K v KN", "8/8/4n3/4k3/8/4K3/8/8 w - - 0 1"),
        ("same-colored bishops", "5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1"),
    ];
    for (name, fen) in dead {
        assert_eq!(outcome(fen), draw(DrawReason::InsufficientMaterial), "{name}");
    }

    let alive = [
        ("opposite bishops", "2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1"),
        ("pawn", "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1"),
        ("rook", "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1"),
        ("queen", "8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1"),
        ("two knights", "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1"),
    ];
    for (name, fen) in alive {
        assert_eq!(outcome(fen), Outcome::Ongoing, "{name}");
    }
}

#[test]
fn test_threefold_repetition_needs_the_record() {
    let mut moves = vec!["e2e4", "e7e5", "g1f3", "b8c6"];
    moves.extend(KNIGHT_SHUFFLE);

    let twice = record_of(&moves);
    assert_eq!(twice.repetition_count(), 2);
    assert_eq!(
        evaluate_with(twice.position(), &DrawRules::default(), Some(&twice)),
        Outcome::Ongoing
    );

    moves.extend(KNIGHT_SHUFFLE);
    let thrice = record_of(&moves);
    assert_eq!(thrice.repetition_count(), 3);
    assert_eq!(
        evaluate_with(thrice.position(), &DrawRules::default(), Some(&thrice)),
        draw(DrawReason::ThreefoldRepetition)
    );

    // Without history, or with the rule off, the same position plays on.
    assert_eq!(evaluate(thrice.position()), Outcome::Ongoing);
    let rules = DrawRules {
        threefold_repetition: false,
        ..DrawRules::default()
    };
    assert_eq!(
        evaluate_with(thrice.position(), &rules, Some(&thrice)),
        Outcome::Ongoing
    );
}

#[test]
fn test_repetition_counts_the_start_position() {
    // Both knights out and back twice from the initial position.
    let record = record_of(&[
        "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
    ]);
    assert_eq!(record.position().key(), Position::startpos().key());
    assert_eq!(
        evaluate_with(record.position(), &DrawRules::default(), Some(&record)),
        draw(DrawReason::ThreefoldRepetition)
    );
}
