use super::*;
use crate::types::{Move, PieceKind};

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

#[test]
fn test_zobrist_keys_unique() {
    // Verify that piece keys are unique (no collisions in small sample)
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for piece in 0..6 {
            for sq in 0..64 {
                let key = ZOBRIST.pieces[color][piece][sq];
                assert!(seen.insert(key), "Duplicate Zobrist key found");
            }
        }
    }

    assert!(
        seen.insert(ZOBRIST.side_to_move),
        "Side to move key collision"
    );
    for i in 0..4 {
        assert!(seen.insert(ZOBRIST.castling[i]), "Castling key collision");
    }
    for i in 0..8 {
        assert!(
            seen.insert(ZOBRIST.en_passant[i]),
            "En passant key collision"
        );
    }
}

#[test]
fn test_zobrist_piece_key() {
    let piece = Piece::new(Color::White, PieceKind::Pawn);
    let a1 = Square::new(0).unwrap();
    let b1 = Square::new(1).unwrap();
    assert_ne!(ZOBRIST.piece_key(piece, a1), ZOBRIST.piece_key(piece, b1));
}

#[test]
fn test_knight_shuffle_returns_to_same_key() {
    let start = Position::startpos();
    let back = ["g1f3", "g8f6", "f3g1", "f6g8"]
        .iter()
        .fold(start.clone(), |pos, m| pos.apply(mv(m)).unwrap());
    // Clocks differ, the key does not.
    assert_ne!(back, start);
    assert_eq!(back.key(), start.key());
}

#[test]
fn test_key_depends_on_side_castling_and_en_passant() {
    let white = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    let black = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b Q - 0 1").unwrap();
    let no_rights = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    assert_ne!(white.key(), black.key());
    assert_ne!(white.key(), no_rights.key());

    let with_ep =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    let without_ep =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert_ne!(with_ep.key(), without_ep.key());
}
