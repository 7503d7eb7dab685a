use super::*;
use crate::error::ChessError;

#[test]
fn test_startpos_fen_round_trip() {
    let pos = Position::from_fen(STARTING_POSITION_FEN).unwrap();
    assert_eq!(pos, Position::startpos());
    assert_eq!(pos.to_fen(), STARTING_POSITION_FEN);
}

#[test]
fn test_fen_round_trip_keeps_metadata() {
    let fens = [
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w Kq - 3 17",
        "8/8/8/4k3/8/4K3/8/8 b - - 99 60",
    ];
    for fen in fens {
        assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
    }
}

#[test]
fn test_fen_clock_fields_are_optional() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 1);
}

#[test]
fn test_malformed_fen_is_invalid_state() {
    let bad = [
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
    ];
    for fen in bad {
        assert!(
            matches!(Position::from_fen(fen), Err(ChessError::InvalidState(_))),
            "expected InvalidState for {fen:?}"
        );
    }
}

#[test]
fn test_impossible_positions_are_rejected() {
    let impossible = [
        // two white kings
        "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
        // no black king
        "8/8/8/8/8/8/8/4K3 w - - 0 1",
        // pawn on the first rank
        "4k3/8/8/8/8/8/8/P3K3 w - - 0 1",
        // black in check with white to move
        "4k3/8/8/8/8/8/8/4R1K1 w - - 0 1",
        // castling right without the rook
        "4k3/8/8/8/8/8/8/4K3 w K - 0 1",
        // en-passant square without a pawn in front of it
        "4k3/8/8/8/8/8/8/4K3 b - e3 0 1",
        // fullmove number zero
        "4k3/8/8/8/8/8/8/4K3 w - - 0 0",
    ];
    for fen in impossible {
        assert!(
            matches!(Position::from_fen(fen), Err(ChessError::InvalidState(_))),
            "expected InvalidState for {fen:?}"
        );
    }
}
