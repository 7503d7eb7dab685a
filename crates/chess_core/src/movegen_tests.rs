use super::*;

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

fn sorted(mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort();
    moves
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert!(moves.contains(&mv("e1g1")));
    assert!(moves.contains(&mv("e1c1")));
}

#[test]
fn test_legal_moves_from_square() {
    let pos = Position::startpos();
    let knight = sorted(legal_moves_from(&pos, "g1".parse().unwrap()));
    assert_eq!(knight, sorted(vec![mv("g1f3"), mv("g1h3")]));

    // Opponent's pieces and empty squares have no moves.
    assert!(legal_moves_from(&pos, "e7".parse().unwrap()).is_empty());
    assert!(legal_moves_from(&pos, "e4".parse().unwrap()).is_empty());
}

#[test]
fn test_is_legal_matches_enumeration() {
    let pos = Position::startpos();
    let all = legal_moves(&pos);
    for m in &all {
        assert!(is_legal(&pos, *m));
    }
    assert!(!is_legal(&pos, mv("e2e5")));
    assert!(!is_legal(&pos, mv("e7e5")));
    assert!(!is_legal(&pos, mv("d1h5")));
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight on e2 is pinned by the rook on e8.
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves_from(&pos, "e2".parse().unwrap()).is_empty());
    assert!(has_legal_moves(&pos));
}

#[test]
fn test_promotion_generates_all_four_pieces() {
    let pos = Position::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let promos = sorted(legal_moves_from(&pos, "e7".parse().unwrap()));
    assert_eq!(
        promos,
        sorted(vec![mv("e7e8q"), mv("e7e8r"), mv("e7e8b"), mv("e7e8n")])
    );
    // The bare push is not a legal move: the piece must be named.
    assert!(!is_legal(&pos, mv("e7e8")));
}

#[test]
fn test_castling_blocked_by_attacked_transit_square() {
    // Black rook on f8 covers f1: kingside castling is illegal, queenside is fine.
    let pos = Position::from_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(!moves.contains(&mv("e1g1")));
    assert!(moves.contains(&mv("e1c1")));
}

#[test]
fn test_castling_not_allowed_out_of_check() {
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(!moves.contains(&mv("e1g1")));
    assert!(!moves.contains(&mv("e1c1")));
}

#[test]
fn test_queenside_castling_needs_empty_b_file_only_safe_c_and_d() {
    // b1 attacked is fine, b1 occupied is not.
    let attacked_b1 = Position::from_fen("1r4k1/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    assert!(legal_moves(&attacked_b1).contains(&mv("e1c1")));

    let occupied_b1 = Position::from_fen("6k1/8/8/8/8/8/8/RN2K3 w Q - 0 1").unwrap();
    assert!(!legal_moves(&occupied_b1).contains(&mv("e1c1")));
}

#[test]
fn test_castling_requires_right() {
    let pos = Position::from_fen("6k1/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(!moves.contains(&mv("e1g1")));
    assert!(!moves.contains(&mv("e1c1")));
}

#[test]
fn test_en_passant_only_on_target_square() {
    let pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.contains(&mv("e5f6")));
    assert!(!moves.contains(&mv("e5d6")));
}

#[test]
fn test_en_passant_that_exposes_king_is_illegal() {
    // Capturing en passant would clear the fifth rank between the rook and king.
    let pos = Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").unwrap();
    assert!(!legal_moves(&pos).contains(&mv("e5d6")));
}
