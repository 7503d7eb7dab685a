//! Times the rules API on a few well-known positions.
//!
//! For every node of a fixed-depth tree it measures three walks:
//! raw `perft`, the checked `Position::apply` path used by the session
//! layer, and `apply` followed by `evaluate`.
//!
//!   cargo run --release --example rules_bench -p chess_core -- [depth] [fen]
//!
//! With a FEN the per-move `divide` counts are printed as well.

use std::env;
use std::time::{Duration, Instant};

use chess_core::{divide, evaluate, legal_moves, perft, Outcome, Position, STARTING_POSITION_FEN};

const POSITIONS: &[(&str, &str)] = &[
    ("startpos", STARTING_POSITION_FEN),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    (
        "promotions",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ),
];

#[derive(Default)]
struct Tally {
    nodes: u64,
    terminal: u64,
}

fn main() {
    let mut args = env::args().skip(1);
    let depth: u8 = args.next().and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.next() {
        Some(fen) => {
            let pos = Position::from_fen(&fen).unwrap_or_else(|e| {
                eprintln!("bad FEN {fen:?}: {e}");
                std::process::exit(1);
            });
            print_divide(&pos, depth);
            bench("position", &pos, depth);
        }
        None => {
            println!("{:<14} {:>10} {:>10} {:>10} {:>10}", "", "perft", "apply", "+evaluate", "nodes");
            for (name, fen) in POSITIONS {
                match Position::from_fen(fen) {
                    Ok(pos) => bench(name, &pos, depth),
                    Err(e) => eprintln!("{name}: {e}"),
                }
            }
        }
    }
}

fn print_divide(pos: &Position, depth: u8) {
    let mut total = 0;
    for (mv, count) in divide(pos, depth) {
        println!("{mv}: {count}");
        total += count;
    }
    println!("\n{total} nodes at depth {depth}\n");
}

fn bench(name: &str, pos: &Position, depth: u8) {
    let (raw, _) = timed(|| perft(pos, depth));

    let mut applied = Tally::default();
    let (checked, _) = timed(|| walk(pos, depth, false, &mut applied));

    let mut evaluated = Tally::default();
    let (full, _) = timed(|| walk(pos, depth, true, &mut evaluated));

    debug_assert_eq!(applied.nodes, evaluated.nodes);
    println!(
        "{name:<14} {raw:>10.2?} {checked:>10.2?} {full:>10.2?} {:>10} ({} terminal)",
        evaluated.nodes, evaluated.terminal
    );
}

/// Walks the tree through the validating entry points.
fn walk(pos: &Position, depth: u8, with_eval: bool, tally: &mut Tally) {
    if with_eval && matches!(evaluate(pos), Outcome::Checkmate { .. } | Outcome::Stalemate) {
        tally.terminal += 1;
    }
    if depth == 0 {
        tally.nodes += 1;
        return;
    }
    for mv in legal_moves(pos) {
        if let Ok(next) = pos.apply(mv) {
            walk(&next, depth - 1, with_eval, tally);
        }
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (Duration, T) {
    let start = Instant::now();
    let out = f();
    (start.elapsed(), out)
}
