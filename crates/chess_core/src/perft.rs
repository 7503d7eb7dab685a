use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(pos: &Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        buf.clear();
        legal_moves_into(pos, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let next = pos.play_unchecked(mv);
            nodes += inner(&next, depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Node count below each legal root move, for tracking down generator bugs.
pub fn divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(pos, &mut roots);
    roots
        .into_iter()
        .map(|mv| {
            let next = pos.play_unchecked(mv);
            (mv, perft(&next, depth.saturating_sub(1)))
        })
        .collect()
}
