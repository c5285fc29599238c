use crate::board::GameState;
use crate::rules::{apply_move, legal_destinations_into, MoveVerdict};
use crate::types::{Coordinates, PieceKind};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
/// A promotion counts once per piece it may become.
pub fn perft(state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(state: &mut GameState, depth: u8, layers: &mut [Vec<(Coordinates, MoveVerdict)>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        let movers: Vec<Coordinates> = state
            .board
            .pieces()
            .filter(|(_, p)| p.color == state.whose_move)
            .map(|(sq, _)| sq)
            .collect();

        let mut nodes = 0u64;
        for from in movers {
            legal_destinations_into(state, from, buf);
            for &(to, verdict) in buf.iter() {
                let fanout = if verdict == MoveVerdict::Promotion {
                    PieceKind::PROMOTIONS.len() as u64
                } else {
                    1
                };
                if depth == 1 {
                    nodes += fanout;
                    continue;
                }
                if verdict == MoveVerdict::Promotion {
                    for kind in PieceKind::PROMOTIONS {
                        let mut child = state.clone();
                        apply_move(&mut child, from, to, verdict, Some(kind));
                        nodes += inner(&mut child, depth - 1, rest);
                    }
                } else {
                    let mut child = state.clone();
                    apply_move(&mut child, from, to, verdict, None);
                    nodes += inner(&mut child, depth - 1, rest);
                }
            }
        }
        nodes
    }

    let mut scratch = state.clone();
    let mut layers = vec![Vec::with_capacity(32); depth as usize];
    inner(&mut scratch, depth, &mut layers[..])
}

/// Node counts split by root move, printed as `e2-e4: 20` by the bench.
pub fn perft_divide(state: &GameState, depth: u8) -> Vec<(String, u64)> {
    let mut out = Vec::new();
    if depth == 0 {
        return out;
    }
    let mut scratch = state.clone();
    let mut buf = Vec::new();
    let movers: Vec<Coordinates> = state
        .board
        .pieces()
        .filter(|(_, p)| p.color == state.whose_move)
        .map(|(sq, _)| sq)
        .collect();
    for from in movers {
        legal_destinations_into(&mut scratch, from, &mut buf);
        for &(to, verdict) in &buf {
            let kinds: Vec<Option<PieceKind>> = if verdict == MoveVerdict::Promotion {
                PieceKind::PROMOTIONS.iter().copied().map(Some).collect()
            } else {
                vec![None]
            };
            for kind in kinds {
                let mut child = state.clone();
                apply_move(&mut child, from, to, verdict, kind);
                let label = match kind {
                    Some(k) => format!("{from}-{to}{}", k.letter()),
                    None => format!("{from}-{to}"),
                };
                out.push((label, perft(&child, depth - 1)));
            }
        }
    }
    out
}
