use board::{File, Occupancy, Side, Square};

use crate::{blocking_info, is_exposed, square_ahead};

/// Ply by ply observations of a single pawn: still on its start square, and blocked there by a
/// friendly non-pawn. A pawn that has left its start square is never blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PawnHistory {
    exposed: Vec<bool>,
    friendly_block: Vec<bool>,
}

impl PawnHistory {
    pub fn observe<O: Occupancy>(positions: &[O], side: Side, file: File) -> Self {
        let (exposed, friendly_block) = positions
            .iter()
            .map(|position| {
                let exposed = is_exposed(position, file, side);
                let blocked = exposed && blocking_info(position, file, side).friendly_non_pawn;
                (exposed, blocked)
            })
            .unzip();

        Self {
            exposed,
            friendly_block,
        }
    }

    pub fn len(&self) -> usize {
        self.exposed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exposed.is_empty()
    }

    pub fn is_exposed(&self, ply: usize) -> bool {
        self.exposed[ply]
    }

    pub fn is_blocked(&self, ply: usize) -> bool {
        self.friendly_block[ply]
    }

    pub fn ever_exposed(&self) -> bool {
        self.exposed.iter().any(|&e| e)
    }

    pub fn ever_blocked(&self) -> bool {
        self.friendly_block.iter().any(|&b| b)
    }

    /// Whether a friendly block was seen at any ply before `ply`.
    pub fn blocked_before(&self, ply: usize) -> bool {
        self.friendly_block[..ply].iter().any(|&b| b)
    }

    /// First ply at which the pawn is gone from the start square it stood on the ply before.
    pub fn move_off_ply(&self) -> Option<usize> {
        (1..self.len()).find(|&t| self.exposed[t - 1] && !self.exposed[t])
    }

    pub fn first_block_ply(&self) -> Option<usize> {
        self.friendly_block.iter().position(|&b| b)
    }

    /// First ply after `start` at which the block no longer holds, either because the pawn left or
    /// because the blocker did.
    pub fn block_release_ply(&self, start: usize) -> Option<usize> {
        (start + 1..self.len()).find(|&t| !self.exposed[t] || !self.friendly_block[t])
    }
}

/// Where a pawn that just left its start square now stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    PushOne,
    PushTwo,
    CaptureLeft,
    CaptureRight,
}

/// Looks for the side's pawn on the squares a start square pawn can reach in one move, in the
/// order one ahead, two ahead, lower file diagonal, higher file diagonal.
pub fn landing<O: Occupancy + ?Sized>(position: &O, file: File, side: Side) -> Option<Landing> {
    landing_squares(file, side)
        .into_iter()
        .find_map(|(square, landing)| has_pawn(position, square?, side).then_some(landing))
}

/// Where the pawn went between `before` and `after`: the reachable square that holds one of the
/// side's pawns in `after` but not in `before`. Another pawn already standing on a reachable
/// square is not mistaken for the one that moved.
pub fn arrival<O: Occupancy + ?Sized>(before: &O, after: &O, file: File, side: Side) -> Option<Landing> {
    landing_squares(file, side).into_iter().find_map(|(square, landing)| {
        let square = square?;
        (has_pawn(after, square, side) && !has_pawn(before, square, side)).then_some(landing)
    })
}

fn landing_squares(file: File, side: Side) -> [(Option<Square>, Landing); 4] {
    let one_ahead = square_ahead(file, side, 1);
    [
        (Some(one_ahead), Landing::PushOne),
        (Some(square_ahead(file, side, 2)), Landing::PushTwo),
        (one_ahead.offset(-1, 0), Landing::CaptureLeft),
        (one_ahead.offset(1, 0), Landing::CaptureRight),
    ]
}

fn has_pawn<O: Occupancy + ?Sized>(position: &O, square: Square, side: Side) -> bool {
    position
        .piece_at(square)
        .is_some_and(|piece| piece.is_pawn_of(side))
}
