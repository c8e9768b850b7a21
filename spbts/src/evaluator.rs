use board::{File, Occupancy, PieceKind, Side, Square};

/// Square a pawn of `side` starts on in `file`.
pub fn start_square(file: File, side: Side) -> Square {
    Square::new(file, side.start_rank())
}

/// Square `steps` ranks in front of the start square, towards the opponent.
pub fn square_ahead(file: File, side: Side, steps: i8) -> Square {
    let rank = side.start_rank() as i8 + side.forward() * steps;
    Square::new(file, rank as u8)
}

/// True while the pawn of `side` on `file` still stands on its start square.
pub fn is_exposed<O: Occupancy + ?Sized>(position: &O, file: File, side: Side) -> bool {
    position
        .piece_at(start_square(file, side))
        .is_some_and(|piece| piece.is_pawn_of(side))
}

/// What occupies the square directly in front of a start square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockingInfo {
    /// One of the side's own knights, bishops, rooks, queens or king.
    pub friendly_non_pawn: bool,
    pub enemy: bool,
    /// Anything at all, including a friendly pawn.
    pub any_block: bool,
    pub blocker: Option<PieceKind>,
}

pub fn blocking_info<O: Occupancy + ?Sized>(position: &O, file: File, side: Side) -> BlockingInfo {
    let Some(piece) = position.piece_at(square_ahead(file, side, 1)) else {
        return BlockingInfo::default();
    };

    BlockingInfo {
        friendly_non_pawn: piece.side == side && piece.kind != PieceKind::Pawn,
        enemy: piece.side == side.opponent(),
        any_block: true,
        blocker: Some(piece.kind),
    }
}
