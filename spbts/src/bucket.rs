use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use board::{File, Occupancy, Side};

use crate::{landing, Landing, PawnHistory};

/// Plies a first block may last and still count as short.
const SHORT_BLOCK_PLIES: usize = 2;

/// What happened first to a pawn on its start square.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    /// Never moved, never blocked.
    A1,
    /// Advanced one square, unblocked before.
    A2,
    /// Advanced two squares, unblocked before.
    A3,
    /// First block lasted at most two plies.
    B4,
    /// First block lasted longer than two plies, or ran to the end of the window.
    B5,
    #[serde(rename = "other")]
    Other,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::A1,
        Bucket::A2,
        Bucket::A3,
        Bucket::B4,
        Bucket::B5,
        Bucket::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::A1 => "A1",
            Bucket::A2 => "A2",
            Bucket::A3 => "A3",
            Bucket::B4 => "B4",
            Bucket::B5 => "B5",
            Bucket::Other => "other",
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classifies the first episode of the `side` pawn on `file`.
///
/// Only the first event counts. A pawn that is blocked, freed and blocked again is judged on its
/// first block alone.
pub fn classify_bucket<O: Occupancy>(positions: &[O], side: Side, file: File) -> Bucket {
    let history = PawnHistory::observe(positions, side, file);
    let move_off = history.move_off_ply();

    match move_off {
        None if !history.ever_blocked() => return Bucket::A1,
        Some(ply) if !history.blocked_before(ply) => {
            return match landing(&positions[ply], file, side) {
                Some(Landing::PushOne) => Bucket::A2,
                Some(Landing::PushTwo) => Bucket::A3,
                _ => Bucket::Other,
            };
        }
        _ => {}
    }

    let Some(block_start) = history.first_block_ply() else {
        return Bucket::Other;
    };

    // A block still in place at the last ply is cut off at the end of the window.
    let block_end = history
        .block_release_ply(block_start)
        .unwrap_or(history.len());

    if block_end - block_start <= SHORT_BLOCK_PLIES {
        Bucket::B4
    } else {
        Bucket::B5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::{Piece, PieceKind, Position, Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn f() -> File {
        "f".parse().unwrap()
    }

    fn white_knight_on_f3() -> Position {
        Position::standard().with_piece(sq("f3"), Piece::new(PieceKind::Knight, Side::White))
    }

    fn white_pawn_moved_to(square: &str) -> Position {
        Position::standard()
            .without_piece(sq("f2"))
            .with_piece(sq(square), Piece::new(PieceKind::Pawn, Side::White))
    }

    #[test]
    fn test_single_position_is_a1() {
        let positions = [Position::standard()];

        assert_eq!(classify_bucket(&positions, Side::White, f()), Bucket::A1);
        assert_eq!(classify_bucket(&positions, Side::Black, f()), Bucket::A1);
    }

    #[test]
    fn test_push_one_and_two() {
        let start = Position::standard();

        assert_eq!(
            classify_bucket(&[start, white_pawn_moved_to("f3")], Side::White, f()),
            Bucket::A2
        );
        assert_eq!(
            classify_bucket(&[start, white_pawn_moved_to("f4")], Side::White, f()),
            Bucket::A3
        );
    }

    #[test]
    fn test_capture_off_start_is_other() {
        let start = Position::standard();

        assert_eq!(
            classify_bucket(&[start, white_pawn_moved_to("g3")], Side::White, f()),
            Bucket::Other
        );
        assert_eq!(
            classify_bucket(&[start, start.without_piece(sq("f2"))], Side::White, f()),
            Bucket::Other
        );
    }

    #[test]
    fn test_block_of_two_plies_is_b4() {
        let start = Position::standard();
        let blocked = white_knight_on_f3();
        let positions = [start, blocked, blocked, start, start];

        assert_eq!(classify_bucket(&positions, Side::White, f()), Bucket::B4);
    }

    #[test]
    fn test_block_of_three_plies_is_b5() {
        let start = Position::standard();
        let blocked = white_knight_on_f3();
        let positions = [start, blocked, blocked, blocked, start];

        assert_eq!(classify_bucket(&positions, Side::White, f()), Bucket::B5);
    }

    #[test]
    fn test_block_censored_by_window() {
        let start = Position::standard();
        let blocked = white_knight_on_f3();

        assert_eq!(classify_bucket(&[start, blocked], Side::White, f()), Bucket::B4);
        assert_eq!(
            classify_bucket(&[start, blocked, blocked, blocked], Side::White, f()),
            Bucket::B5
        );
    }

    #[test]
    fn test_block_at_ply_zero_counts() {
        let blocked = white_knight_on_f3();

        assert_eq!(
            classify_bucket(&[blocked, blocked, blocked], Side::White, f()),
            Bucket::B5
        );
    }

    #[test]
    fn test_pawn_leaving_ends_the_block() {
        let blocked = white_knight_on_f3();
        let captured = blocked.without_piece(sq("f2"));
        let positions = [Position::standard(), blocked, captured, captured, captured];

        assert_eq!(classify_bucket(&positions, Side::White, f()), Bucket::B4);
    }

    #[test]
    fn test_only_first_episode_counts() {
        let start = Position::standard();
        let blocked = white_knight_on_f3();
        let positions = [start, blocked, start, blocked, blocked, blocked, blocked];

        assert_eq!(classify_bucket(&positions, Side::White, f()), Bucket::B4);
    }

    #[test]
    fn test_absent_pawn_is_a1() {
        let positions = [Position::empty(), Position::empty()];

        assert_eq!(classify_bucket(&positions, Side::Black, f()), Bucket::A1);
    }

    #[test]
    fn test_labels_serialize() {
        let labels: Vec<String> = Bucket::ALL.iter().map(|b| b.to_string()).collect();

        assert_eq!(labels, vec!["A1", "A2", "A3", "B4", "B5", "other"]);
        assert_eq!(serde_json::to_string(&Bucket::Other).unwrap(), "\"other\"");
        assert_eq!(serde_json::to_string(&Bucket::B5).unwrap(), "\"B5\"");
    }
}
