use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::{File, Piece, PieceKind, Side, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Read access to what stands on each square.
pub trait Occupancy {
    fn piece_at(&self, square: Square) -> Option<Piece>;
}

/// Piece placement for a single ply.
///
/// Positions are plain values. Replaying a game produces a new `Position` per ply, so a sequence of
/// them can be kept and inspected in any order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [Option<Piece>; 64],
}

impl Position {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    pub fn standard() -> Self {
        let mut position = Self::empty();

        for file in File::all() {
            let kind = BACK_RANK[file.index()];
            position.set(Square::new(file, 0), Some(Piece::new(kind, Side::White)));
            position.set(Square::new(file, 1), Some(Piece::new(PieceKind::Pawn, Side::White)));
            position.set(Square::new(file, 6), Some(Piece::new(PieceKind::Pawn, Side::Black)));
            position.set(Square::new(file, 7), Some(Piece::new(kind, Side::Black)));
        }

        position
    }

    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.set(square, Some(piece));
        self
    }

    pub fn without_piece(mut self, square: Square) -> Self {
        self.set(square, None);
        self
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, piece)| piece.map(|p| (Square::from_index(idx), p)))
    }

    /// The piece placement field of a FEN string, rank 8 first.
    pub fn placement(&self) -> String {
        let mut placement = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in File::all() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                placement.push_str(&empty.to_string());
            }

            if rank > 0 {
                placement.push('/');
            }
        }

        placement
    }
}

impl Occupancy for Position {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parses the piece placement field of a FEN string. Any trailing FEN fields are ignored.
impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let placement = s
            .split_whitespace()
            .next()
            .ok_or_else(|| anyhow!("Empty piece placement"))?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(anyhow!("Expected 8 ranks in {:?}", placement));
        }

        let mut position = Self::empty();

        for (row, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0usize;

            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }

                let piece = Piece::from_fen_char(c)
                    .ok_or_else(|| anyhow!("Invalid piece {:?} in {:?}", c, placement))?;

                if file >= File::COUNT {
                    return Err(anyhow!("Rank {:?} is longer than 8 squares", rank_text));
                }

                position.set(Square::new(File::new(file), rank), Some(piece));
                file += 1;
            }

            if file != File::COUNT {
                return Err(anyhow!("Rank {:?} does not cover 8 squares", rank_text));
            }
        }

        Ok(position)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for rank in (0..8).rev() {
            write!(f, " {} |", rank + 1)?;
            for file in File::all() {
                let p = self
                    .piece_at(Square::new(file, rank))
                    .map(|p| p.fen_char())
                    .unwrap_or(' ');
                write!(f, " {} |", p)?;
            }
            writeln!(f)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        writeln!(f, "     a   b   c   d   e   f   g   h  ")?;

        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.placement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_standard_matches_start_placement() {
        assert_eq!(Position::standard().placement(), START);
        assert_eq!(START.parse::<Position>().unwrap(), Position::standard());
    }

    #[test]
    fn test_standard_piece_at() {
        let position = Position::standard();

        assert_eq!(
            position.piece_at(sq("f2")),
            Some(Piece::new(PieceKind::Pawn, Side::White))
        );
        assert_eq!(
            position.piece_at(sq("g8")),
            Some(Piece::new(PieceKind::Knight, Side::Black))
        );
        assert_eq!(position.piece_at(sq("f3")), None);
        assert_eq!(position.pieces().count(), 32);
    }

    #[test]
    fn test_parse_ignores_trailing_fen_fields() {
        let position = "4k3/8/8/8/8/5N2/5P2/4K3 w - - 0 1".parse::<Position>().unwrap();

        assert_eq!(
            position.piece_at(sq("f3")),
            Some(Piece::new(PieceKind::Knight, Side::White))
        );
        assert_eq!(position.pieces().count(), 4);
    }

    #[test]
    fn test_parse_rejects_bad_placements() {
        assert!("8/8/8".parse::<Position>().is_err());
        assert!("9/8/8/8/8/8/8/8".parse::<Position>().is_err());
        assert!("ppppppppp/8/8/8/8/8/8/8".parse::<Position>().is_err());
        assert!("x7/8/8/8/8/8/8/8".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
    }

    #[test]
    fn test_with_and_without_piece_are_values() {
        let start = Position::standard();
        let moved = start
            .without_piece(sq("g1"))
            .with_piece(sq("f3"), Piece::new(PieceKind::Knight, Side::White));

        assert_eq!(start.piece_at(sq("f3")), None);
        assert_eq!(moved.piece_at(sq("g1")), None);
        assert_eq!(moved.placement(), "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R");
    }
}
