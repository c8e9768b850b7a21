use anyhow::{anyhow, Context, Result};
use log::warn;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, Position as _, Role};

use board::{Piece, PieceKind, Position, Side, Square};

use crate::GameRecord;

/// The chess position a game starts from: the standard layout, or the declared FEN setup.
pub fn initial_position(record: &GameRecord) -> Result<Chess> {
    let Some(text) = record.starting_fen() else {
        return Ok(Chess::default());
    };

    let fen: Fen = text
        .parse()
        .with_context(|| format!("Invalid FEN header {:?}", text))?;

    // Shredder/X-FEN castling rights only make sense under Chess960 rules.
    fen.clone()
        .into_position::<Chess>(CastlingMode::Standard)
        .or_else(|_| fen.into_position::<Chess>(CastlingMode::Chess960))
        .map_err(|err| anyhow!("Illegal setup position {:?}: {}", text, err))
}

/// Replays the mainline, keeping at most `max_plies` positions. Ply 0 is always kept.
///
/// A move that is not legal in the reached position ends the replay there.
pub fn replay(record: &GameRecord, max_plies: usize) -> Result<Vec<Position>> {
    let mut chess = initial_position(record)?;
    let mut positions = Vec::with_capacity(max_plies.clamp(1, record.moves.len() + 1));
    positions.push(snapshot(chess.board()));

    for san_plus in &record.moves {
        if positions.len() >= max_plies {
            break;
        }

        match san_plus.san.to_move(&chess) {
            Ok(m) => {
                chess.play_unchecked(&m);
                positions.push(snapshot(chess.board()));
            }
            Err(err) => {
                warn!(
                    "Illegal move {} at ply {}, game truncated: {}",
                    san_plus,
                    positions.len(),
                    err
                );
                break;
            }
        }
    }

    Ok(positions)
}

/// Copies the placement of a `shakmaty` board into a standalone `Position`.
pub fn snapshot(board: &shakmaty::Board) -> Position {
    let mut position = Position::empty();

    for square in board.occupied() {
        if let Some(piece) = board.piece_at(square) {
            position.set(Square::from_index(square as usize), Some(map_piece(piece)));
        }
    }

    position
}

fn map_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };

    let side = match piece.color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    };

    Piece::new(kind, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_game;

    fn record(pgn: &str) -> GameRecord {
        read_game(pgn).unwrap().unwrap()
    }

    #[test]
    fn test_snapshot_of_start_is_standard() {
        assert_eq!(snapshot(Chess::default().board()), Position::standard());
    }

    #[test]
    fn test_replay_without_moves_keeps_start() {
        let positions = replay(&GameRecord::default(), 24).unwrap();

        assert_eq!(positions, vec![Position::standard()]);
    }

    #[test]
    fn test_replay_caps_positions_at_max_plies() {
        let game = record("1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5");

        assert_eq!(replay(&game, 24).unwrap().len(), 7);
        assert_eq!(replay(&game, 7).unwrap().len(), 7);
        assert_eq!(replay(&game, 4).unwrap().len(), 4);
        assert_eq!(replay(&game, 1).unwrap().len(), 1);
        assert_eq!(replay(&game, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_replay_positions_follow_moves() {
        let positions = replay(&record("1. Nf3 Nf6"), 24).unwrap();

        assert_eq!(
            positions[1].placement(),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R"
        );
        assert_eq!(
            positions[2].placement(),
            "rnbqkb1r/pppppppp/5n2/8/8/5N2/PPPPPPPP/RNBQKB1R"
        );
    }

    #[test]
    fn test_replay_stops_at_illegal_move() {
        let positions = replay(&record("1. e4 e5 2. Ke3 Nc6"), 24).unwrap();

        assert_eq!(positions.len(), 3);
    }

    #[test]
    fn test_replay_from_setup_position() {
        let pgn = "[SetUp \"1\"]\n[FEN \"4k3/5p2/8/8/8/8/5P2/4K3 w - - 0 1\"]\n\n1. f4 f5 *";
        let positions = replay(&record(pgn), 24).unwrap();

        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0].placement(), "4k3/5p2/8/8/8/8/5P2/4K3");
        assert_eq!(positions[2].placement(), "4k3/8/8/5p2/5P2/8/8/4K3");
    }

    #[test]
    fn test_fen_without_setup_flag_is_ignored() {
        let pgn = "[FEN \"4k3/8/8/8/8/8/5P2/4K3 w - - 0 1\"]\n\n1. e4 *";
        let positions = replay(&record(pgn), 24).unwrap();

        assert_eq!(positions[0], Position::standard());
    }

    #[test]
    fn test_invalid_setup_is_an_error() {
        let garbage = "[SetUp \"1\"]\n[FEN \"not a fen\"]\n\n1. e4 *";
        let no_kings = "[SetUp \"1\"]\n[FEN \"8/8/8/8/8/8/8/8 w - - 0 1\"]\n\n*";

        assert!(replay(&record(garbage), 24).is_err());
        assert!(replay(&record(no_kings), 24).is_err());
    }
}
