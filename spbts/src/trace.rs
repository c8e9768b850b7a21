use serde::{Deserialize, Serialize};

use board::{File, Occupancy, PieceKind, Side};

use crate::{blocking_info, is_exposed};

/// Observation of one pawn at one ply.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRow {
    pub ply_index: usize,
    pub side: Side,
    pub file: File,
    #[serde(with = "flag")]
    pub exposed: bool,
    #[serde(with = "flag")]
    pub friendly_block: bool,
    #[serde(with = "flag")]
    pub enemy_block: bool,
    #[serde(with = "flag")]
    pub any_block: bool,
    pub blocker_kind: Option<PieceKind>,
}

/// Every (ply, side, file) observation of a game, ordered by ply, then side, then file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    rows: Vec<TraceRow>,
    plies: usize,
}

impl Trace {
    pub fn build<O: Occupancy>(positions: &[O]) -> Self {
        let mut rows = Vec::with_capacity(positions.len() * Side::ALL.len() * File::COUNT);

        for (ply_index, position) in positions.iter().enumerate() {
            for side in Side::ALL {
                for file in File::all() {
                    rows.push(observe(position, ply_index, side, file));
                }
            }
        }

        Self {
            rows,
            plies: positions.len(),
        }
    }

    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    /// Number of positions the trace covers, ply 0 included.
    pub fn plies(&self) -> usize {
        self.plies
    }

    pub fn side_rows(&self, side: Side) -> impl Iterator<Item = &TraceRow> + '_ {
        self.rows.iter().filter(move |row| row.side == side)
    }

    pub fn counters(&self, side: Side) -> SideCounters {
        let mut counters = SideCounters::default();

        for row in self.side_rows(side).filter(|row| row.exposed) {
            let file = row.file.index();
            counters.exposure += 1;
            counters.per_file_exposure[file] += 1;

            if row.friendly_block {
                counters.friendly_np += 1;
                counters.per_file_friendly[file] += 1;
            }
            if row.enemy_block {
                counters.enemy += 1;
            }
            if row.any_block {
                counters.any += 1;
            }
        }

        counters
    }
}

fn observe<O: Occupancy>(position: &O, ply_index: usize, side: Side, file: File) -> TraceRow {
    let mut row = TraceRow {
        ply_index,
        side,
        file,
        exposed: false,
        friendly_block: false,
        enemy_block: false,
        any_block: false,
        blocker_kind: None,
    };

    if is_exposed(position, file, side) {
        let info = blocking_info(position, file, side);
        row.exposed = true;
        row.friendly_block = info.friendly_non_pawn;
        row.enemy_block = info.enemy;
        row.any_block = info.any_block;
        row.blocker_kind = info.blocker;
    }

    row
}

/// Totals of the exposed rows of one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideCounters {
    pub exposure: usize,
    pub friendly_np: usize,
    pub enemy: usize,
    pub any: usize,
    pub per_file_exposure: [usize; File::COUNT],
    pub per_file_friendly: [usize; File::COUNT],
}

/// Serializes a flag as 0 or 1.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(serde::de::Error::custom(format!(
                "expected 0 or 1, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::{Piece, Position, Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_row_count_is_sixteen_per_ply() {
        for plies in 1..5 {
            let positions = vec![Position::standard(); plies];
            let trace = Trace::build(&positions);

            assert_eq!(trace.rows().len(), 8 * 2 * plies);
            assert_eq!(trace.plies(), plies);
        }
    }

    #[test]
    fn test_rows_are_ordered_by_ply_side_file() {
        let trace = Trace::build(&[Position::standard(), Position::standard()]);
        let rows = trace.rows();

        assert_eq!((rows[0].ply_index, rows[0].side, rows[0].file.letter()), (0, Side::White, 'a'));
        assert_eq!((rows[7].ply_index, rows[7].side, rows[7].file.letter()), (0, Side::White, 'h'));
        assert_eq!((rows[8].ply_index, rows[8].side, rows[8].file.letter()), (0, Side::Black, 'a'));
        assert_eq!((rows[16].ply_index, rows[16].side), (1, Side::White));
    }

    #[test]
    fn test_counters_at_start() {
        let trace = Trace::build(&[Position::standard()]);

        for side in Side::ALL {
            let counters = trace.counters(side);
            assert_eq!(counters.exposure, 8);
            assert_eq!(counters.friendly_np + counters.enemy + counters.any, 0);
            assert_eq!(counters.per_file_exposure, [1; 8]);
        }
    }

    #[test]
    fn test_unexposed_rows_carry_no_block() {
        // The f3 knight would block, but the f2 pawn is gone.
        let position = Position::standard()
            .without_piece(sq("f2"))
            .with_piece(sq("f3"), Piece::new(PieceKind::Knight, Side::White));
        let trace = Trace::build(&[position]);
        let row = trace.rows()[5];

        assert_eq!(row.file.letter(), 'f');
        assert!(!row.exposed);
        assert!(!row.friendly_block && !row.any_block);
        assert_eq!(row.blocker_kind, None);
        assert_eq!(trace.counters(Side::White).exposure, 7);
    }

    #[test]
    fn test_row_serializes_flags_as_numbers() {
        let position = Position::standard()
            .with_piece(sq("f3"), Piece::new(PieceKind::Knight, Side::White));
        let trace = Trace::build(&[position]);
        let json = serde_json::to_value(trace.rows()[5]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "ply_index": 0,
                "side": "white",
                "file": "f",
                "exposed": 1,
                "friendly_block": 1,
                "enemy_block": 0,
                "any_block": 1,
                "blocker_kind": "n"
            })
        );

        let row: TraceRow = serde_json::from_value(json).unwrap();
        assert_eq!(row, trace.rows()[5]);
    }
}
