use std::collections::BTreeMap;

use pgn_reader::SanPlus;

/// Headers and mainline moves of one PGN game, as read from text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    pub headers: BTreeMap<String, String>,
    pub moves: Vec<SanPlus>,
}

impl GameRecord {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// The custom starting layout, present only when the game declares `[SetUp "1"]` together with a `FEN` tag.
    pub fn starting_fen(&self) -> Option<&str> {
        match (self.header("SetUp"), self.header("FEN")) {
            (Some("1"), Some(fen)) => Some(fen),
            _ => None,
        }
    }
}
