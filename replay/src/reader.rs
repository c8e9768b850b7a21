use std::collections::BTreeMap;
use std::io::Read;
use std::mem;

use anyhow::{Context, Result};
use pgn_reader::{BufferedReader, RawHeader, SanPlus, Skip, Visitor};

use crate::GameRecord;

/// Keeps the tag pairs and the mainline of each game. Variations are skipped.
#[derive(Default)]
struct GameCollector {
    headers: BTreeMap<String, String>,
    moves: Vec<SanPlus>,
}

impl Visitor for GameCollector {
    type Result = GameRecord;

    fn begin_game(&mut self) {
        self.headers.clear();
        self.moves.clear();
    }

    fn header(&mut self, key: &[u8], value: RawHeader<'_>) {
        let key = String::from_utf8_lossy(key).into_owned();
        let value = value.decode_utf8_lossy().into_owned();
        self.headers.insert(key, value);
    }

    fn san(&mut self, san_plus: SanPlus) {
        self.moves.push(san_plus);
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true)
    }

    fn end_game(&mut self) -> Self::Result {
        GameRecord {
            headers: mem::take(&mut self.headers),
            moves: mem::take(&mut self.moves),
        }
    }
}

/// Iterates over the games of a PGN stream.
pub struct PgnGames<R: Read> {
    reader: BufferedReader<R>,
    collector: GameCollector,
    games_read: usize,
}

impl<R: Read> PgnGames<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufferedReader::new(inner),
            collector: GameCollector::default(),
            games_read: 0,
        }
    }
}

impl<R: Read> Iterator for PgnGames<R> {
    type Item = Result<GameRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let game_num = self.games_read + 1;
        match self.reader.read_game(&mut self.collector) {
            Ok(Some(record)) => {
                self.games_read = game_num;
                Some(Ok(record))
            }
            Ok(None) => None,
            Err(err) => Some(Err(err).with_context(|| format!("Failed to read PGN game {}", game_num))),
        }
    }
}

pub fn read_games(pgn: &str) -> Result<Vec<GameRecord>> {
    PgnGames::new(pgn.as_bytes()).collect()
}

/// Reads the first game of the text. `None` when the text holds no game.
pub fn read_game(pgn: &str) -> Result<Option<GameRecord>> {
    PgnGames::new(pgn.as_bytes()).next().transpose()
}
