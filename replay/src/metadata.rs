use serde::{Deserialize, Serialize};

use crate::GameRecord;

/// Normalized header fields of a game.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMetadata {
    pub game_id: String,
    pub white: String,
    pub black: String,
    pub result: String,
    pub date: String,
    pub time_control: String,
    pub variant: String,
    pub starting_fen: Option<String>,
    pub white_elo: Option<u32>,
    pub black_elo: Option<u32>,
}

impl GameMetadata {
    pub fn from_record(record: &GameRecord) -> Self {
        let text = |key: &str| record.header(key).unwrap_or_default().to_string();
        let elo = |key: &str| record.header(key).and_then(|v| v.trim().parse::<u32>().ok());

        // Lichess puts the game url in Site, the id is its last segment.
        let site = record.header("Site").unwrap_or_default();
        let game_id = match site.rsplit_once('/') {
            Some((_, id)) => id.to_string(),
            None => text("GameId"),
        };

        Self {
            game_id,
            white: text("White"),
            black: text("Black"),
            result: text("Result"),
            date: text("Date"),
            time_control: text("TimeControl"),
            variant: record.header("Variant").unwrap_or("Standard").to_string(),
            starting_fen: record.starting_fen().map(str::to_string),
            white_elo: elo("WhiteElo"),
            black_elo: elo("BlackElo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_game;

    #[test]
    fn test_metadata_from_lichess_headers() {
        let pgn = r#"[Site "https://lichess.org/AbCdEf12"]
[White "LeelaQueenOdds"]
[Black "Human"]
[Result "0-1"]
[WhiteElo "2650"]
[BlackElo "?"]
[TimeControl "180+2"]

1. e4 *"#;
        let record = read_game(pgn).unwrap().unwrap();
        let metadata = GameMetadata::from_record(&record);

        assert_eq!(metadata.game_id, "AbCdEf12");
        assert_eq!(metadata.white, "LeelaQueenOdds");
        assert_eq!(metadata.white_elo, Some(2650));
        assert_eq!(metadata.black_elo, None);
        assert_eq!(metadata.variant, "Standard");
        assert_eq!(metadata.time_control, "180+2");
        assert_eq!(metadata.starting_fen, None);
    }

    #[test]
    fn test_metadata_falls_back_to_game_id_header() {
        let pgn = "[Site \"Local\"]\n[GameId \"42\"]\n[Variant \"Chess960\"]\n\n1. e4 *";
        let record = read_game(pgn).unwrap().unwrap();
        let metadata = GameMetadata::from_record(&record);

        assert_eq!(metadata.game_id, "42");
        assert_eq!(metadata.variant, "Chess960");
    }
}
