use anyhow::{anyhow, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use board::{File, Occupancy, Side};
use replay::{read_game, replay as replay_game, GameMetadata, GameRecord};

use crate::{classify_bucket, track_fate, AnalysisOptions, Bucket, FateCounts, SideSummary, Trace};

/// Everything measured for one side of one game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SideReport {
    #[serde(flatten)]
    pub summary: SideSummary,
    #[serde(rename = "bucket_label")]
    pub bucket: Bucket,
    pub fate_counts: FateCounts,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameAnalysis {
    pub metadata: GameMetadata,
    /// Index of the last ply analysed.
    pub plies_analyzed: usize,
    pub white: SideReport,
    pub black: SideReport,
}

impl GameAnalysis {
    /// Measures an already replayed game. `positions` must hold at least the start position.
    pub fn from_positions<O: Occupancy>(
        metadata: GameMetadata,
        positions: &[O],
        file: File,
    ) -> (Self, Trace) {
        assert!(!positions.is_empty(), "A game has at least its start position");

        let trace = Trace::build(positions);
        let report = |side: Side| SideReport {
            summary: SideSummary::from_counters(&trace.counters(side)),
            bucket: classify_bucket(positions, side, file),
            fate_counts: FateCounts::from_fate(track_fate(positions, side, file)),
        };

        let analysis = Self {
            metadata,
            plies_analyzed: positions.len() - 1,
            white: report(Side::White),
            black: report(Side::Black),
        };

        (analysis, trace)
    }

    pub fn side(&self, side: Side) -> &SideReport {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    pub fn min_exposure(&self) -> usize {
        self.white
            .summary
            .exposure_count
            .min(self.black.summary.exposure_count)
    }
}

pub fn analyze_record(record: &GameRecord, options: &AnalysisOptions) -> Result<(GameAnalysis, Trace)> {
    let metadata = GameMetadata::from_record(record);
    let positions = replay_game(record, options.max_plies)?;

    debug!(
        "Analysing game {:?}: {} positions of {} moves",
        metadata.game_id,
        positions.len(),
        record.moves.len()
    );

    Ok(GameAnalysis::from_positions(
        metadata,
        &positions,
        options.distinguished_file,
    ))
}

/// Analyses the first game in `pgn`.
pub fn analyze_pgn(pgn: &str, options: &AnalysisOptions) -> Result<(GameAnalysis, Trace)> {
    let record = read_game(pgn)?.ok_or_else(|| anyhow!("Invalid PGN: no game found"))?;

    analyze_record(&record, options)
}
