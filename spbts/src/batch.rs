use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use replay::{GameMetadata, GameRecord};

use crate::{analyze_record, AnalysisOptions, GameAnalysis};

/// A game left out of a batch, and why.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedGame {
    /// Position of the game in the input.
    pub index: usize,
    pub game_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub analyzed: Vec<GameAnalysis>,
    pub skipped: Vec<SkippedGame>,
}

/// Analyses every game on its own. A game that cannot be replayed, or whose exposure is below
/// `min_exposure` for either side, is skipped and the batch carries on. Results keep input order.
pub fn analyze_collection(records: &[GameRecord], options: &AnalysisOptions) -> BatchOutcome {
    let results: Vec<Result<GameAnalysis, SkippedGame>> = records
        .par_iter()
        .enumerate()
        .map(|(index, record)| analyze_one(index, record, options))
        .collect();

    let mut outcome = BatchOutcome::default();
    for result in results {
        match result {
            Ok(analysis) => outcome.analyzed.push(analysis),
            Err(skipped) => {
                warn!("Skipping game {} ({}): {}", skipped.index, skipped.game_id, skipped.reason);
                outcome.skipped.push(skipped);
            }
        }
    }

    info!(
        "Analysed {} of {} games, skipped {}",
        outcome.analyzed.len(),
        records.len(),
        outcome.skipped.len()
    );

    outcome
}

fn analyze_one(
    index: usize,
    record: &GameRecord,
    options: &AnalysisOptions,
) -> Result<GameAnalysis, SkippedGame> {
    let skipped = |reason: String| SkippedGame {
        index,
        game_id: GameMetadata::from_record(record).game_id,
        reason,
    };

    let (analysis, _trace) = analyze_record(record, options).map_err(|err| skipped(format!("{:#}", err)))?;

    let (white, black) = (
        analysis.white.summary.exposure_count,
        analysis.black.summary.exposure_count,
    );
    if analysis.min_exposure() < options.min_exposure {
        return Err(skipped(format!(
            "insufficient exposure (white {}, black {}, required {})",
            white, black, options.min_exposure
        )));
    }

    Ok(analysis)
}
