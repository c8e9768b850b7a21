use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use board::File;

use crate::SideCounters;

/// Blocking rates of one side. Every rate is `None` when its denominator is zero: the pawn was
/// never on its start square, so the rate does not apply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SideSummary {
    pub exposure_count: usize,
    #[serde(rename = "SPBTS_friendly")]
    pub spbts_friendly: Option<f64>,
    #[serde(rename = "SPBTS_enemy")]
    pub spbts_enemy: Option<f64>,
    #[serde(rename = "SPBTS_any")]
    pub spbts_any: Option<f64>,
    pub per_file_friendly_rate: BTreeMap<File, Option<f64>>,
}

impl SideSummary {
    pub fn from_counters(counters: &SideCounters) -> Self {
        let exposure = counters.exposure;

        let per_file_friendly_rate = File::all()
            .map(|file| {
                let idx = file.index();
                let rate = rate(counters.per_file_friendly[idx], counters.per_file_exposure[idx]);
                (file, rate)
            })
            .collect();

        Self {
            exposure_count: exposure,
            spbts_friendly: rate(counters.friendly_np, exposure),
            spbts_enemy: rate(counters.enemy, exposure),
            spbts_any: rate(counters.any, exposure),
            per_file_friendly_rate,
        }
    }

    pub fn file_rate(&self, file: File) -> Option<f64> {
        self.per_file_friendly_rate.get(&file).copied().flatten()
    }
}

fn rate(count: usize, exposure: usize) -> Option<f64> {
    (exposure > 0).then(|| count as f64 / exposure as f64)
}
