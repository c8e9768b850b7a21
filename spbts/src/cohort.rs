use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use board::{File, Side};

use crate::{Bucket, FateCounts, GameAnalysis, SideReport};

/// Location and spread of a set of rates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Descriptive {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let sorted = values.iter().copied().sorted_by(f64::total_cmp).collect_vec();
        let mean = mean(values);

        Some(Self {
            count: values.len(),
            mean,
            median: median_of_sorted(&sorted),
            std: variance(values, mean).sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Aggregate view of the analysed games of one cohort.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CohortSummary {
    pub name: String,
    pub games: usize,
    pub players: usize,
    /// Friendly non-pawn block rate of both sides of every game, undefined rates dropped.
    pub spbts: Option<Descriptive>,
    /// Mean friendly block rate per file over both sides of every game.
    pub per_file_friendly_rate: BTreeMap<File, Option<f64>>,
    pub fate_totals: FateCounts,
    pub buckets: BTreeMap<Bucket, usize>,
}

impl CohortSummary {
    pub fn from_games(name: &str, games: &[GameAnalysis]) -> Self {
        let players: BTreeSet<&str> = games
            .iter()
            .flat_map(|g| [g.metadata.white.as_str(), g.metadata.black.as_str()])
            .collect();

        let per_file_friendly_rate = File::all()
            .map(|file| {
                let values = side_reports(games)
                    .filter_map(|report| report.summary.file_rate(file))
                    .collect_vec();
                let rate = (!values.is_empty()).then(|| mean(&values));
                (file, rate)
            })
            .collect();

        let mut fate_totals = FateCounts::new();
        let mut buckets: BTreeMap<Bucket, usize> = Bucket::ALL.iter().map(|&b| (b, 0)).collect();
        for report in side_reports(games) {
            fate_totals.merge(&report.fate_counts);
            *buckets.entry(report.bucket).or_insert(0) += 1;
        }

        Self {
            name: name.to_string(),
            games: games.len(),
            players: players.len(),
            spbts: Descriptive::from_values(&spbts_values(games)),
            per_file_friendly_rate,
            fate_totals,
            buckets,
        }
    }
}

/// Friendly non-pawn block rates of both sides of every game, undefined rates dropped.
pub fn spbts_values(games: &[GameAnalysis]) -> Vec<f64> {
    side_reports(games)
        .filter_map(|report| report.summary.spbts_friendly)
        .collect()
}

fn side_reports(games: &[GameAnalysis]) -> impl Iterator<Item = &SideReport> + '_ {
    games
        .iter()
        .flat_map(|game| Side::ALL.into_iter().map(move |side| game.side(side)))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CohortComparison {
    pub cohort1: CohortSummary,
    pub cohort2: CohortSummary,
    pub median_difference: Option<f64>,
    pub mean_difference: Option<f64>,
    /// Cohen's d of the SPBTS rates, `None` when it cannot be computed.
    pub effect_size: Option<f64>,
}

pub fn compare_cohorts(
    cohort1: (&str, &[GameAnalysis]),
    cohort2: (&str, &[GameAnalysis]),
) -> CohortComparison {
    let values1 = spbts_values(cohort1.1);
    let values2 = spbts_values(cohort2.1);

    let summary1 = CohortSummary::from_games(cohort1.0, cohort1.1);
    let summary2 = CohortSummary::from_games(cohort2.0, cohort2.1);

    let difference = |f: fn(&Descriptive) -> f64| match (&summary1.spbts, &summary2.spbts) {
        (Some(a), Some(b)) => Some(f(a) - f(b)),
        _ => None,
    };

    CohortComparison {
        median_difference: difference(|d| d.median),
        mean_difference: difference(|d| d.mean),
        effect_size: cohens_d(&values1, &values2),
        cohort1: summary1,
        cohort2: summary2,
    }
}

/// Difference of means over the pooled standard deviation. The pooled deviation weighs each
/// population variance by `n - 1`. Needs at least two values per cohort.
pub fn cohens_d(values1: &[f64], values2: &[f64]) -> Option<f64> {
    let (n1, n2) = (values1.len(), values2.len());
    if n1 < 2 || n2 < 2 {
        return None;
    }

    let (mean1, mean2) = (mean(values1), mean(values2));
    let pooled = (((n1 - 1) as f64 * variance(values1, mean1)
        + (n2 - 1) as f64 * variance(values2, mean2))
        / (n1 + n2 - 2) as f64)
        .sqrt();

    (pooled > 0.0).then(|| (mean1 - mean2) / pooled)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_descriptive_odd_and_even() {
        let odd = Descriptive::from_values(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(odd.median, 2.0);
        assert_eq!((odd.min, odd.max), (1.0, 3.0));
        assert_approx_eq!(odd.mean, 2.0);
        assert_approx_eq!(odd.std, (2.0f64 / 3.0).sqrt());

        let even = Descriptive::from_values(&[4.0, 1.0, 2.0, 3.0]).unwrap();
        assert_approx_eq!(even.median, 2.5);
        assert_eq!(even.count, 4);
    }

    #[test]
    fn test_descriptive_empty_is_none() {
        assert_eq!(Descriptive::from_values(&[]), None);
    }

    #[test]
    fn test_cohens_d() {
        // Both population variances are 2/3, pooled over 4 degrees of freedom.
        let d = cohens_d(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap();
        assert_approx_eq!(d, -1.0 / (2.0f64 / 3.0).sqrt());
    }

    #[test]
    fn test_cohens_d_undefined() {
        assert_eq!(cohens_d(&[], &[1.0]), None);
        assert_eq!(cohens_d(&[1.0], &[2.0]), None);
        assert_eq!(cohens_d(&[1.0], &[2.0, 3.0]), None);
        assert_eq!(cohens_d(&[1.0, 1.0], &[1.0, 1.0]), None);
    }
}
